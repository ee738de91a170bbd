//! The surface being interrogated.
//!
//! An [`InterrogationObject`] is a triangle mesh with one unit normal per
//! point. The interrogation engine only reads it; points, normals and
//! connectivity never change after construction, so the bounding box and the
//! edge table are computed lazily and cached.

use crate::errors::InterrogationError;
use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::light::{Color, RED};
use crate::math;
use nalgebra::{Point3, Vector3};
use std::sync::OnceLock;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub mod shapes;
pub mod topology;

pub use topology::MeshTopology;

#[derive(Debug, Clone)]
pub struct InterrogationObject {
    points: Vec<Point3<Real>>,
    normals: Vec<Vector3<Real>>,
    triangles: Vec<[usize; 3]>,

    /// Lazily calculated AABB that spans all points.
    bounding_box: OnceLock<Aabb>,
    /// Lazily built edge table, shared by every contouring pass.
    topology: OnceLock<MeshTopology>,

    color: Color,
    textured: bool,
}

impl Default for InterrogationObject {
    /// An empty, red object.
    fn default() -> Self {
        InterrogationObject {
            points: Vec::new(),
            normals: Vec::new(),
            triangles: Vec::new(),
            bounding_box: OnceLock::new(),
            topology: OnceLock::new(),
            color: RED,
            textured: false,
        }
    }
}

impl InterrogationObject {
    /// Build from points, one normal per point, and triangles indexing the points.
    pub fn new(
        points: Vec<Point3<Real>>,
        normals: Vec<Vector3<Real>>,
        triangles: Vec<[usize; 3]>,
    ) -> Result<Self, InterrogationError> {
        if points.len() != normals.len() {
            return Err(InterrogationError::LengthMismatch {
                points: points.len(),
                normals: normals.len(),
            });
        }
        if let Some(bad) = points.iter().find(|p| !math::is_finite_point(p)) {
            return Err(InterrogationError::InvalidCoordinate(*bad));
        }
        for (face, tri) in triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i >= points.len()) {
                return Err(InterrogationError::IndexOutOfRange {
                    face,
                    index,
                    points: points.len(),
                });
            }
        }

        Ok(InterrogationObject {
            points,
            normals,
            triangles,
            ..Default::default()
        })
    }

    /// Build from polygonal faces, fan-triangulated around their first index.
    pub fn from_polygons(
        points: Vec<Point3<Real>>,
        normals: Vec<Vector3<Real>>,
        faces: &[Vec<usize>],
    ) -> Result<Self, InterrogationError> {
        let mut triangles = Vec::with_capacity(faces.len());
        for (face, indices) in faces.iter().enumerate() {
            if indices.len() < 3 {
                return Err(InterrogationError::DegenerateFace(face));
            }
            for k in 1..indices.len() - 1 {
                triangles.push([indices[0], indices[k], indices[k + 1]]);
            }
        }
        Self::new(points, normals, triangles)
    }

    /// Build from points and triangles, deriving each point's normal from the
    /// area-weighted normals of the triangles around it.
    pub fn with_computed_normals(
        points: Vec<Point3<Real>>,
        triangles: Vec<[usize; 3]>,
    ) -> Result<Self, InterrogationError> {
        let mut normals = vec![Vector3::zeros(); points.len()];
        for tri in &triangles {
            let [Some(a), Some(b), Some(c)] = tri.map(|i| points.get(i)) else {
                // reported by `new`
                continue;
            };
            // cross product length is twice the area
            let face_normal = (b - a).cross(&(c - a));
            for &i in tri {
                normals[i] += face_normal;
            }
        }
        let normals = normals.iter().map(math::normalize_or_zero).collect();
        Self::new(points, normals, triangles)
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Number of triangles, the polygon count of the mesh.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point3<Real>] {
        &self.points
    }

    pub fn normals(&self) -> &[Vector3<Real>] {
        &self.normals
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn point(&self, index: usize) -> Option<Point3<Real>> {
        self.points.get(index).copied()
    }

    pub fn normal(&self, index: usize) -> Option<Vector3<Real>> {
        self.normals.get(index).copied()
    }

    /// Axis aligned bounding box of all points (cached after first call).
    /// An empty object has a zero-size box at the origin.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            if self.points.is_empty() {
                return Aabb::new(Point3::origin(), Point3::origin());
            }
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for p in &self.points {
                mins = mins.inf(p);
                maxs = maxs.sup(p);
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Bounding box as `[xmin, xmax, ymin, ymax, zmin, zmax]`.
    pub fn bbox(&self) -> [Real; 6] {
        math::aabb_to_array(&self.bounding_box())
    }

    pub fn center(&self) -> Point3<Real> {
        self.bounding_box().center()
    }

    /// Edge table of the mesh (cached after first call).
    pub fn topology(&self) -> &MeshTopology {
        self.topology.get_or_init(|| MeshTopology::new(&self.triangles))
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub const fn is_textured(&self) -> bool {
        self.textured
    }

    pub fn set_textured(&mut self, textured: bool) {
        self.textured = textured;
    }

    /// Evaluate `f(point, normal)` at every point, in point order.
    #[cfg(not(feature = "parallel"))]
    pub fn map_vertices<T, F>(&self, f: F) -> Vec<T>
    where
        F: Fn(&Point3<Real>, &Vector3<Real>) -> T + Sync + Send,
        T: Send,
    {
        self.points
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| f(p, n))
            .collect()
    }

    /// Evaluate `f(point, normal)` at every point, in point order.
    #[cfg(feature = "parallel")]
    pub fn map_vertices<T, F>(&self, f: F) -> Vec<T>
    where
        F: Fn(&Point3<Real>, &Vector3<Real>) -> T + Sync + Send,
        T: Send,
    {
        self.points
            .par_iter()
            .zip(self.normals.par_iter())
            .map(|(p, n)| f(p, n))
            .collect()
    }
}
