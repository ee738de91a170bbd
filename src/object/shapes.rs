//! Surfaces to interrogate without a file reader: flat quads and grids,
//! height fields and spheres. All are z-up, matching the light plane above
//! the object.

use super::InterrogationObject;
use crate::float_types::{PI, Real, TAU};
use nalgebra::{Point3, Vector3};

impl InterrogationObject {
    /// Flat square of side `width` centered at the origin in the xy-plane,
    /// normals `+z`, four points and two triangles.
    pub fn quad(width: Real) -> InterrogationObject {
        InterrogationObject::grid(width, width, 1, 1)
    }

    /// Flat `width × depth` grid centered at the origin in the xy-plane, split
    /// into `segments_x × segments_y` cells of two triangles each.
    pub fn grid(width: Real, depth: Real, segments_x: usize, segments_y: usize) -> InterrogationObject {
        Self::height_field(width, depth, segments_x, segments_y, |_, _| 0.0)
    }

    /// Surface `z = f(x, y)` sampled on a grid centered at the origin.
    ///
    /// Normals are averaged from the adjacent triangles. Zero segment counts
    /// are raised to one.
    pub fn height_field<F>(
        width: Real,
        depth: Real,
        segments_x: usize,
        segments_y: usize,
        f: F,
    ) -> InterrogationObject
    where
        F: Fn(Real, Real) -> Real,
    {
        let nx = segments_x.max(1);
        let ny = segments_y.max(1);
        let dx = width / nx as Real;
        let dy = depth / ny as Real;

        let mut points = Vec::with_capacity((nx + 1) * (ny + 1));
        for j in 0..=ny {
            let y = -0.5 * depth + j as Real * dy;
            for i in 0..=nx {
                let x = -0.5 * width + i as Real * dx;
                points.push(Point3::new(x, y, f(x, y)));
            }
        }

        let index = |i: usize, j: usize| j * (nx + 1) + i;
        let mut triangles = Vec::with_capacity(2 * nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let (v00, v10) = (index(i, j), index(i + 1, j));
                let (v01, v11) = (index(i, j + 1), index(i + 1, j + 1));
                // counter-clockwise seen from +z
                triangles.push([v00, v10, v11]);
                triangles.push([v00, v11, v01]);
            }
        }

        InterrogationObject::with_computed_normals(points, triangles)
            .unwrap_or_else(|_| InterrogationObject::default())
    }

    /// UV sphere around the origin with poles on the z-axis and exact normals.
    /// At least three segments and two stacks are used.
    pub fn sphere(radius: Real, segments: usize, stacks: usize) -> InterrogationObject {
        let segments = segments.max(3);
        let stacks = stacks.max(2);

        let mut points = vec![Point3::new(0.0, 0.0, radius)];
        for j in 1..stacks {
            let phi = j as Real / stacks as Real * PI;
            let z = radius * phi.cos();
            let ring_radius = radius * phi.sin();
            for i in 0..segments {
                let theta = i as Real / segments as Real * TAU;
                points.push(Point3::new(ring_radius * theta.cos(), ring_radius * theta.sin(), z));
            }
        }
        points.push(Point3::new(0.0, 0.0, -radius));

        let north = 0;
        let south = points.len() - 1;
        let ring = |j: usize, i: usize| 1 + (j - 1) * segments + i % segments;

        let mut triangles = Vec::new();
        for i in 0..segments {
            triangles.push([north, ring(1, i), ring(1, i + 1)]);
        }
        for j in 1..stacks - 1 {
            for i in 0..segments {
                let (v1, v2) = (ring(j, i), ring(j, i + 1));
                let (v3, v4) = (ring(j + 1, i), ring(j + 1, i + 1));
                triangles.push([v1, v3, v4]);
                triangles.push([v1, v4, v2]);
            }
        }
        for i in 0..segments {
            triangles.push([south, ring(stacks - 1, i + 1), ring(stacks - 1, i)]);
        }

        let normals = points
            .iter()
            .map(|p| p.coords.try_normalize(Real::EPSILON).unwrap_or_else(Vector3::z))
            .collect();

        InterrogationObject::new(points, normals, triangles).unwrap_or_else(|_| InterrogationObject::default())
    }
}
