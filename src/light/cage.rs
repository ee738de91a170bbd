//! `LightCage`: an ordered set of light lines in a plane above the object.
//!
//! Two layouts are supported, both with the light plane parallel to the top
//! face of the object's bounding box:
//! - **TopParallel**: parallel lines, looked up by one coordinate (1-D textures)
//! - **TopCrissCross**: one bundle parallel to x and one parallel to y (2-D textures)
//!
//! The cage keeps the bounding box it was built for, together with its center
//! and half extents, so lookups in the texture cube `[-1, 1]^3` map to world
//! space with one multiply and one add.

use crate::float_types::{PLANE_EPSILON, Real, parry3d::bounding_volume::Aabb, tolerance};
use crate::light::{Attenuation, Color, LightLine};
use crate::math::{self, Axis};
use crate::texture::{self, LuminanceImage, SUPERSAMPLING};
use crate::traits::Transform;
use nalgebra::{Point2, Point3, Vector3};

/// Coordinate used for one-dimensional luminance lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LookupAxis {
    /// Lines parallel to the y-axis, looked up by x.
    #[default]
    X,
    /// Lines parallel to the x-axis, looked up by y.
    Y,
}

impl LookupAxis {
    pub const fn axis(self) -> Axis {
        match self {
            LookupAxis::X => Axis::X,
            LookupAxis::Y => Axis::Y,
        }
    }

    pub const fn index(self) -> usize {
        self.axis().index()
    }
}

/// Direction of the lines of a parallel cage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineOrientation {
    /// Lines parallel to the y-axis, spread across x.
    AlongY,
    /// Lines parallel to the x-axis, spread across y.
    AlongX,
}

impl LineOrientation {
    const fn lookup_axis(self) -> LookupAxis {
        match self {
            LineOrientation::AlongY => LookupAxis::X,
            LineOrientation::AlongX => LookupAxis::Y,
        }
    }
}

/// Arrangement of the lines in the light plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CageLayout {
    TopParallel { lookup_axis: LookupAxis },
    TopCrissCross,
}

impl Default for CageLayout {
    fn default() -> Self {
        CageLayout::TopParallel {
            lookup_axis: LookupAxis::X,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LightCage {
    /// Lines in insertion order; the order decides which band wins a lookup.
    lines: Vec<LightLine>,

    /// Defaults given to inserted lines
    radius: Real,
    attenuation: Attenuation,

    /// Supersample and filter synthesized textures
    pre_filter: bool,

    bounding_box: Aabb,
    center: Point3<Real>,
    /// Half extents of the bounding box, the scale from `[-1, 1]^3`.
    scale: Vector3<Real>,

    layout: CageLayout,
}

impl Default for LightCage {
    /// Empty parallel cage for the box `[-1, 1]^3`.
    fn default() -> Self {
        LightCage::new([-1.0, 1.0, -1.0, 1.0, -1.0, 1.0], CageLayout::default())
    }
}

impl LightCage {
    /// Empty cage for a bounding box given as
    /// `[xmin, xmax, ymin, ymax, zmin, zmax]`.
    pub fn new(bbox: [Real; 6], layout: CageLayout) -> Self {
        let bounding_box = math::aabb_from_array(bbox);
        LightCage {
            lines: Vec::new(),
            radius: 0.0,
            attenuation: Attenuation::Constant,
            pre_filter: false,
            center: bounding_box.center(),
            scale: bounding_box.half_extents(),
            bounding_box,
            layout,
        }
    }

    /// `count` parallel lines spread equidistantly across the box, in the
    /// light plane half the box height above its top face. A single line is
    /// centered.
    pub fn top_parallel(bbox: [Real; 6], orientation: LineOrientation, count: usize) -> Self {
        let mut cage = LightCage::new(
            bbox,
            CageLayout::TopParallel {
                lookup_axis: orientation.lookup_axis(),
            },
        );
        cage.add_bundle(orientation, count);
        cage
    }

    /// Two bundles: `along_y` lines parallel to the y-axis spread across x,
    /// then `along_x` lines parallel to the x-axis spread across y.
    pub fn top_criss_cross(bbox: [Real; 6], along_y: usize, along_x: usize) -> Self {
        let mut cage = LightCage::new(bbox, CageLayout::TopCrissCross);
        cage.add_bundle(LineOrientation::AlongY, along_y);
        cage.add_bundle(LineOrientation::AlongX, along_x);
        cage
    }

    fn add_bundle(&mut self, orientation: LineOrientation, count: usize) {
        let [xmin, xmax, ymin, ymax, _, _] = self.bbox_array();
        let height = self.light_plane_height();

        let (spread_min, spread_max) = match orientation {
            LineOrientation::AlongY => (xmin, xmax),
            LineOrientation::AlongX => (ymin, ymax),
        };
        let offsets: Vec<Real> = match count {
            0 => Vec::new(),
            1 => vec![0.5 * (spread_min + spread_max)],
            _ => {
                let delta = (spread_max - spread_min) / (count - 1) as Real;
                (0..count).map(|i| spread_min + delta * i as Real).collect()
            },
        };

        for offset in offsets {
            let (point, direction, length) = match orientation {
                LineOrientation::AlongY => (Point3::new(offset, ymin, height), Vector3::y(), ymax - ymin),
                LineOrientation::AlongX => (Point3::new(xmin, offset, height), Vector3::x(), xmax - xmin),
            };
            self.push_line(point, direction, length);
        }
    }

    /// Append a line. Its radius and attenuation are overwritten with the
    /// cage defaults.
    ///
    /// Cages with mixed attributes are possible by changing lines through
    /// [`LightCage::lines_mut`] after insertion.
    pub fn push_back(&mut self, mut line: LightLine) {
        line.set_radius(self.radius);
        line.set_attenuation(self.attenuation);
        self.lines.push(line);
    }

    /// Build and append a line through `point` along `direction`, drawn
    /// with `length`.
    pub fn push_line(&mut self, point: Point3<Real>, direction: Vector3<Real>, length: Real) {
        self.push_back(LightLine::new(point, direction).with_length(length));
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[LightLine] {
        &self.lines
    }

    /// Direct access to the lines, bypassing the cage defaults.
    pub fn lines_mut(&mut self) -> &mut [LightLine] {
        &mut self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LightLine> {
        self.lines.iter()
    }

    pub fn first(&self) -> Option<&LightLine> {
        self.lines.first()
    }

    pub fn last(&self) -> Option<&LightLine> {
        self.lines.last()
    }

    pub const fn layout(&self) -> CageLayout {
        self.layout
    }

    /// Lookup axis of a parallel cage, `None` for criss-cross cages.
    pub const fn lookup_axis(&self) -> Option<LookupAxis> {
        match self.layout {
            CageLayout::TopParallel { lookup_axis } => Some(lookup_axis),
            CageLayout::TopCrissCross => None,
        }
    }

    pub const fn radius(&self) -> Real {
        self.radius
    }

    /// Set the default radius for lines inserted from now on.
    pub fn set_radius(&mut self, radius: Real) {
        self.radius = radius;
    }

    /// Set the radius of the cage and of every line in it.
    pub fn set_cage_radius(&mut self, radius: Real) {
        self.radius = radius;
        for line in &mut self.lines {
            line.set_radius(radius);
        }
    }

    pub const fn attenuation(&self) -> Attenuation {
        self.attenuation
    }

    /// Set the default attenuation for lines inserted from now on.
    pub fn set_attenuation(&mut self, attenuation: Attenuation) {
        self.attenuation = attenuation;
    }

    /// Set the attenuation of the cage and of every line in it.
    pub fn set_cage_attenuation(&mut self, attenuation: Attenuation) {
        self.attenuation = attenuation;
        for line in &mut self.lines {
            line.set_attenuation(attenuation);
        }
    }

    pub fn set_color(&mut self, color: Color) {
        for line in &mut self.lines {
            line.set_color(color);
        }
    }

    pub const fn pre_filter(&self) -> bool {
        self.pre_filter
    }

    pub fn set_pre_filter(&mut self, pre_filter: bool) {
        self.pre_filter = pre_filter;
    }

    pub const fn bounding_box(&self) -> Aabb {
        self.bounding_box
    }

    /// Bounding box as `[xmin, xmax, ymin, ymax, zmin, zmax]`.
    pub fn bbox_array(&self) -> [Real; 6] {
        math::aabb_to_array(&self.bounding_box)
    }

    pub const fn center(&self) -> Point3<Real> {
        self.center
    }

    pub const fn scale(&self) -> Vector3<Real> {
        self.scale
    }

    /// Normal of the light plane.
    pub fn cage_normal(&self) -> Vector3<Real> {
        Vector3::z()
    }

    /// Height of the light plane: half the box height above the top face.
    pub fn light_plane_height(&self) -> Real {
        self.bounding_box.maxs.z + self.scale.z
    }

    /// Highlight values, one per line in insertion order.
    ///
    /// The sequence is lazy and recomputed from the current lines on every call.
    pub fn highlight_values<'a>(
        &'a self,
        point: &'a Point3<Real>,
        normal: &'a Vector3<Real>,
    ) -> impl Iterator<Item = Real> + 'a {
        self.lines.iter().map(move |line| line.highlight_value(point, normal))
    }

    /// Reflection values, one per line in insertion order.
    pub fn reflection_values<'a>(
        &'a self,
        point: &'a Point3<Real>,
        normal: &'a Vector3<Real>,
        eye: &'a Point3<Real>,
    ) -> impl Iterator<Item = Real> + 'a {
        self.lines
            .iter()
            .map(move |line| line.reflection_value(point, normal, eye))
    }

    /// Isophote value of the first line's direction, `None` for an empty cage.
    pub fn isophote_value(&self, normal: &Vector3<Real>) -> Option<Real> {
        self.lines.first().map(|line| line.direction().dot(normal))
    }

    /// Luminance for a lookup ray in texture space `[-1, 1]^3`.
    ///
    /// The ray is scaled into the bounding box and cast from its center. The
    /// first line with a non-zero luminance wins; overlapping bands are not
    /// blended.
    pub fn luminance(&self, ray: &Vector3<Real>) -> Real {
        let world_ray = ray.component_mul(&self.scale);
        let Some(direction) = world_ray.try_normalize(Real::EPSILON) else {
            return 0.0;
        };
        first_hit(self.lines.iter().map(|line| line.luminance(&self.center, &direction)))
    }

    /// Luminance at `(u, v)` in the light plane.
    ///
    /// Parallel cages only read the coordinate of their lookup axis, criss-cross
    /// cages use the planar distance to every line. First non-zero line wins.
    pub fn luminance_in_plane(&self, u: Real, v: Real) -> Real {
        match self.layout {
            CageLayout::TopParallel { lookup_axis } => {
                let coordinate = match lookup_axis {
                    LookupAxis::X => u,
                    LookupAxis::Y => v,
                };
                first_hit(
                    self.lines
                        .iter()
                        .map(|line| line.luminance_along(lookup_axis.axis(), coordinate)),
                )
            },
            CageLayout::TopCrissCross => {
                first_hit(self.lines.iter().map(|line| line.luminance_in_plane(u, v)))
            },
        }
    }

    /// Luminance texture of the cage, honoring the cage's pre-filter flag.
    pub fn compute_texture(&self, size: usize) -> LuminanceImage {
        self.compute_texture_with(size, self.pre_filter)
    }

    /// Sample the light plane across the bounding box: a `size` texel 1-D
    /// image for parallel cages, `size × size` for criss-cross cages.
    ///
    /// With `pre_filter` the plane is sampled at four times the resolution and
    /// reduced with the fixed filter kernel.
    pub fn compute_texture_with(&self, size: usize, pre_filter: bool) -> LuminanceImage {
        let samples = if pre_filter { SUPERSAMPLING * size } else { size };
        let [xmin, xmax, ymin, ymax, _, _] = self.bbox_array();

        let image = match self.layout {
            CageLayout::TopParallel { lookup_axis } => {
                let (min, max) = match lookup_axis {
                    LookupAxis::X => (xmin, xmax),
                    LookupAxis::Y => (ymin, ymax),
                };
                let data = texel_centers(min, max, samples)
                    .map(|c| {
                        first_hit(self.lines.iter().map(|line| line.luminance_along(lookup_axis.axis(), c)))
                    })
                    .collect();
                let image = LuminanceImage::from_data(samples, 1, data);
                if pre_filter {
                    texture::prefilter_1d(&image, size)
                } else {
                    image
                }
            },
            CageLayout::TopCrissCross => {
                let us: Vec<Real> = texel_centers(xmin, xmax, samples).collect();
                let vs: Vec<Real> = texel_centers(ymin, ymax, samples).collect();
                let mut data = Vec::with_capacity(samples * samples);
                for &v in &vs {
                    for &u in &us {
                        data.push(self.luminance_in_plane(u, v));
                    }
                }
                let image = LuminanceImage::from_data(samples, samples, data);
                if pre_filter {
                    texture::prefilter_2d(&image, size)
                } else {
                    image
                }
            },
        };

        log::debug!(
            "synthesized {}x{} cage texture from {} lines (pre-filter: {})",
            image.width(),
            image.height(),
            self.lines.len(),
            pre_filter
        );
        image
    }

    /// Texture coordinate for the line through `point` along `direction`,
    /// taken where it meets the light plane.
    ///
    /// Parallel cages give `(t, 0.5)`, criss-cross cages `(s, t)`, both
    /// normalized to the bounding box and not clamped. `None` when the line
    /// runs parallel to the light plane.
    pub fn texture_coordinate(&self, point: &Point3<Real>, direction: &Vector3<Real>) -> Option<Point2<Real>> {
        if direction.z.abs() <= PLANE_EPSILON {
            return None;
        }
        let lambda = (self.light_plane_height() - point.z) / direction.z;
        let hit = point + direction * lambda;
        let [xmin, xmax, ymin, ymax, _, _] = self.bbox_array();

        Some(match self.layout {
            CageLayout::TopParallel { lookup_axis } => {
                let t = match lookup_axis {
                    LookupAxis::X => normalize_into(hit.x, xmin, xmax),
                    LookupAxis::Y => normalize_into(hit.y, ymin, ymax),
                };
                Point2::new(t, 0.5)
            },
            CageLayout::TopCrissCross => {
                Point2::new(normalize_into(hit.x, xmin, xmax), normalize_into(hit.y, ymin, ymax))
            },
        })
    }
}

impl Transform for LightCage {
    fn translate(&mut self, x: Real, y: Real, z: Real) {
        for line in &mut self.lines {
            line.translate(x, y, z);
        }
        let offset = Vector3::new(x, y, z);
        self.bounding_box = Aabb::new(self.bounding_box.mins + offset, self.bounding_box.maxs + offset);
        // the scale is not affected
        self.center += offset;
    }

    /// Rotates every line's direction, and the bounding box by its two
    /// opposite corners about the origin. See [`math::rotate_corners`] for the
    /// drift this causes under oblique rotations.
    fn rotate_axis(&mut self, axis: Axis, degrees: Real) {
        for line in &mut self.lines {
            line.rotate_axis(axis, degrees);
        }
        self.bounding_box = math::rotate_corners(&self.bounding_box, axis, degrees);
        self.center = math::lerp(&self.bounding_box.mins, &self.bounding_box.maxs, 0.5);
    }
}

/// First non-zero value, 0.0 if there is none.
fn first_hit(mut values: impl Iterator<Item = Real>) -> Real {
    values.find(|&v| v != 0.0).unwrap_or(0.0)
}

/// Centers of `count` equal cells covering `[min, max]`.
fn texel_centers(min: Real, max: Real, count: usize) -> impl Iterator<Item = Real> {
    let h = if count > 0 { (max - min) / count as Real } else { 0.0 };
    (0..count).map(move |i| min + (i as Real + 0.5) * h)
}

/// Position of `value` in `[min, max]` as a fraction; 0.5 for a flat extent.
fn normalize_into(value: Real, min: Real, max: Real) -> Real {
    let extent = max - min;
    if extent.abs() <= tolerance() {
        0.5
    } else {
        (value - min) / extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT_BOX: [Real; 6] = [-1.0, 1.0, -1.0, 1.0, -1.0, 1.0];

    #[test]
    fn parallel_cage_spreads_lines_across_box() {
        let cage = LightCage::top_parallel(UNIT_BOX, LineOrientation::AlongY, 3);
        let xs: Vec<Real> = cage.iter().map(|l| l.point().x).collect();
        assert_eq!(xs, vec![-1.0, 0.0, 1.0]);
        for line in cage.iter() {
            assert_eq!(line.point().z, 2.0);
            assert_eq!(line.direction(), Vector3::y());
            assert_eq!(line.length(), 2.0);
        }
        assert_eq!(cage.lookup_axis(), Some(LookupAxis::X));
    }

    #[test]
    fn single_line_is_centered() {
        let cage = LightCage::top_parallel([0.0, 4.0, 0.0, 2.0, 0.0, 2.0], LineOrientation::AlongX, 1);
        assert_eq!(cage.len(), 1);
        assert_eq!(cage.lines()[0].point(), Point3::new(0.0, 1.0, 3.0));
        assert_eq!(cage.lookup_axis(), Some(LookupAxis::Y));
    }

    #[test]
    fn criss_cross_holds_both_bundles() {
        let cage = LightCage::top_criss_cross(UNIT_BOX, 2, 3);
        assert_eq!(cage.len(), 5);
        assert_eq!(cage.lookup_axis(), None);
        assert_eq!(cage.lines()[0].direction(), Vector3::y());
        assert_eq!(cage.lines()[4].direction(), Vector3::x());
    }

    #[test]
    fn push_back_applies_cage_defaults() {
        let mut cage = LightCage::default();
        cage.set_radius(0.3);
        cage.set_attenuation(Attenuation::Quadratic);
        cage.push_back(LightLine::default().with_radius(5.0).with_attenuation(Attenuation::Linear));
        assert_eq!(cage.lines()[0].radius(), 0.3);
        assert_eq!(cage.lines()[0].attenuation(), Attenuation::Quadratic);

        // escape hatch
        cage.lines_mut()[0].set_radius(0.7);
        assert_eq!(cage.lines()[0].radius(), 0.7);
    }

    #[test]
    fn defaults_only_touch_new_lines_but_cage_setters_touch_all() {
        let mut cage = LightCage::top_parallel(UNIT_BOX, LineOrientation::AlongY, 2);
        cage.set_radius(0.5);
        assert!(cage.iter().all(|l| l.radius() == 0.0));
        cage.set_cage_radius(0.25);
        cage.set_cage_attenuation(Attenuation::Polynomial);
        assert!(cage.iter().all(|l| l.radius() == 0.25));
        assert!(cage.iter().all(|l| l.attenuation() == Attenuation::Polynomial));
    }

    #[test]
    fn translate_moves_box_and_center() {
        let mut cage = LightCage::top_parallel(UNIT_BOX, LineOrientation::AlongY, 1);
        cage.translate(1.0, 2.0, 3.0);
        assert_eq!(cage.center(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(cage.bbox_array(), [0.0, 2.0, 1.0, 3.0, 2.0, 4.0]);
        assert_eq!(cage.scale(), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(cage.lines()[0].point(), Point3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn quarter_turn_rotates_corners() {
        let mut cage = LightCage::new([0.0, 2.0, 0.0, 4.0, 0.0, 1.0], CageLayout::TopCrissCross);
        cage.rotate_z(90.0);
        let b = cage.bbox_array();
        // (0,0,0) stays, (2,4,1) goes to (-4,2,1)
        assert!(b[0].abs() < 1e-5 && (b[1] + 4.0).abs() < 1e-5);
        assert!(b[2].abs() < 1e-5 && (b[3] - 2.0).abs() < 1e-5);
        assert!((cage.center() - Point3::new(-2.0, 1.0, 0.5)).norm() < 1e-5);
    }

    #[test]
    fn texel_centers_cover_range() {
        let c: Vec<Real> = texel_centers(0.0, 1.0, 4).collect();
        assert_eq!(c, vec![0.125, 0.375, 0.625, 0.875]);
    }

    #[test]
    fn texture_coordinate_for_parallel_cage() {
        let cage = LightCage::top_parallel(UNIT_BOX, LineOrientation::AlongY, 1);
        let tc = cage
            .texture_coordinate(&Point3::new(0.5, 0.0, 0.0), &Vector3::z())
            .unwrap();
        assert!((tc.x - 0.75).abs() < 1e-9);
        assert_eq!(tc.y, 0.5);
        assert!(cage.texture_coordinate(&Point3::origin(), &Vector3::x()).is_none());
    }
}
