//! Reflection lines: the mirror image of the light cage seen from an eye point.

use super::{InterrogationLines, InterrogationSettings, ScalarField};
use crate::float_types::Real;
use crate::light::LightCage;
use crate::math;
use crate::texture::LuminanceImage;
use nalgebra::{Point2, Point3, Vector3};

/// Signed distance between one cage line per pass and the eye ray reflected
/// at each point. Recompute after the eye point moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflection {
    pub eye_point: Point3<Real>,
}

impl Default for Reflection {
    /// Eye at the origin.
    fn default() -> Self {
        Reflection::new(Point3::origin())
    }
}

impl Reflection {
    pub fn new(eye_point: Point3<Real>) -> Self {
        Reflection { eye_point }
    }

    /// Unit reflection of the direction to the eye, zero if degenerate.
    fn reflected(&self, point: &Point3<Real>, normal: &Vector3<Real>) -> Vector3<Real> {
        let normal = math::normalize_or_zero(normal);
        math::normalize_or_zero(&math::reflect(&normal, &(self.eye_point - point)))
    }
}

impl ScalarField for Reflection {
    type Light = LightCage;

    fn passes(&self, cage: &LightCage) -> usize {
        cage.len()
    }

    fn scalar(&self, cage: &LightCage, pass: usize, point: &Point3<Real>, normal: &Vector3<Real>) -> Real {
        cage.lines()
            .get(pass)
            .map_or(0.0, |line| line.reflection_value(point, normal, &self.eye_point))
    }

    fn band_range(&self, radius: Real) -> Option<(Real, Real)> {
        (radius > 0.0).then_some((-radius, radius))
    }

    /// Where the reflected eye ray meets the light plane.
    fn texture_coordinate(
        &self,
        cage: &LightCage,
        point: &Point3<Real>,
        normal: &Vector3<Real>,
    ) -> Option<Point2<Real>> {
        cage.texture_coordinate(point, &self.reflected(point, normal))
    }

    fn texture(&self, cage: &LightCage, settings: &InterrogationSettings, size: usize) -> LuminanceImage {
        cage.compute_texture_with(size, settings.pre_filter || cage.pre_filter())
    }
}

impl InterrogationLines<Reflection> {
    pub fn eye_point(&self) -> Point3<Real> {
        self.field().eye_point
    }

    /// Move the eye, usually to the tracked head position. Computed lines
    /// are not updated.
    pub fn set_eye_point(&mut self, eye_point: Point3<Real>) {
        self.field_mut().eye_point = eye_point;
    }
}
