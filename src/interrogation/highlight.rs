//! Highlight lines: where the surface normal line passes a light line.

use super::{InterrogationSettings, ScalarField};
use crate::float_types::Real;
use crate::light::LightCage;
use crate::math;
use crate::texture::LuminanceImage;
use nalgebra::{Point2, Point3, Vector3};

/// Signed distance between the normal line at each point and one cage line
/// per pass. Independent of the viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Highlight;

impl ScalarField for Highlight {
    type Light = LightCage;

    fn passes(&self, cage: &LightCage) -> usize {
        cage.len()
    }

    fn scalar(&self, cage: &LightCage, pass: usize, point: &Point3<Real>, normal: &Vector3<Real>) -> Real {
        cage.lines()
            .get(pass)
            .map_or(0.0, |line| line.highlight_value(point, normal))
    }

    fn band_range(&self, radius: Real) -> Option<(Real, Real)> {
        (radius > 0.0).then_some((-radius, radius))
    }

    /// Where the normal line meets the light plane.
    fn texture_coordinate(
        &self,
        cage: &LightCage,
        point: &Point3<Real>,
        normal: &Vector3<Real>,
    ) -> Option<Point2<Real>> {
        cage.texture_coordinate(point, &math::normalize_or_zero(normal))
    }

    fn texture(&self, cage: &LightCage, settings: &InterrogationSettings, size: usize) -> LuminanceImage {
        cage.compute_texture_with(size, settings.pre_filter || cage.pre_filter())
    }
}
