//! Isophotes: curves of constant Lambertian intensity.

use super::{InterrogationSettings, ScalarField};
use crate::float_types::Real;
use crate::light::LightVector;
use crate::math;
use crate::texture::{self, LuminanceImage};
use nalgebra::{Point2, Point3, Vector3};

/// Cosine between the normal and a parallel light, in a single pass.
/// Bands always span `[-1, 1]`; the radius is not used.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Isophote;

impl Isophote {
    fn cosine(light: &LightVector, normal: &Vector3<Real>) -> Real {
        light.isophote_value(&math::normalize_or_zero(normal))
    }
}

impl ScalarField for Isophote {
    type Light = LightVector;

    fn passes(&self, _light: &LightVector) -> usize {
        1
    }

    fn scalar(&self, light: &LightVector, _pass: usize, _point: &Point3<Real>, normal: &Vector3<Real>) -> Real {
        Self::cosine(light, normal)
    }

    fn band_range(&self, _radius: Real) -> Option<(Real, Real)> {
        Some((-1.0, 1.0))
    }

    /// The cosine remapped to `[0, 1]`, always mappable.
    fn texture_coordinate(
        &self,
        light: &LightVector,
        _point: &Point3<Real>,
        normal: &Vector3<Real>,
    ) -> Option<Point2<Real>> {
        Some(Point2::new(0.5 * (Self::cosine(light, normal) + 1.0), 0.5))
    }

    /// Stripes are always drawn at full intensity; `pre_filter` only applies
    /// to cage luminance.
    fn texture(&self, _light: &LightVector, settings: &InterrogationSettings, size: usize) -> LuminanceImage {
        texture::isophote_stripes(size, settings.number_of_lines)
    }
}
