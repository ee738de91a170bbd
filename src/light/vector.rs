//! Parallel light at infinity, the light source for isophotes.

use crate::float_types::Real;
use crate::light::{Color, WHITE};
use crate::math::{self, Axis};
use crate::traits::Transform;
use nalgebra::{Point3, Unit, Vector3};

/// A directional light. Only `direction` influences the isophote function;
/// origin, length and color are used for drawing the vector.
#[derive(Debug, Clone, PartialEq)]
pub struct LightVector {
    direction: Unit<Vector3<Real>>,
    render_origin: Point3<Real>,
    render_length: Real,
    color: Color,
}

impl Default for LightVector {
    /// Light along the z-axis, drawn from the origin with length 1.
    fn default() -> Self {
        LightVector {
            direction: Vector3::z_axis(),
            render_origin: Point3::origin(),
            render_length: 1.0,
            color: WHITE,
        }
    }
}

impl LightVector {
    /// A zero `direction` falls back to the z-axis.
    pub fn new(direction: Vector3<Real>) -> Self {
        let mut light = LightVector::default();
        light.set_direction(direction);
        light
    }

    pub fn with_render_origin(mut self, origin: Point3<Real>) -> Self {
        self.render_origin = origin;
        self
    }

    pub fn with_render_length(mut self, length: Real) -> Self {
        self.render_length = length;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn direction(&self) -> Vector3<Real> {
        self.direction.into_inner()
    }

    /// Set the direction. Zero or non-finite vectors are rejected and the
    /// current direction is kept.
    pub fn set_direction(&mut self, direction: Vector3<Real>) {
        match math::unit_direction(direction) {
            Some(unit) => self.direction = unit,
            None => log::warn!("ignoring invalid light vector direction {:?}", direction),
        }
    }

    pub const fn render_origin(&self) -> Point3<Real> {
        self.render_origin
    }

    pub fn set_render_origin(&mut self, origin: Point3<Real>) {
        self.render_origin = origin;
    }

    pub const fn render_length(&self) -> Real {
        self.render_length
    }

    pub fn set_render_length(&mut self, length: Real) {
        self.render_length = length;
    }

    /// End point of the drawn vector.
    pub fn render_end(&self) -> Point3<Real> {
        self.render_origin + self.direction.as_ref() * self.render_length
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Isophote function: cosine between the light direction and the surface
    /// normal. The normal is expected to be unit length.
    pub fn isophote_value(&self, surface_normal: &Vector3<Real>) -> Real {
        self.direction.dot(surface_normal)
    }
}

impl Transform for LightVector {
    /// Moves the drawn vector only; the light is at infinity.
    fn translate(&mut self, x: Real, y: Real, z: Real) {
        self.render_origin += Vector3::new(x, y, z);
    }

    fn rotate_axis(&mut self, axis: Axis, degrees: Real) {
        let rotated = math::rotate_vector(self.direction.as_ref(), axis, degrees);
        self.direction = Unit::new_normalize(rotated);
    }
}
