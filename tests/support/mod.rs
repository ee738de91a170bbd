//! Test support library
//! Provides fixture surfaces, fixture cages and tolerance helpers for tests.

#![allow(dead_code)]

use nalgebra::{Point3, Vector3};
use surface_interrogation::{
    InterrogationObject, LightCage, LightLine,
    float_types::Real,
    light::{Attenuation, CageLayout},
};

/// Bounding box `[-1, 1]^3`.
pub const UNIT_BOX: [Real; 6] = [-1.0, 1.0, -1.0, 1.0, -1.0, 1.0];

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Flat quad of side 2 at z = 0 with normals `+z`.
pub fn flat_quad() -> InterrogationObject {
    InterrogationObject::quad(2.0)
}

/// Bump `z = 0.5 exp(-4 (x² + y²))` over `[-1, 1]²`.
pub fn bump(segments: usize) -> InterrogationObject {
    InterrogationObject::height_field(2.0, 2.0, segments, segments, |x, y| {
        0.5 * (-4.0 * (x * x + y * y)).exp()
    })
}

/// Tilted plane `z = 0.5 x` over `[-1, 1]²`.
pub fn tilted_plane(segments: usize) -> InterrogationObject {
    InterrogationObject::height_field(2.0, 2.0, segments, segments, |x, _| 0.5 * x)
}

/// Parallel cage over the unit box with two lines along y at `x = a` and `x = b`.
pub fn two_line_cage(a: Real, b: Real, radius: Real) -> LightCage {
    let mut cage = LightCage::new(UNIT_BOX, CageLayout::default());
    cage.set_radius(radius);
    cage.set_attenuation(Attenuation::Linear);
    cage.push_back(LightLine::new(Point3::new(a, -1.0, 2.0), Vector3::y()));
    cage.push_back(LightLine::new(Point3::new(b, -1.0, 2.0), Vector3::y()));
    cage
}
