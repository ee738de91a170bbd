//! Small vector helpers on top of `nalgebra`.
//!
//! Rotations are given in degrees about the world axes, the unit the
//! interactive controls deliver them in.

use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use nalgebra::{Point3, Rotation3, Unit, Vector3};

/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index of this axis (`x = 0`, `y = 1`, `z = 2`).
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> Unit<Vector3<Real>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

/// Rotation about a world axis by `degrees`.
pub fn axis_rotation(axis: Axis, degrees: Real) -> Rotation3<Real> {
    Rotation3::from_axis_angle(&axis.unit(), degrees.to_radians())
}

/// Rotate a point about a world axis through the origin.
pub fn rotate_point(point: &Point3<Real>, axis: Axis, degrees: Real) -> Point3<Real> {
    axis_rotation(axis, degrees) * point
}

/// Rotate a direction about a world axis.
pub fn rotate_vector(vector: &Vector3<Real>, axis: Axis, degrees: Real) -> Vector3<Real> {
    axis_rotation(axis, degrees) * vector
}

/// Linear interpolation `a + t (b - a)`.
pub fn lerp(a: &Point3<Real>, b: &Point3<Real>, t: Real) -> Point3<Real> {
    a + (b - a) * t
}

/// Mirror `incoming` about `normal`: `2 (n·v) n - v`.
///
/// `normal` is expected to be unit length; `incoming` may have any length and
/// the result keeps it.
pub fn reflect(normal: &Vector3<Real>, incoming: &Vector3<Real>) -> Vector3<Real> {
    normal * (2.0 * normal.dot(incoming)) - incoming
}

/// Normalize, leaving a zero vector untouched instead of producing NaNs.
pub fn normalize_or_zero(vector: &Vector3<Real>) -> Vector3<Real> {
    vector.try_normalize(Real::EPSILON).unwrap_or_else(Vector3::zeros)
}

pub fn is_finite_point(point: &Point3<Real>) -> bool {
    point.coords.iter().all(|c| c.is_finite())
}

/// Unit vector along `direction`, `None` for zero-length or non-finite input.
pub fn unit_direction(direction: Vector3<Real>) -> Option<Unit<Vector3<Real>>> {
    if !direction.iter().all(|c| c.is_finite()) {
        return None;
    }
    Unit::try_new(direction, Real::EPSILON)
}

/// Build an [`Aabb`] from `[xmin, xmax, ymin, ymax, zmin, zmax]`.
pub fn aabb_from_array(bbox: [Real; 6]) -> Aabb {
    Aabb::new(
        Point3::new(bbox[0], bbox[2], bbox[4]),
        Point3::new(bbox[1], bbox[3], bbox[5]),
    )
}

/// Flatten an [`Aabb`] to `[xmin, xmax, ymin, ymax, zmin, zmax]`.
pub fn aabb_to_array(aabb: &Aabb) -> [Real; 6] {
    [
        aabb.mins.x,
        aabb.maxs.x,
        aabb.mins.y,
        aabb.maxs.y,
        aabb.mins.z,
        aabb.maxs.z,
    ]
}

/// Rotate a box by rotating its two opposite corners.
///
/// The result is what the two corners map to, not the bounds of the rotated
/// box: exact for quarter turns, and the "mins" corner can end up with larger
/// coordinates than the "maxs" corner. Repeated oblique rotations drift.
pub fn rotate_corners(aabb: &Aabb, axis: Axis, degrees: Real) -> Aabb {
    Aabb::new(
        rotate_point(&aabb.mins, axis, degrees),
        rotate_point(&aabb.maxs, axis, degrees),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let v = rotate_vector(&Vector3::x(), Axis::Z, 90.0);
        assert!((v - Vector3::y()).norm() < 1e-6);
    }

    #[test]
    fn reflect_keeps_normal_component() {
        let n = Vector3::z();
        let r = reflect(&n, &Vector3::new(1.0, 0.0, 1.0));
        assert!((r - Vector3::new(-1.0, 0.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn aabb_array_round_trip_order() {
        let b = [-1.0, 2.0, -3.0, 4.0, -5.0, 6.0];
        let aabb = aabb_from_array(b);
        assert_eq!(aabb.mins, Point3::new(-1.0, -3.0, -5.0));
        assert_eq!(aabb_to_array(&aabb), b);
    }
}
