use crate::float_types::Real;
use crate::math::Axis;
use nalgebra::{Rotation3, Unit, Vector3};

/// Interactive rigid transformations of light sources.
///
/// Implementors mutate in place; nothing computed from the previous state
/// (contour lines, textures, texture coordinates) is invalidated.
pub trait Transform {
    /// Translate by x, y and z.
    fn translate(&mut self, x: Real, y: Real, z: Real);

    /// Rotate about a world axis by `degrees`.
    fn rotate_axis(&mut self, axis: Axis, degrees: Real);

    /// Translate by a vector.
    fn translate_vector(&mut self, vector: Vector3<Real>) {
        self.translate(vector.x, vector.y, vector.z)
    }

    fn rotate_x(&mut self, degrees: Real) {
        self.rotate_axis(Axis::X, degrees)
    }

    fn rotate_y(&mut self, degrees: Real) {
        self.rotate_axis(Axis::Y, degrees)
    }

    fn rotate_z(&mut self, degrees: Real) {
        self.rotate_axis(Axis::Z, degrees)
    }

    /// Rotates by x_degrees, y_degrees, z_degrees, applied in that order
    fn rotate(&mut self, x_deg: Real, y_deg: Real, z_deg: Real) {
        self.rotate_x(x_deg);
        self.rotate_y(y_deg);
        self.rotate_z(z_deg);
    }

    /// Rotate about an axis through the origin by `degrees`, as the
    /// equivalent x, y, z sequence of world-axis rotations.
    fn rotate_about(&mut self, axis: Unit<Vector3<Real>>, degrees: Real) {
        let rotation = Rotation3::from_axis_angle(&axis, degrees.to_radians());
        let (roll, pitch, yaw) = rotation.euler_angles();
        self.rotate(roll.to_degrees(), pitch.to_degrees(), yaw.to_degrees());
    }
}
