//! Struct and functions for a single light line or light cylinder.

use crate::errors::InterrogationError;
use crate::float_types::Real;
use crate::light::{Color, WHITE};
use crate::math::{self, Axis};
use crate::traits::Transform;
use nalgebra::{Point3, Unit, Vector3};
use std::fmt;
use std::str::FromStr;

/// Falloff of light across the radius of a light cylinder.
///
/// The profile is evaluated on the normalized distance `pd = distance / radius`
/// and is zero outside `|pd| <= 1`. Every profile is 1 on the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Attenuation {
    /// 1
    #[default]
    Constant,
    /// 1 - |pd|
    Linear,
    /// 1 - pd²
    Quadratic,
    /// 1 - pd² (3 - 2|pd|)
    Polynomial,
}

impl Attenuation {
    /// Evaluate the profile at a normalized distance.
    pub fn falloff(self, pd: Real) -> Real {
        let d = pd.abs();
        if d > 1.0 {
            return 0.0;
        }
        match self {
            Attenuation::Constant => 1.0,
            Attenuation::Linear => 1.0 - d,
            Attenuation::Quadratic => 1.0 - d * d,
            Attenuation::Polynomial => 1.0 - d * d * (3.0 - 2.0 * d),
        }
    }
}

/// A directed light line (`radius == 0`) or light cylinder (`radius > 0`).
///
/// The direction is always unit length; every mutator re-normalizes it.
#[derive(Debug, Clone, PartialEq)]
pub struct LightLine {
    point: Point3<Real>,
    direction: Unit<Vector3<Real>>,
    radius: Real,
    attenuation: Attenuation,
    /// Render attributes
    length: Real,
    color: Color,
    cylinder: bool,
}

impl Default for LightLine {
    /// Line through the origin, parallel to the x-axis.
    fn default() -> Self {
        LightLine {
            point: Point3::origin(),
            direction: Vector3::x_axis(),
            radius: 0.0,
            attenuation: Attenuation::Constant,
            length: 1.0,
            color: WHITE,
            cylinder: false,
        }
    }
}

impl LightLine {
    /// Create a new [`LightLine`] through `point` along `direction`.
    ///
    /// `direction` need not be unit length. A zero direction falls back to the
    /// x-axis.
    pub fn new(point: Point3<Real>, direction: Vector3<Real>) -> Self {
        let mut line = LightLine {
            point,
            ..Default::default()
        };
        line.set_direction(direction);
        line
    }

    pub fn with_radius(mut self, radius: Real) -> Self {
        self.set_radius(radius);
        self
    }

    pub fn with_attenuation(mut self, attenuation: Attenuation) -> Self {
        self.attenuation = attenuation;
        self
    }

    /// Set the length used when the line is drawn.
    pub fn with_length(mut self, length: Real) -> Self {
        self.length = length;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub const fn point(&self) -> Point3<Real> {
        self.point
    }

    pub fn set_point(&mut self, point: Point3<Real>) {
        self.point = point;
    }

    /// Unit direction of the line.
    pub fn direction(&self) -> Vector3<Real> {
        self.direction.into_inner()
    }

    /// Set the direction. Zero or non-finite vectors are rejected and the
    /// current direction is kept.
    pub fn set_direction(&mut self, direction: Vector3<Real>) {
        match math::unit_direction(direction) {
            Some(unit) => self.direction = unit,
            None => log::warn!("ignoring invalid light line direction {:?}", direction),
        }
    }

    pub const fn radius(&self) -> Real {
        self.radius
    }

    /// Negative radii are not meaningful; they are checked in debug builds
    /// only and stored as given otherwise.
    pub fn set_radius(&mut self, radius: Real) {
        debug_assert!(radius >= 0.0, "light line radius must not be negative");
        self.radius = radius;
    }

    pub const fn attenuation(&self) -> Attenuation {
        self.attenuation
    }

    pub fn set_attenuation(&mut self, attenuation: Attenuation) {
        self.attenuation = attenuation;
    }

    pub const fn length(&self) -> Real {
        self.length
    }

    pub fn set_length(&mut self, length: Real) {
        self.length = length;
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Whether a light cylinder should be drawn as a cylinder instead of its axis.
    pub const fn is_cylinder(&self) -> bool {
        self.cylinder
    }

    pub fn set_cylinder(&mut self, cylinder: bool) {
        self.cylinder = cylinder;
    }

    /// Point on the line for parameter `lambda`.
    pub fn point_on_line(&self, lambda: Real) -> Point3<Real> {
        self.point + self.direction.as_ref() * lambda
    }

    /// Start and end point of the drawn segment.
    pub fn render_segment(&self) -> [Point3<Real>; 2] {
        [self.point, self.point_on_line(self.length)]
    }

    /// Signed perpendicular distance between this line and the line through
    /// `sample_point` along `sample_direction`:
    /// `dot(cross(direction, sample_direction), point - sample_point)`.
    ///
    /// `sample_direction` must already be unit length. This is checked in
    /// debug builds only; in release builds the result is scaled by its length.
    pub fn perpendicular_distance(
        &self,
        sample_point: &Point3<Real>,
        sample_direction: &Vector3<Real>,
    ) -> Real {
        debug_assert!(
            (sample_direction.norm_squared() - 1.0).abs() < 1e-3,
            "sample direction must be unit length"
        );
        self.signed_distance(sample_point, sample_direction)
    }

    // Normalization already done by the caller; a zero direction yields 0.
    fn signed_distance(&self, sample_point: &Point3<Real>, sample_direction: &Vector3<Real>) -> Real {
        self.direction
            .cross(sample_direction)
            .dot(&(self.point - sample_point))
    }

    /// Highlight line function: perpendicular distance to the surface normal
    /// line at `surface_point`. The normal is normalized here.
    pub fn highlight_value(&self, surface_point: &Point3<Real>, surface_normal: &Vector3<Real>) -> Real {
        let normal = math::normalize_or_zero(surface_normal);
        self.signed_distance(surface_point, &normal)
    }

    /// Reflection line function: perpendicular distance to the line along the
    /// eye ray mirrored at the surface, `r = 2 (n·(e-p)) n - (e-p)`.
    pub fn reflection_value(
        &self,
        surface_point: &Point3<Real>,
        surface_normal: &Vector3<Real>,
        eye_point: &Point3<Real>,
    ) -> Real {
        let normal = math::normalize_or_zero(surface_normal);
        let reflected = math::normalize_or_zero(&math::reflect(&normal, &(eye_point - surface_point)));
        self.signed_distance(surface_point, &reflected)
    }

    /// Luminance of the light cylinder seen along a lookup line through
    /// `lookup_point` with unit `lookup_direction`.
    pub fn luminance(&self, lookup_point: &Point3<Real>, lookup_direction: &Vector3<Real>) -> Real {
        self.attenuate(self.perpendicular_distance(lookup_point, lookup_direction))
    }

    /// Luminance for an axis-parallel line, looked up by a single coordinate
    /// across the lines: `|point[axis] - coordinate|`.
    pub fn luminance_along(&self, axis: Axis, coordinate: Real) -> Real {
        self.attenuate(self.point[axis.index()] - coordinate)
    }

    /// Luminance at `(u, v)` in the light plane, using the distance from the
    /// orthogonal projection of the line onto the xy-plane.
    pub fn luminance_in_plane(&self, u: Real, v: Real) -> Real {
        let d = self.direction.as_ref();
        let (px, py) = (self.point.x, self.point.y);
        let norm_squared = d.x * d.x + d.y * d.y;

        // A line perpendicular to the plane projects to a single point
        let distance = if norm_squared <= Real::EPSILON {
            ((u - px).powi(2) + (v - py).powi(2)).sqrt()
        } else {
            let lambda = ((u - px) * d.x + (v - py) * d.y) / norm_squared;
            let fx = px + lambda * d.x - u;
            let fy = py + lambda * d.y - v;
            (fx * fx + fy * fy).sqrt()
        };
        self.attenuate(distance)
    }

    /// Apply the attenuation profile to a distance from the axis.
    ///
    /// Needs `radius > 0`: asserted in debug builds, 0.0 in release builds.
    fn attenuate(&self, distance: Real) -> Real {
        debug_assert!(self.radius > 0.0, "luminance requires a light cylinder (radius > 0)");
        if self.radius <= 0.0 {
            return 0.0;
        }
        self.attenuation.falloff(distance / self.radius)
    }

    /// Write the line as a `px py pz dx dy dz radius length` record.
    pub fn to_record(&self) -> String {
        let d = self.direction();
        format!(
            "{} {} {}\n{} {} {}\n{}\n{}",
            self.point.x, self.point.y, self.point.z, d.x, d.y, d.z, self.radius, self.length
        )
    }
}

impl Transform for LightLine {
    /// Translating a line moves its point only.
    fn translate(&mut self, x: Real, y: Real, z: Real) {
        self.point += Vector3::new(x, y, z);
    }

    /// Rotating a line turns its direction only; the point stays put.
    fn rotate_axis(&mut self, axis: Axis, degrees: Real) {
        let rotated = math::rotate_vector(self.direction.as_ref(), axis, degrees);
        self.direction = Unit::new_normalize(rotated);
    }
}

impl FromStr for LightLine {
    type Err = InterrogationError;

    /// Read a whitespace separated record: the point, the direction, then an
    /// optional radius and an optional render length. Attenuation is constant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<Real>()
                    .map_err(|e| InterrogationError::Parse(format!("'{}': {}", token, e)))
            })
            .collect::<Result<Vec<Real>, _>>()?;

        if !(6..=8).contains(&values.len()) {
            return Err(InterrogationError::Parse(format!(
                "expected 6 to 8 values, found {}",
                values.len()
            )));
        }

        let point = Point3::new(values[0], values[1], values[2]);
        let direction = Vector3::new(values[3], values[4], values[5]);
        if !math::is_finite_point(&point) {
            return Err(InterrogationError::InvalidCoordinate(point));
        }
        if !math::is_finite_point(&Point3::from(direction)) {
            return Err(InterrogationError::InvalidCoordinate(Point3::from(direction)));
        }
        let direction = math::unit_direction(direction)
            .ok_or_else(|| InterrogationError::Parse("direction has zero length".to_string()))?;

        let mut line = LightLine {
            point,
            direction,
            ..Default::default()
        };
        if let Some(&radius) = values.get(6) {
            if radius < 0.0 {
                return Err(InterrogationError::Parse(format!("negative radius {}", radius)));
            }
            line.radius = radius;
        }
        if let Some(&length) = values.get(7) {
            line.length = length;
        }
        Ok(line)
    }
}

impl fmt::Display for LightLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.direction();
        write!(
            f,
            "LightLine(point: ({}, {}, {}), direction: ({}, {}, {}), radius: {}, {:?})",
            self.point.x, self.point.y, self.point.z, d.x, d.y, d.z, self.radius, self.attenuation
        )
    }
}
