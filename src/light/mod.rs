//! Light sources used to interrogate a surface.
//!
//! - [`LightLine`]: a line or cylinder, the element of a light cage
//! - [`LightVector`]: a parallel light at infinity, used for isophotes
//! - [`LightCage`]: an ordered set of light lines in a plane above the object

pub mod cage;
pub mod line;
pub mod vector;

pub use cage::{CageLayout, LightCage, LineOrientation, LookupAxis};
pub use line::{Attenuation, LightLine};
pub use vector::LightVector;

use crate::float_types::Real;

/// RGB render color, components in `[0, 1]`.
pub type Color = [Real; 3];

pub const WHITE: Color = [1.0, 1.0, 1.0];
pub const RED: Color = [1.0, 0.0, 0.0];
