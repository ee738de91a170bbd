//! Interactive **surface interrogation**: highlight lines, reflection lines and
//! isophotes on triangulated surfaces.
//!
//! A surface ([`InterrogationObject`]) is lit by virtual light sources, either a
//! [`LightCage`] of light lines and cylinders in a plane above the object, or a
//! parallel [`LightVector`]. Each light defines a scalar field over the surface
//! whose isocontours reveal the surface's differential quality. The same fields
//! can be encoded as 1-D/2-D luminance textures plus per-point texture
//! coordinates.
//!
//! ```no_run
//! use surface_interrogation::{HighlightLines, InterrogationObject, LightCage, LineOrientation};
//!
//! let object = InterrogationObject::height_field(2.0, 2.0, 32, 32, |x, y| 0.2 * (x * x - y * y));
//! let mut cage = LightCage::top_parallel(object.bbox(), LineOrientation::AlongY, 5);
//! cage.set_cage_radius(0.1);
//!
//! let mut lines = HighlightLines::default();
//! lines.compute(&object, &cage);
//! for polyline in lines.polylines() {
//!     println!("{} points", polyline.len());
//! }
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **image-io**: export luminance textures as grey images
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to evaluate scalar fields and texture coordinates

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod contour;
pub mod errors;
pub mod float_types;
pub mod interrogation;
pub mod light;
pub mod math;
pub mod object;
pub mod texture;
pub mod traits;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use contour::Polyline;
pub use errors::InterrogationError;
pub use interrogation::{
    HighlightLines, InterrogationLines, InterrogationSettings, Isophotes, ReflectionLines, ScalarField,
};
pub use light::{Attenuation, CageLayout, LightCage, LightLine, LightVector, LineOrientation, LookupAxis};
pub use object::InterrogationObject;
pub use texture::LuminanceImage;
pub use traits::Transform;
