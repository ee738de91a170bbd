//! Construction and parsing errors
//!
//! Steady-state evaluation (scalar fields, contouring, texture synthesis) never
//! fails; only building an [`InterrogationObject`](crate::object::InterrogationObject)
//! or reading a light line record can.

use crate::float_types::Real;
use nalgebra::Point3;

/// All the possible issues we might encounter while building interrogation input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InterrogationError {
    /// (LengthMismatch) Every point needs exactly one normal
    #[error("(LengthMismatch) {points} points but {normals} normals")]
    LengthMismatch { points: usize, normals: usize },
    /// (IndexOutOfRange) A face references a point that does not exist
    #[error("(IndexOutOfRange) face {face} references point {index}, but only {points} points exist")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        points: usize,
    },
    /// (DegenerateFace) A face has fewer than three indices
    #[error("(DegenerateFace) face {0} has fewer than three indices")]
    DegenerateFace(usize),
    /// (InvalidCoordinate) The coordinate has a NaN or infinite
    #[error("(InvalidCoordinate) The coordinate ({0}) has a NaN or infinite")]
    InvalidCoordinate(Point3<Real>),
    /// (Parse) A light line record could not be read
    #[error("(Parse) {0}")]
    Parse(String),
}
