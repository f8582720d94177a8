//! Fieldmode Config
//!
//! This crate contains the serializable types shared by every fieldmode crate.
//! A configurable field is persisted as one opaque string; these types describe
//! what that string means once it has been classified and, for runtime inputs,
//! decoded.
//!
//! - [`Mode`] is the three-way classification of a raw field value.
//! - [`RuntimeInputSpec`] holds the constraints of a runtime input.
//! - [`FieldValue`] is the classified value itself.
//! - [`SyntaxConfig`] selects the marker and interpolation tokens the grammar
//!   recognizes.

mod field;
mod mode;
mod spec;
mod syntax;

pub use field::FieldValue;
pub use mode::Mode;
pub use spec::{RuntimeInputSpec, Validation};
pub use syntax::{ANGLE_PLUS_MARKER, DEFAULT_MARKER, DuplicateClauses, Interpolation, SyntaxConfig};
