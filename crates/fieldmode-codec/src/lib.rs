//! Fieldmode Codec
//!
//! Converts between the textual runtime input expression persisted in a
//! configuration document and the structured [`RuntimeInputSpec`] an editor
//! works with.
//!
//! | Raw string | Decoded spec |
//! |---|---|
//! | `{input}` | no validation, optional, no default |
//! | `{input}.isRequired()` | no validation, required |
//! | `{input}.allowedValues(a,b,c)` | allowed values `[a, b, c]` |
//! | `{input}.regex(^[0-9]+$)` | pattern `^[0-9]+$` |
//! | `{input}.allowedValues(a,b,c).isRequired().default(a)` | allowed values, required, default `a` |
//!
//! Encoding always emits clauses in canonical order: marker, validation,
//! required, default. Decoding accepts any order.
//!
//! [`RuntimeInputSpec`]: fieldmode_config::RuntimeInputSpec

mod codec;
mod error;

pub use codec::Codec;
pub use error::{ExpressionFault, InvalidExpressionError};
