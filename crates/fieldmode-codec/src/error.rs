use fieldmode_grammar::ClauseKind;
use thiserror::Error;

/// Why a raw string failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionFault {
  /// Does not match the grammar.
  Malformed,
  /// Repeats a clause while duplicates are rejected.
  DuplicateClause(ClauseKind),
}

/// A string claimed to be a runtime input expression but is not one.
///
/// Displays one short message. The raw value and fault are exposed through
/// accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid input expression")]
pub struct InvalidExpressionError {
  raw: String,
  fault: ExpressionFault,
}

impl InvalidExpressionError {
  pub(crate) fn new(raw: &str, fault: ExpressionFault) -> Self {
    Self {
      raw: raw.to_string(),
      fault,
    }
  }

  pub fn raw(&self) -> &str {
    &self.raw
  }

  pub fn fault(&self) -> ExpressionFault {
    self.fault
  }
}
