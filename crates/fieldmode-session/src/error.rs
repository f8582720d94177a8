use fieldmode_codec::InvalidExpressionError;
use thiserror::Error;

use crate::session::SessionState;

#[derive(Debug, Error)]
pub enum SessionError {
  /// The field does not hold a decodable runtime expression.
  #[error(transparent)]
  Rejected(#[from] InvalidExpressionError),

  #[error("cannot {action} while the session is {state}")]
  InvalidTransition {
    action: &'static str,
    state: SessionState,
  },

  #[error("field '{0}' not found")]
  MissingField(String),

  #[error(transparent)]
  Payload(#[from] PayloadError),
}

/// A value the expression grammar cannot carry without changing its meaning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
  #[error("{field} must not be empty")]
  Empty { field: &'static str },

  #[error("{field} must not contain ')'")]
  ClosingParen { field: &'static str },

  #[error("allowed value '{0}' must not contain ','")]
  Separator(String),

  #[error("allowed value '{0}' must not have surrounding whitespace")]
  Untrimmed(String),
}
