use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrammarError {
  #[error("invalid marker '{marker}': {reason}")]
  InvalidMarker { marker: String, reason: &'static str },

  #[error("failed to compile grammar: {0}")]
  Pattern(#[from] regex::Error),
}
