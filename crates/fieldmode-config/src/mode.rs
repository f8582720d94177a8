use std::fmt;

use serde::{Deserialize, Serialize};

/// How a configurable field gets its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
  /// A literal, used as-is.
  Fixed,
  /// Contains interpolation tokens resolved at a later stage.
  Expression,
  /// Supplied by the operator at execution time.
  Runtime,
}

impl Mode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Mode::Fixed => "fixed",
      Mode::Expression => "expression",
      Mode::Runtime => "runtime",
    }
  }
}

impl fmt::Display for Mode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_mode_serde_names() {
    assert_eq!(serde_json::to_string(&Mode::Runtime).unwrap(), "\"runtime\"");
    let mode: Mode = serde_json::from_str("\"expression\"").unwrap();
    assert_eq!(mode, Mode::Expression);
  }

  #[test]
  fn test_mode_display() {
    assert_eq!(Mode::Fixed.to_string(), "fixed");
  }
}
