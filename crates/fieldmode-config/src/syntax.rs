use serde::{Deserialize, Serialize};

/// Marker used by the classic configuration surfaces.
pub const DEFAULT_MARKER: &str = "{input}";

/// Marker used by the newer configuration surfaces.
pub const ANGLE_PLUS_MARKER: &str = "<+input>";

/// Token syntax that marks an interpolated expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
  /// `${...}`
  #[default]
  DollarBrace,
  /// `<+...>`
  AnglePlus,
}

impl Interpolation {
  pub fn open(&self) -> &'static str {
    match self {
      Interpolation::DollarBrace => "${",
      Interpolation::AnglePlus => "<+",
    }
  }

  pub fn close(&self) -> &'static str {
    match self {
      Interpolation::DollarBrace => "}",
      Interpolation::AnglePlus => ">",
    }
  }
}

/// What to do when a runtime expression repeats a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateClauses {
  /// The last occurrence of a clause is the one that counts.
  #[default]
  LastWins,
  /// Repeating a clause makes the expression invalid.
  Reject,
}

/// Tokens recognized by the grammar.
///
/// Loaded from JSON; every field is optional and falls back to the classic
/// `{input}` / `${...}` conventions.
///
/// ```json
/// { "marker": "<+input>", "interpolation": "angle_plus", "duplicates": "reject" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxConfig {
  pub marker: String,
  pub interpolation: Interpolation,
  pub duplicates: DuplicateClauses,
}

impl SyntaxConfig {
  /// The `<+input>` marker with `<+...>` expressions.
  pub fn angle_plus() -> Self {
    Self {
      marker: ANGLE_PLUS_MARKER.to_string(),
      interpolation: Interpolation::AnglePlus,
      duplicates: DuplicateClauses::LastWins,
    }
  }

  pub fn with_duplicates(mut self, duplicates: DuplicateClauses) -> Self {
    self.duplicates = duplicates;
    self
  }
}

impl Default for SyntaxConfig {
  fn default() -> Self {
    Self {
      marker: DEFAULT_MARKER.to_string(),
      interpolation: Interpolation::DollarBrace,
      duplicates: DuplicateClauses::LastWins,
    }
  }
}
