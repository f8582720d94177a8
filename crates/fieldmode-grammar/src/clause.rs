use std::fmt;

/// One dot-prefixed fragment of a runtime expression, borrowing its payload
/// from the raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause<'a> {
  /// Comma separated payload, not yet split.
  AllowedValues(&'a str),
  Regex(&'a str),
  Required,
  Default(&'a str),
}

impl<'a> Clause<'a> {
  pub fn kind(&self) -> ClauseKind {
    match self {
      Clause::AllowedValues(_) => ClauseKind::AllowedValues,
      Clause::Regex(_) => ClauseKind::Regex,
      Clause::Required => ClauseKind::Required,
      Clause::Default(_) => ClauseKind::Default,
    }
  }

  pub fn payload(&self) -> Option<&'a str> {
    match self {
      Clause::AllowedValues(payload) | Clause::Regex(payload) | Clause::Default(payload) => {
        Some(payload)
      }
      Clause::Required => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
  AllowedValues,
  Regex,
  Required,
  Default,
}

impl ClauseKind {
  /// Name of the clause as written in an expression.
  pub fn name(&self) -> &'static str {
    match self {
      ClauseKind::AllowedValues => "allowedValues",
      ClauseKind::Regex => "regex",
      ClauseKind::Required => "isRequired",
      ClauseKind::Default => "default",
    }
  }

  pub(crate) fn from_name(name: &str) -> Option<Self> {
    match name {
      "allowedValues" => Some(ClauseKind::AllowedValues),
      "regex" => Some(ClauseKind::Regex),
      "isRequired" => Some(ClauseKind::Required),
      "default" => Some(ClauseKind::Default),
      _ => None,
    }
  }

  pub(crate) fn index(&self) -> usize {
    match self {
      ClauseKind::AllowedValues => 0,
      ClauseKind::Regex => 1,
      ClauseKind::Required => 2,
      ClauseKind::Default => 3,
    }
  }
}

impl fmt::Display for ClauseKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
