//! Checks applied before a value enters the working copy.
//!
//! Clause payloads end at the first `)` and allowed values are split on `,`
//! and trimmed, so values breaking those rules would decode differently from
//! how they were entered.

use fieldmode_config::Validation;

use crate::error::PayloadError;

pub fn check_allowed_values(values: &[String]) -> Result<(), PayloadError> {
  if values.is_empty() {
    return Err(PayloadError::Empty {
      field: "allowed values",
    });
  }
  for value in values {
    if value.is_empty() {
      return Err(PayloadError::Empty {
        field: "allowed value",
      });
    }
    if value.contains(')') {
      return Err(PayloadError::ClosingParen {
        field: "allowed value",
      });
    }
    if value.contains(',') {
      return Err(PayloadError::Separator(value.clone()));
    }
    if value.trim() != value {
      return Err(PayloadError::Untrimmed(value.clone()));
    }
  }
  Ok(())
}

pub fn check_pattern(pattern: &str) -> Result<(), PayloadError> {
  if pattern.is_empty() {
    return Err(PayloadError::Empty { field: "regex" });
  }
  if pattern.contains(')') {
    return Err(PayloadError::ClosingParen { field: "regex" });
  }
  Ok(())
}

/// Empty defaults are allowed; they mean "no default".
pub fn check_default(value: &str) -> Result<(), PayloadError> {
  if value.contains(')') {
    return Err(PayloadError::ClosingParen { field: "default" });
  }
  Ok(())
}

pub fn check_validation(validation: &Validation) -> Result<(), PayloadError> {
  match validation {
    Validation::None => Ok(()),
    Validation::AllowedValues { values } => check_allowed_values(values),
    Validation::Regex { pattern } => check_pattern(pattern),
  }
}
