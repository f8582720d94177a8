use serde::{Deserialize, Serialize};

/// Constraint placed on the value an operator may supply.
///
/// Allowed values and a regex pattern are mutually exclusive: a runtime input
/// carries at most one of them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Validation {
  #[default]
  None,
  /// The value must be one of these, in display order. Never empty.
  AllowedValues { values: Vec<String> },
  /// The value must match this pattern. Never empty.
  Regex { pattern: String },
}

impl Validation {
  pub fn allowed_values<I, S>(values: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Validation::AllowedValues {
      values: values.into_iter().map(Into::into).collect(),
    }
  }

  pub fn regex(pattern: impl Into<String>) -> Self {
    Validation::Regex {
      pattern: pattern.into(),
    }
  }

  pub fn is_none(&self) -> bool {
    matches!(self, Validation::None)
  }
}

/// Constraints of a runtime input, decoded from its expression string.
///
/// Only meaningful while the owning field is in [`Mode::Runtime`](crate::Mode).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuntimeInputSpec {
  #[serde(default)]
  pub validation: Validation,

  /// Whether execution must wait for the operator to supply a value.
  #[serde(default)]
  pub required: bool,

  /// Value pre-filled for the operator. An empty string means no default.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub default: Option<String>,
}

impl RuntimeInputSpec {
  pub fn new(validation: Validation, required: bool, default: Option<String>) -> Self {
    Self {
      validation,
      required,
      default,
    }
  }

  /// The default value, treating an empty string as absent.
  pub fn default_value(&self) -> Option<&str> {
    self.default.as_deref().filter(|value| !value.is_empty())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_default_value_ignores_empty() {
    let spec = RuntimeInputSpec::new(Validation::None, false, Some(String::new()));
    assert_eq!(spec.default_value(), None);

    let spec = RuntimeInputSpec::new(Validation::None, false, Some("a".to_string()));
    assert_eq!(spec.default_value(), Some("a"));
  }

  #[test]
  fn test_spec_json_shape() {
    let spec = RuntimeInputSpec::new(
      Validation::allowed_values(["a", "b"]),
      true,
      Some("a".to_string()),
    );
    let value = serde_json::to_value(&spec).unwrap();
    assert_eq!(
      value,
      json!({
        "validation": { "type": "allowed_values", "values": ["a", "b"] },
        "required": true,
        "default": "a"
      })
    );
  }

  #[test]
  fn test_spec_deserialize_defaults() {
    let spec: RuntimeInputSpec = serde_json::from_str("{}").unwrap();
    assert_eq!(spec, RuntimeInputSpec::default());

    let spec: RuntimeInputSpec =
      serde_json::from_str(r#"{"validation": {"type": "regex", "pattern": "^[0-9]+$"}}"#).unwrap();
    assert_eq!(spec.validation, Validation::regex("^[0-9]+$"));
    assert!(!spec.required);
  }
}
