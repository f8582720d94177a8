//! Classified field values.
//!
//! A field is persisted as a single string inside a larger configuration
//! document. Once classified it is one of:
//!
//! ```text
//! "30m"                                        -> Fixed
//! "${pipeline.variables.timeout}"              -> Expression
//! "{input}.allowedValues(10m,30m).isRequired()" -> Runtime
//! ```

use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::spec::RuntimeInputSpec;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
  Fixed(String),
  /// Raw text holding interpolation tokens. Never evaluated here.
  Expression(String),
  Runtime(RuntimeInputSpec),
}

impl FieldValue {
  pub fn mode(&self) -> Mode {
    match self {
      FieldValue::Fixed(_) => Mode::Fixed,
      FieldValue::Expression(_) => Mode::Expression,
      FieldValue::Runtime(_) => Mode::Runtime,
    }
  }

  pub fn as_runtime(&self) -> Option<&RuntimeInputSpec> {
    match self {
      FieldValue::Runtime(spec) => Some(spec),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_field_value_mode() {
    assert_eq!(FieldValue::Fixed("30m".into()).mode(), Mode::Fixed);
    assert_eq!(FieldValue::Expression("${a}".into()).mode(), Mode::Expression);
    assert_eq!(
      FieldValue::Runtime(RuntimeInputSpec::default()).mode(),
      Mode::Runtime
    );
  }

  #[test]
  fn test_field_value_json_shape() {
    let value = serde_json::to_value(FieldValue::Fixed("30m".into())).unwrap();
    assert_eq!(value, json!({ "mode": "fixed", "value": "30m" }));

    let value = serde_json::to_value(FieldValue::Runtime(RuntimeInputSpec::default())).unwrap();
    assert_eq!(
      value,
      json!({
        "mode": "runtime",
        "value": { "validation": { "type": "none" }, "required": false }
      })
    );
  }
}
