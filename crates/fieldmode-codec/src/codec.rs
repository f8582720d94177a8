use std::fmt::Write;

use fieldmode_config::{
  DuplicateClauses, FieldValue, Mode, RuntimeInputSpec, SyntaxConfig, Validation,
};
use fieldmode_grammar::{Clause, Grammar, GrammarError};
use tracing::debug;

use crate::error::{ExpressionFault, InvalidExpressionError};

/// Decoder and encoder for runtime input expressions under one syntax.
#[derive(Debug, Clone)]
pub struct Codec {
  grammar: Grammar,
}

impl Codec {
  pub fn new(config: &SyntaxConfig) -> Result<Self, GrammarError> {
    Ok(Self::with_grammar(Grammar::new(config)?))
  }

  pub fn with_grammar(grammar: Grammar) -> Self {
    Self { grammar }
  }

  pub fn grammar(&self) -> &Grammar {
    &self.grammar
  }

  pub fn classify(&self, raw: &str) -> Mode {
    self.grammar.classify(raw)
  }

  /// Check a raw string against the grammar without decoding it.
  pub fn validate(&self, raw: &str) -> bool {
    self.grammar.is_valid(raw)
  }

  /// Whether the expression carries interpolation tokens, in which case a
  /// free-form entry suits it better than structured widgets.
  pub fn is_advanced(&self, raw: &str) -> bool {
    self.grammar.is_advanced(raw)
  }

  /// Decode a runtime input expression.
  ///
  /// Allowed values win over a regex when both are present. For every other
  /// clause the last occurrence wins.
  pub fn decode(&self, raw: &str) -> Result<RuntimeInputSpec, InvalidExpressionError> {
    let Some(clauses) = self.grammar.clauses(raw) else {
      debug!(raw, "rejected runtime expression");
      return Err(InvalidExpressionError::new(raw, ExpressionFault::Malformed));
    };
    if self.grammar.duplicates() == DuplicateClauses::Reject
      && let Some(kind) = self.grammar.duplicate_clause(raw)
    {
      debug!(raw, clause = %kind, "rejected duplicate clause");
      return Err(InvalidExpressionError::new(
        raw,
        ExpressionFault::DuplicateClause(kind),
      ));
    }

    let mut allowed = None;
    let mut pattern = None;
    let mut required = false;
    let mut default = None;

    for clause in clauses {
      match clause {
        Clause::AllowedValues(csv) => allowed = Some(csv),
        Clause::Regex(payload) => pattern = Some(payload),
        Clause::Required => required = true,
        Clause::Default(value) => default = Some(value),
      }
    }

    let values: Vec<String> = allowed
      .map(|csv| {
        csv
          .split(',')
          .map(str::trim)
          .filter(|value| !value.is_empty())
          .map(str::to_string)
          .collect()
      })
      .unwrap_or_default();

    let validation = if !values.is_empty() {
      Validation::AllowedValues { values }
    } else if let Some(pattern) = pattern.filter(|p| !p.is_empty()) {
      Validation::regex(pattern)
    } else {
      Validation::None
    };

    let spec = RuntimeInputSpec {
      validation,
      required,
      default: default.filter(|v| !v.is_empty()).map(str::to_string),
    };
    debug!(raw, ?spec, "decoded runtime expression");
    Ok(spec)
  }

  /// Encode a spec in canonical clause order. Never fails.
  pub fn encode(&self, spec: &RuntimeInputSpec) -> String {
    let mut raw = String::from(self.grammar.marker());

    match &spec.validation {
      Validation::AllowedValues { values } if !values.is_empty() => {
        let _ = write!(raw, ".allowedValues({})", values.join(","));
      }
      Validation::Regex { pattern } if !pattern.is_empty() => {
        let _ = write!(raw, ".regex({pattern})");
      }
      _ => {}
    }
    if spec.required {
      raw.push_str(".isRequired()");
    }
    if let Some(value) = spec.default_value() {
      let _ = write!(raw, ".default({value})");
    }

    debug!(%raw, "encoded runtime expression");
    raw
  }

  /// Classify a raw value and, for runtime inputs, decode it.
  pub fn parse_field(&self, raw: &str) -> Result<FieldValue, InvalidExpressionError> {
    Ok(match self.classify(raw) {
      Mode::Fixed => FieldValue::Fixed(raw.to_string()),
      Mode::Expression => FieldValue::Expression(raw.to_string()),
      Mode::Runtime => FieldValue::Runtime(self.decode(raw)?),
    })
  }

  /// The raw string to persist for a classified value.
  pub fn render_field(&self, value: &FieldValue) -> String {
    match value {
      FieldValue::Fixed(raw) | FieldValue::Expression(raw) => raw.clone(),
      FieldValue::Runtime(spec) => self.encode(spec),
    }
  }
}

impl Default for Codec {
  fn default() -> Self {
    Self::with_grammar(Grammar::standard().clone())
  }
}

#[cfg(test)]
mod tests {
  use fieldmode_grammar::ClauseKind;

  use super::*;

  fn spec(validation: Validation, required: bool, default: Option<&str>) -> RuntimeInputSpec {
    RuntimeInputSpec::new(validation, required, default.map(str::to_string))
  }

  #[test]
  fn test_decode_table() {
    let codec = Codec::default();
    let cases = [
      ("{input}", spec(Validation::None, false, None)),
      ("{input}.isRequired()", spec(Validation::None, true, None)),
      (
        "{input}.allowedValues(a,b,c)",
        spec(Validation::allowed_values(["a", "b", "c"]), false, None),
      ),
      (
        "{input}.regex(^[0-9]+$)",
        spec(Validation::regex("^[0-9]+$"), false, None),
      ),
      (
        "{input}.allowedValues(a,b,c).isRequired().default(a)",
        spec(Validation::allowed_values(["a", "b", "c"]), true, Some("a")),
      ),
    ];
    for (raw, expected) in cases {
      assert_eq!(codec.decode(raw).unwrap(), expected, "decoding {raw}");
    }
  }

  #[test]
  fn test_decode_rejects_non_expression() {
    let codec = Codec::default();
    assert!(!codec.validate("not-an-expression"));
    let err = codec.decode("not-an-expression").unwrap_err();
    assert_eq!(err.fault(), ExpressionFault::Malformed);
    assert_eq!(err.raw(), "not-an-expression");
    assert_eq!(err.to_string(), "not a valid input expression");
  }

  #[test]
  fn test_last_default_wins() {
    let decoded = Codec::default().decode("{input}.default(x).default(y)").unwrap();
    assert_eq!(decoded.default.as_deref(), Some("y"));
  }

  #[test]
  fn test_allowed_values_beat_regex() {
    let codec = Codec::default();
    let decoded = codec.decode("{input}.allowedValues(a,b).isRequired()").unwrap();
    assert_eq!(decoded.validation, Validation::allowed_values(["a", "b"]));

    let decoded = codec.decode("{input}.regex(x).allowedValues(a,b)").unwrap();
    assert_eq!(decoded.validation, Validation::allowed_values(["a", "b"]));
  }

  #[test]
  fn test_allowed_values_are_trimmed() {
    let decoded = Codec::default()
      .decode("{input}.allowedValues( a , b ,,c )")
      .unwrap();
    assert_eq!(decoded.validation, Validation::allowed_values(["a", "b", "c"]));
  }

  #[test]
  fn test_empty_payloads_decode_to_absent() {
    let codec = Codec::default();
    assert_eq!(
      codec.decode("{input}.allowedValues()").unwrap().validation,
      Validation::None
    );
    assert_eq!(codec.decode("{input}.regex()").unwrap().validation, Validation::None);
    assert_eq!(codec.decode("{input}.default()").unwrap().default, None);
    assert_eq!(
      codec.decode("{input}.allowedValues(,).regex(x)").unwrap().validation,
      Validation::regex("x")
    );
  }

  #[test]
  fn test_required_comes_from_clause() {
    let decoded = Codec::default().decode("{input}.default(isRequired()").unwrap();
    assert!(!decoded.required);
    assert_eq!(decoded.default.as_deref(), Some("isRequired("));
  }

  #[test]
  fn test_encode_canonical_order() {
    let codec = Codec::default();
    let decoded = codec
      .decode("{input}.default(a).isRequired().allowedValues(a,b,c)")
      .unwrap();
    assert_eq!(
      codec.encode(&decoded),
      "{input}.allowedValues(a,b,c).isRequired().default(a)"
    );
  }

  #[test]
  fn test_encode_skips_empty_parts() {
    let codec = Codec::default();
    assert_eq!(codec.encode(&spec(Validation::None, false, Some(""))), "{input}");
    assert_eq!(
      codec.encode(&spec(Validation::AllowedValues { values: vec![] }, false, None)),
      "{input}"
    );
    assert_eq!(codec.encode(&spec(Validation::regex(""), true, None)), "{input}.isRequired()");
  }

  #[test]
  fn test_strict_mode_rejects_duplicates() {
    let config = SyntaxConfig::default().with_duplicates(DuplicateClauses::Reject);
    let codec = Codec::new(&config).unwrap();
    let err = codec.decode("{input}.default(x).default(y)").unwrap_err();
    assert_eq!(
      err.fault(),
      ExpressionFault::DuplicateClause(ClauseKind::Default)
    );
    assert!(codec.decode("{input}.isRequired().default(y)").is_ok());
  }

  #[test]
  fn test_is_advanced() {
    let codec = Codec::default();
    assert!(codec.is_advanced("{input}.allowedValues(${regions})"));
    assert!(!codec.is_advanced("{input}.allowedValues(a,b)"));
  }

  #[test]
  fn test_parse_and_render_field() {
    let codec = Codec::default();
    assert_eq!(
      codec.parse_field("30m").unwrap(),
      FieldValue::Fixed("30m".to_string())
    );
    assert_eq!(
      codec.parse_field("${timeout}").unwrap(),
      FieldValue::Expression("${timeout}".to_string())
    );
    let value = codec.parse_field("{input}.isRequired()").unwrap();
    assert_eq!(value, FieldValue::Runtime(spec(Validation::None, true, None)));
    assert_eq!(codec.render_field(&value), "{input}.isRequired()");

    assert!(codec.parse_field("{input}.oops").is_err());
  }

  #[test]
  fn test_angle_plus_codec() {
    let codec = Codec::new(&SyntaxConfig::angle_plus()).unwrap();
    let decoded = codec.decode("<+input>.allowedValues(dev,prod)").unwrap();
    assert_eq!(decoded.validation, Validation::allowed_values(["dev", "prod"]));
    assert_eq!(codec.encode(&decoded), "<+input>.allowedValues(dev,prod)");
  }
}
