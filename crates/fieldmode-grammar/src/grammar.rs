use std::sync::LazyLock;

use fieldmode_config::{DuplicateClauses, Interpolation, Mode, SyntaxConfig};
use regex::Regex;

use crate::clause::{Clause, ClauseKind};
use crate::error::GrammarError;

/// Any single clause. Payloads stop at the first `)`.
const CLAUSE: &str =
  r"\.(?:allowedValues\([^)]*\)|regex\([^)]*\)|isRequired\(\)|default\([^)]*\))";

/// Same language as [`CLAUSE`], capturing name and payload.
const CLAUSE_CAPTURE: &str = r"\.(?:(allowedValues|regex|default)\(([^)]*)\)|(isRequired)\(\))";

static STANDARD: LazyLock<Grammar> = LazyLock::new(|| {
  Grammar::new(&SyntaxConfig::default()).expect("default syntax config always compiles")
});

/// Classify a raw field value using the default `{input}` / `${...}` syntax.
pub fn classify(raw: &str) -> Mode {
  STANDARD.classify(raw)
}

/// Compiled form of a [`SyntaxConfig`].
///
/// Immutable once built; every method is a pure function of its input.
#[derive(Debug, Clone)]
pub struct Grammar {
  marker: String,
  interpolation: Interpolation,
  duplicates: DuplicateClauses,
  expression: Regex,
  clause: Regex,
  token: Regex,
}

impl Grammar {
  pub fn new(config: &SyntaxConfig) -> Result<Self, GrammarError> {
    let marker = config.marker.as_str();
    if marker.is_empty() {
      return Err(GrammarError::InvalidMarker {
        marker: marker.to_string(),
        reason: "marker must not be empty",
      });
    }
    if marker.chars().any(char::is_whitespace) {
      return Err(GrammarError::InvalidMarker {
        marker: marker.to_string(),
        reason: "marker must not contain whitespace",
      });
    }

    let expression = Regex::new(&format!("^{}(?:{})*$", regex::escape(marker), CLAUSE))?;
    let clause = Regex::new(CLAUSE_CAPTURE)?;
    let token = match config.interpolation {
      Interpolation::DollarBrace => Regex::new(r"\$\{[^{}]+\}")?,
      Interpolation::AnglePlus => Regex::new(r"<\+[^<>]+>")?,
    };

    Ok(Self {
      marker: marker.to_string(),
      interpolation: config.interpolation,
      duplicates: config.duplicates,
      expression,
      clause,
      token,
    })
  }

  /// The grammar for the default syntax, shared across callers.
  pub fn standard() -> &'static Grammar {
    &STANDARD
  }

  pub fn marker(&self) -> &str {
    &self.marker
  }

  pub fn interpolation(&self) -> Interpolation {
    self.interpolation
  }

  pub fn duplicates(&self) -> DuplicateClauses {
    self.duplicates
  }

  /// Decide which mode a raw value is in. First match wins:
  /// marker prefix, then interpolation token, then fixed.
  pub fn classify(&self, raw: &str) -> Mode {
    if self.is_runtime(raw) {
      Mode::Runtime
    } else if self.has_interpolation(raw) {
      Mode::Expression
    } else {
      Mode::Fixed
    }
  }

  /// Whether the value starts with the marker. A marker anywhere else does not count.
  pub fn is_runtime(&self, raw: &str) -> bool {
    raw.starts_with(self.marker.as_str())
  }

  pub fn has_interpolation(&self, raw: &str) -> bool {
    self.token.is_match(raw)
  }

  /// Whether the clauses of a runtime expression hold an interpolation token.
  ///
  /// The marker itself is skipped, since `<+input>` is also a valid `<+...>` token.
  pub fn is_advanced(&self, raw: &str) -> bool {
    let body = raw.strip_prefix(self.marker.as_str()).unwrap_or(raw);
    self.has_interpolation(body)
  }

  /// Structural match against the anchored grammar, ignoring duplicate rules.
  pub fn matches(&self, raw: &str) -> bool {
    self.expression.is_match(raw)
  }

  /// The validity predicate: a structural match that, in
  /// [`DuplicateClauses::Reject`] mode, also repeats no clause.
  pub fn is_valid(&self, raw: &str) -> bool {
    if !self.matches(raw) {
      return false;
    }
    match self.duplicates {
      DuplicateClauses::LastWins => true,
      DuplicateClauses::Reject => self.duplicate_clause(raw).is_none(),
    }
  }

  /// Clauses in the order they appear, or `None` if `raw` does not match.
  pub fn clauses<'a>(&self, raw: &'a str) -> Option<impl Iterator<Item = Clause<'a>>> {
    if !self.matches(raw) {
      return None;
    }
    let body = raw.strip_prefix(self.marker.as_str())?;

    Some(self.clause.captures_iter(body).filter_map(|caps| {
      if caps.get(3).is_some() {
        return Some(Clause::Required);
      }
      let payload = caps.get(2)?.as_str();
      match ClauseKind::from_name(caps.get(1)?.as_str())? {
        ClauseKind::AllowedValues => Some(Clause::AllowedValues(payload)),
        ClauseKind::Regex => Some(Clause::Regex(payload)),
        ClauseKind::Default => Some(Clause::Default(payload)),
        ClauseKind::Required => None,
      }
    }))
  }

  /// The first clause kind that appears more than once, regardless of mode.
  pub fn duplicate_clause(&self, raw: &str) -> Option<ClauseKind> {
    let mut seen = [false; 4];
    for clause in self.clauses(raw)? {
      let kind = clause.kind();
      if std::mem::replace(&mut seen[kind.index()], true) {
        return Some(kind);
      }
    }
    None
  }
}
