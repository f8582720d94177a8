//! Fieldmode Grammar
//!
//! The textual grammar of runtime input expressions and the classifier that
//! decides which of the three modes a raw field value is in.
//!
//! ```text
//! expression        := MARKER clause*
//! clause            := "." ( validation_clause | required_clause | default_clause )
//! validation_clause := "allowedValues(" CSV ")" | "regex(" PATTERN ")"
//! required_clause   := "isRequired()"
//! default_clause    := "default(" VALUE ")"
//! ```
//!
//! `MARKER` comes from [`SyntaxConfig`](fieldmode_config::SyntaxConfig), so the
//! same grammar serves `{input}` and `<+input>` conventions. Clause payloads run
//! up to the next `)` and can never contain one.

mod clause;
mod error;
mod grammar;

pub use clause::{Clause, ClauseKind};
pub use error::GrammarError;
pub use grammar::{Grammar, classify};
