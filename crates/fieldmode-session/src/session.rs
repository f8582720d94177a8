use std::fmt;

use fieldmode_codec::Codec;
use fieldmode_config::{RuntimeInputSpec, Validation};
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::payload::{check_default, check_validation};

/// Observable state of an [`EditSession`].
///
/// Validating, rejected, submitted and cancelled are passed through within a
/// single call and show up only in [`EditSession::events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
  Closed,
  Open,
  Editing,
}

impl fmt::Display for SessionState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      SessionState::Closed => "closed",
      SessionState::Open => "open",
      SessionState::Editing => "editing",
    })
  }
}

/// Part of the spec touched by an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditedField {
  Validation,
  Required,
  Default,
}

/// Transitions recorded by a session, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
  Opened { raw: String },
  Rejected { raw: String },
  Edited(EditedField),
  Submitted { raw: String },
  Cancelled,
}

/// Working copy of an opened expression.
#[derive(Debug)]
struct Working {
  raw: String,
  original: RuntimeInputSpec,
  spec: RuntimeInputSpec,
  advanced: bool,
}

#[derive(Debug)]
enum Phase {
  Closed,
  Open(Working),
  Editing(Working),
}

/// State machine around the configuration of one runtime input.
///
/// Mutations only ever reach the working copy. [`submit`](Self::submit)
/// returns the re-encoded expression for the caller to store;
/// [`cancel`](Self::cancel) drops it. Either way the session ends up closed
/// and can be opened again.
#[derive(Debug)]
pub struct EditSession<'c> {
  codec: &'c Codec,
  phase: Phase,
  events: Vec<SessionEvent>,
}

impl<'c> EditSession<'c> {
  pub fn new(codec: &'c Codec) -> Self {
    Self {
      codec,
      phase: Phase::Closed,
      events: Vec::new(),
    }
  }

  pub fn state(&self) -> SessionState {
    match self.phase {
      Phase::Closed => SessionState::Closed,
      Phase::Open(_) => SessionState::Open,
      Phase::Editing(_) => SessionState::Editing,
    }
  }

  pub fn events(&self) -> &[SessionEvent] {
    &self.events
  }

  /// Validate and decode `raw`, populating the working copy.
  ///
  /// On an invalid expression the session stays closed and nothing is kept.
  pub fn open(&mut self, raw: impl Into<String>) -> Result<&RuntimeInputSpec, SessionError> {
    let raw = raw.into();
    if !matches!(self.phase, Phase::Closed) {
      return Err(SessionError::InvalidTransition {
        action: "open",
        state: self.state(),
      });
    }

    debug!(%raw, "validating runtime expression");
    let spec = match self.codec.decode(&raw) {
      Ok(spec) => spec,
      Err(e) => {
        warn!(%raw, error = %e, "runtime expression rejected");
        self.events.push(SessionEvent::Rejected { raw });
        return Err(SessionError::Rejected(e));
      }
    };

    info!(%raw, "edit session opened");
    self.events.push(SessionEvent::Opened { raw: raw.clone() });
    let advanced = self.codec.is_advanced(&raw);
    self.phase = Phase::Open(Working {
      raw,
      original: spec.clone(),
      spec,
      advanced,
    });

    self.working().ok_or(SessionError::InvalidTransition {
      action: "open",
      state: SessionState::Closed,
    })
  }

  /// Move from open to editing. Mutators do this implicitly.
  pub fn begin_edit(&mut self) -> Result<(), SessionError> {
    self.working_mut("edit").map(|_| ())
  }

  /// The spec as edited so far.
  pub fn working(&self) -> Option<&RuntimeInputSpec> {
    self.current().map(|working| &working.spec)
  }

  /// The spec as decoded when the session was opened.
  pub fn original(&self) -> Option<&RuntimeInputSpec> {
    self.current().map(|working| &working.original)
  }

  /// The raw expression the session was opened on.
  pub fn raw(&self) -> Option<&str> {
    self.current().map(|working| working.raw.as_str())
  }

  /// Whether the opened expression holds interpolation tokens.
  pub fn is_advanced(&self) -> bool {
    self.current().is_some_and(|working| working.advanced)
  }

  pub fn is_dirty(&self) -> bool {
    self
      .current()
      .is_some_and(|working| working.spec != working.original)
  }

  pub fn set_validation(&mut self, validation: Validation) -> Result<(), SessionError> {
    check_validation(&validation)?;
    self.working_mut("set validation")?.validation = validation;
    self.edited(EditedField::Validation);
    Ok(())
  }

  pub fn set_allowed_values<I, S>(&mut self, values: I) -> Result<(), SessionError>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.set_validation(Validation::allowed_values(values))
  }

  pub fn set_regex(&mut self, pattern: impl Into<String>) -> Result<(), SessionError> {
    self.set_validation(Validation::regex(pattern))
  }

  pub fn clear_validation(&mut self) -> Result<(), SessionError> {
    self.set_validation(Validation::None)
  }

  pub fn set_required(&mut self, required: bool) -> Result<(), SessionError> {
    self.working_mut("set required")?.required = required;
    self.edited(EditedField::Required);
    Ok(())
  }

  /// Set or clear the default. An empty string clears it.
  pub fn set_default(&mut self, value: Option<String>) -> Result<(), SessionError> {
    let value = value.filter(|v| !v.is_empty());
    if let Some(v) = &value {
      check_default(v)?;
    }
    self.working_mut("set default")?.default = value;
    self.edited(EditedField::Default);
    Ok(())
  }

  /// Encode the working copy and close the session.
  pub fn submit(&mut self) -> Result<String, SessionError> {
    let working = match std::mem::replace(&mut self.phase, Phase::Closed) {
      Phase::Open(working) | Phase::Editing(working) => working,
      Phase::Closed => {
        return Err(SessionError::InvalidTransition {
          action: "submit",
          state: SessionState::Closed,
        });
      }
    };

    let raw = self.codec.encode(&working.spec);
    info!(from = %working.raw, to = %raw, "edit session submitted");
    self.events.push(SessionEvent::Submitted { raw: raw.clone() });
    Ok(raw)
  }

  /// Drop the working copy and close the session.
  ///
  /// Returns the untouched raw expression, or `None` if nothing was open.
  pub fn cancel(&mut self) -> Option<String> {
    match std::mem::replace(&mut self.phase, Phase::Closed) {
      Phase::Open(working) | Phase::Editing(working) => {
        info!(raw = %working.raw, "edit session cancelled");
        self.events.push(SessionEvent::Cancelled);
        Some(working.raw)
      }
      Phase::Closed => None,
    }
  }

  fn current(&self) -> Option<&Working> {
    match &self.phase {
      Phase::Open(working) | Phase::Editing(working) => Some(working),
      Phase::Closed => None,
    }
  }

  fn working_mut(&mut self, action: &'static str) -> Result<&mut RuntimeInputSpec, SessionError> {
    if let Phase::Open(_) = self.phase
      && let Phase::Open(working) = std::mem::replace(&mut self.phase, Phase::Closed)
    {
      debug!(raw = %working.raw, "edit session editing");
      self.phase = Phase::Editing(working);
    }

    let state = self.state();
    match &mut self.phase {
      Phase::Editing(working) => Ok(&mut working.spec),
      _ => Err(SessionError::InvalidTransition { action, state }),
    }
  }

  fn edited(&mut self, field: EditedField) {
    self.events.push(SessionEvent::Edited(field));
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::PayloadError;

  #[test]
  fn test_open_populates_working_copy() {
    let codec = Codec::default();
    let mut session = EditSession::new(&codec);
    assert_eq!(session.state(), SessionState::Closed);

    let spec = session.open("{input}.isRequired()").unwrap();
    assert!(spec.required);
    assert_eq!(session.state(), SessionState::Open);
    assert_eq!(session.raw(), Some("{input}.isRequired()"));
    assert!(!session.is_dirty());
  }

  #[test]
  fn test_rejected_open_stays_closed() {
    let codec = Codec::default();
    let mut session = EditSession::new(&codec);

    let err = session.open("not-an-expression").unwrap_err();
    assert!(matches!(err, SessionError::Rejected(_)));
    assert_eq!(err.to_string(), "not a valid input expression");
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.working().is_none());
    assert_eq!(
      session.events(),
      &[SessionEvent::Rejected {
        raw: "not-an-expression".to_string()
      }]
    );
  }

  #[test]
  fn test_open_twice_is_invalid() {
    let codec = Codec::default();
    let mut session = EditSession::new(&codec);
    session.open("{input}").unwrap();
    assert!(matches!(
      session.open("{input}"),
      Err(SessionError::InvalidTransition {
        action: "open",
        state: SessionState::Open
      })
    ));
  }

  #[test]
  fn test_edit_moves_to_editing() {
    let codec = Codec::default();
    let mut session = EditSession::new(&codec);
    session.open("{input}").unwrap();
    session.set_required(true).unwrap();
    assert_eq!(session.state(), SessionState::Editing);
    assert!(session.is_dirty());
    assert!(session.original().is_some_and(|spec| !spec.required));
  }

  #[test]
  fn test_mutation_while_closed() {
    let codec = Codec::default();
    let mut session = EditSession::new(&codec);
    assert!(matches!(
      session.set_required(true),
      Err(SessionError::InvalidTransition {
        state: SessionState::Closed,
        ..
      })
    ));
    assert!(matches!(
      session.submit(),
      Err(SessionError::InvalidTransition { .. })
    ));
    assert_eq!(session.cancel(), None);
  }

  #[test]
  fn test_bad_payload_leaves_working_copy() {
    let codec = Codec::default();
    let mut session = EditSession::new(&codec);
    session.open("{input}.regex(^a$)").unwrap();

    let err = session.set_regex("^(a|b)$").unwrap_err();
    assert!(matches!(
      err,
      SessionError::Payload(PayloadError::ClosingParen { field: "regex" })
    ));
    assert_eq!(
      session.working().map(|spec| &spec.validation),
      Some(&Validation::regex("^a$"))
    );
    assert_eq!(session.state(), SessionState::Open);
  }

  #[test]
  fn test_submit_encodes_and_closes() {
    let codec = Codec::default();
    let mut session = EditSession::new(&codec);
    session.open("{input}").unwrap();
    session
      .set_allowed_values(["us-east-1", "us-west-1"])
      .unwrap();
    session.set_required(true).unwrap();

    let raw = session.submit().unwrap();
    assert_eq!(raw, "{input}.allowedValues(us-east-1,us-west-1).isRequired()");
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.working().is_none());
  }

  #[test]
  fn test_submit_without_edits_canonicalizes() {
    let codec = Codec::default();
    let mut session = EditSession::new(&codec);
    session.open("{input}.isRequired().regex(^x$)").unwrap();
    assert_eq!(session.submit().unwrap(), "{input}.regex(^x$).isRequired()");
  }

  #[test]
  fn test_cancel_returns_original() {
    let codec = Codec::default();
    let mut session = EditSession::new(&codec);
    session.open("{input}.default(a)").unwrap();
    session.set_default(Some("b".to_string())).unwrap();

    assert_eq!(session.cancel(), Some("{input}.default(a)".to_string()));
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(session.events().last(), Some(&SessionEvent::Cancelled));
  }

  #[test]
  fn test_empty_default_clears() {
    let codec = Codec::default();
    let mut session = EditSession::new(&codec);
    session.open("{input}.default(a)").unwrap();
    session.set_default(Some(String::new())).unwrap();
    assert_eq!(session.submit().unwrap(), "{input}");
  }

  #[test]
  fn test_reopen_after_close() {
    let codec = Codec::default();
    let mut session = EditSession::new(&codec);
    session.open("{input}").unwrap();
    session.cancel();
    session.open("{input}.isRequired()").unwrap();
    assert_eq!(session.state(), SessionState::Open);
  }

  #[test]
  fn test_advanced_flag() {
    let codec = Codec::default();
    let mut session = EditSession::new(&codec);
    session.open("{input}.allowedValues(${regions})").unwrap();
    assert!(session.is_advanced());
  }

  #[test]
  fn test_event_log() {
    let codec = Codec::default();
    let mut session = EditSession::new(&codec);
    session.open("{input}").unwrap();
    session.set_required(true).unwrap();
    session.clear_validation().unwrap();
    session.submit().unwrap();
    assert_eq!(
      session.events(),
      &[
        SessionEvent::Opened {
          raw: "{input}".to_string()
        },
        SessionEvent::Edited(EditedField::Required),
        SessionEvent::Edited(EditedField::Validation),
        SessionEvent::Submitted {
          raw: "{input}.isRequired()".to_string()
        },
      ]
    );
  }
}
