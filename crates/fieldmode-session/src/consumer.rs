//! The contract between field-rendering components and this crate.
//!
//! A component asks [`FieldController::mode`] which widget to show. When the
//! operator asks to configure a runtime input it calls
//! [`FieldController::configure`], drives the returned [`EditSession`] from
//! its form, and hands it back to [`FieldController::commit`].

use std::collections::BTreeMap;

use fieldmode_codec::{Codec, InvalidExpressionError};
use fieldmode_config::{FieldValue, Mode};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SessionError;
use crate::session::EditSession;

/// A host document holding field values as raw strings.
pub trait FieldDocument {
  fn read(&self, field: &str) -> Option<&str>;
  fn write(&mut self, field: &str, value: String);
}

/// In-memory document keyed by field path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapDocument {
  fields: BTreeMap<String, String>,
}

impl MapDocument {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
    self.fields.insert(field.into(), value.into());
    self
  }

  pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .fields
      .iter()
      .map(|(field, value)| (field.as_str(), value.as_str()))
  }
}

impl FieldDocument for MapDocument {
  fn read(&self, field: &str) -> Option<&str> {
    self.fields.get(field).map(String::as_str)
  }

  fn write(&mut self, field: &str, value: String) {
    self.fields.insert(field.to_string(), value);
  }
}

/// Binds a codec to the operations field components need.
#[derive(Debug, Clone, Copy)]
pub struct FieldController<'c> {
  codec: &'c Codec,
}

impl<'c> FieldController<'c> {
  pub fn new(codec: &'c Codec) -> Self {
    Self { codec }
  }

  pub fn codec(&self) -> &'c Codec {
    self.codec
  }

  /// Which widget mode to render for a raw value.
  pub fn mode(&self, raw: &str) -> Mode {
    self.codec.classify(raw)
  }

  pub fn field_value(&self, raw: &str) -> Result<FieldValue, InvalidExpressionError> {
    self.codec.parse_field(raw)
  }

  /// Open an edit session on a field of `doc`.
  ///
  /// The field is decoded whatever its mode, so a non-runtime value is rejected
  /// rather than silently opened.
  pub fn configure<D>(&self, doc: &D, field: &str) -> Result<EditSession<'c>, SessionError>
  where
    D: FieldDocument + ?Sized,
  {
    let raw = doc
      .read(field)
      .ok_or_else(|| SessionError::MissingField(field.to_string()))?;
    let mut session = EditSession::new(self.codec);
    session.open(raw)?;
    Ok(session)
  }

  /// Submit the session and write the new expression into `doc`.
  pub fn commit<D>(
    &self,
    doc: &mut D,
    field: &str,
    session: &mut EditSession<'c>,
  ) -> Result<(), SessionError>
  where
    D: FieldDocument + ?Sized,
  {
    let raw = session.submit()?;
    info!(field, %raw, "runtime input written back");
    doc.write(field, raw);
    Ok(())
  }
}
