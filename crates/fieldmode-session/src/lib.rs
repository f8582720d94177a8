//! Fieldmode Session
//!
//! Drives the configuration of one runtime input field from the moment an
//! operator asks to configure it until the edited expression is written back.
//!
//! ```text
//! Closed ──open──▶ Validating ──ok──▶ Open ──edit──▶ Editing
//!   ▲                  │                │               │
//!   │               invalid          submit/cancel   submit/cancel
//!   └──── Rejected ◀───┘                │               │
//!   └───────────────────────────────────┴───────────────┘
//! ```
//!
//! The session owns a working copy of the decoded spec and touches nothing
//! else. Rendering, option fetching and persistence are left to the caller,
//! which reads field values through [`FieldDocument`] and chooses widgets from
//! [`FieldController::mode`].

mod consumer;
mod error;
mod payload;
mod session;

pub use consumer::{FieldController, FieldDocument, MapDocument};
pub use error::{PayloadError, SessionError};
pub use payload::{check_allowed_values, check_default, check_pattern, check_validation};
pub use session::{EditSession, EditedField, SessionEvent, SessionState};
