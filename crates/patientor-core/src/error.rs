//! Error types for `patientor-core`.

use std::fmt;

use thiserror::Error;

use crate::id::PatientId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("patient not found: {0}")]
  PatientNotFound(PatientId),

  #[error("invalid payload: {0}")]
  InvalidPayload(#[from] PayloadError),

  #[error(transparent)]
  Validation(#[from] ValidationErrors),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Entry payload rejection ─────────────────────────────────────────────────

/// Why an inbound entry payload was rejected. The entry validator stops at the
/// first violation, so a rejection always names exactly one field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
  #[error("payload must be a JSON object")]
  NotAnObject,

  #[error("missing field: {field}")]
  Missing { field: String },

  #[error("field {field} must not be empty")]
  Empty { field: String },

  #[error("field {field} must be {expected}")]
  WrongType {
    field:    String,
    expected: &'static str,
  },

  #[error("invalid date in {field}: {value:?}, expected YYYY-MM-DD")]
  InvalidDate { field: String, value: String },

  #[error("Invalid entry type")]
  InvalidEntryType,

  #[error("Invalid health check rating: {value}")]
  InvalidRating { value: String },
}

impl PayloadError {
  /// Dotted path of the offending field, e.g. `discharge.date`. Empty for
  /// [`PayloadError::NotAnObject`], which concerns the payload as a whole.
  pub fn field(&self) -> &str {
    match self {
      Self::NotAnObject => "",
      Self::Missing { field }
      | Self::Empty { field }
      | Self::WrongType { field, .. }
      | Self::InvalidDate { field, .. } => field,
      Self::InvalidEntryType => "type",
      Self::InvalidRating { .. } => "healthCheckRating",
    }
  }
}

// ─── Patient payload rejection ───────────────────────────────────────────────

/// One problem found while validating a new patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
  pub field:   String,
  pub message: String,
}

impl FieldIssue {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      field:   field.into(),
      message: message.into(),
    }
  }
}

impl fmt::Display for FieldIssue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.field, self.message)
  }
}

/// Every issue found in a new-patient payload. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed")]
pub struct ValidationErrors(pub Vec<FieldIssue>);

impl ValidationErrors {
  pub fn issues(&self) -> &[FieldIssue] { &self.0 }

  /// The issues rendered as `field: message` strings.
  pub fn details(&self) -> Vec<String> {
    self.0.iter().map(ToString::to_string).collect()
  }
}
