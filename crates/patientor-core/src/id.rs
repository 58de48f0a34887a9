//! Opaque identifiers and the capability that mints them.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies a patient. Opaque to clients; any string is accepted on lookup.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for PatientId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for PatientId {
  fn from(id: &str) -> Self { Self::new(id) }
}

/// Identifies an entry within a patient's record. Always system-assigned.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for EntryId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Source of fresh opaque ids, injected into store backends.
///
/// Implementations need not guarantee global uniqueness; stores re-draw on
/// collision.
pub trait IdGenerator: Send + Sync {
  fn generate(&self) -> String;
}

/// Random UUID v4 ids in hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
  fn generate(&self) -> String { Uuid::new_v4().to_string() }
}
