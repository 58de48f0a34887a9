//! Medical entries — a closed tagged union over three kinds of encounter.
//!
//! Every entry carries the same base fields plus exactly one
//! [`EntryDetails`] variant. On the wire the variant is flattened into the
//! entry object and selected by its `type` field:
//!
//! ```json
//! { "id": "…", "type": "HealthCheck", "description": "Yearly check",
//!   "date": "2024-01-10", "specialist": "Dr. A", "diagnosisCodes": [],
//!   "healthCheckRating": 1 }
//! ```

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::EntryId;

// ─── Discriminator ───────────────────────────────────────────────────────────

/// The `type` tag of an entry, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
  HealthCheck,
  OccupationalHealthcare,
  Hospital,
}

impl EntryKind {
  /// Every recognised tag, in declaration order.
  pub const ALL: [Self; 3] =
    [Self::HealthCheck, Self::OccupationalHealthcare, Self::Hospital];

  /// The wire tag. Must match the serde variant names of [`EntryDetails`].
  pub fn as_str(self) -> &'static str {
    match self {
      Self::HealthCheck => "HealthCheck",
      Self::OccupationalHealthcare => "OccupationalHealthcare",
      Self::Hospital => "Hospital",
    }
  }

  /// Parse a wire tag. Matching is exact and case-sensitive.
  pub fn from_tag(tag: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|k| k.as_str() == tag)
  }
}

impl fmt::Display for EntryKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Variant payloads ────────────────────────────────────────────────────────

/// Outcome of a routine health check, serialised as its integer value.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum HealthCheckRating {
  Healthy      = 0,
  LowRisk      = 1,
  HighRisk     = 2,
  CriticalRisk = 3,
}

impl HealthCheckRating {
  pub fn label(self) -> &'static str {
    match self {
      Self::Healthy => "Healthy",
      Self::LowRisk => "Low Risk",
      Self::HighRisk => "High Risk",
      Self::CriticalRisk => "Critical Risk",
    }
  }
}

impl From<HealthCheckRating> for u8 {
  fn from(rating: HealthCheckRating) -> Self { rating as u8 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("health check rating must be 0-3, got {0}")]
pub struct RatingOutOfRange(pub u8);

impl TryFrom<u8> for HealthCheckRating {
  type Error = RatingOutOfRange;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(Self::Healthy),
      1 => Ok(Self::LowRisk),
      2 => Ok(Self::HighRisk),
      3 => Ok(Self::CriticalRisk),
      other => Err(RatingOutOfRange(other)),
    }
  }
}

/// A period of sick leave granted by an occupational healthcare visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SickLeave {
  pub start_date: NaiveDate,
  pub end_date:   NaiveDate,
}

/// When and on what grounds a hospital patient was discharged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discharge {
  pub date:     NaiveDate,
  pub criteria: String,
}

/// The variant-specific part of an entry. The variant name is the `type` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum EntryDetails {
  HealthCheck {
    health_check_rating: HealthCheckRating,
  },
  OccupationalHealthcare {
    employer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sick_leave:    Option<SickLeave>,
  },
  Hospital {
    discharge: Discharge,
  },
}

impl EntryDetails {
  pub fn kind(&self) -> EntryKind {
    match self {
      Self::HealthCheck { .. } => EntryKind::HealthCheck,
      Self::OccupationalHealthcare { .. } => EntryKind::OccupationalHealthcare,
      Self::Hospital { .. } => EntryKind::Hospital,
    }
  }
}

// ─── Entry ───────────────────────────────────────────────────────────────────

/// A recorded medical entry. Entries are only ever appended to a patient's
/// record; no field changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
  pub id:              EntryId,
  pub description:     String,
  pub date:            NaiveDate,
  pub specialist:      String,
  #[serde(default)]
  pub diagnosis_codes: Vec<String>,
  #[serde(flatten)]
  pub details:         EntryDetails,
}

impl Entry {
  pub fn kind(&self) -> EntryKind { self.details.kind() }
}

// ─── NewEntry ────────────────────────────────────────────────────────────────

/// A validated entry awaiting an id. Produced by
/// [`crate::validate::parse_new_entry`]; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
  pub description:     String,
  pub date:            NaiveDate,
  pub specialist:      String,
  pub diagnosis_codes: Vec<String>,
  pub details:         EntryDetails,
}

impl NewEntry {
  pub fn into_entry(self, id: EntryId) -> Entry {
    Entry {
      id,
      description: self.description,
      date: self.date,
      specialist: self.specialist,
      diagnosis_codes: self.diagnosis_codes,
      details: self.details,
    }
  }
}
