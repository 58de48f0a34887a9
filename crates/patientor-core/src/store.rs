//! The `PatientStore` trait.
//!
//! Implemented by storage backends (e.g. `patientor-store-memory`). The intake
//! operations and the HTTP layer depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  entry::{Entry, NewEntry},
  id::PatientId,
  patient::{NewPatient, NonSensitivePatient, Patient},
};

/// Abstraction over a patient store backend.
///
/// Patients are never deleted and entries are only ever appended. Backends
/// that accept concurrent requests must serialise appends so that two entries
/// for the same patient land in a deterministic order.
pub trait PatientStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Patients ──────────────────────────────────────────────────────────

  /// All patients in insertion order, without their `ssn`.
  fn list_patients(
    &self,
  ) -> impl Future<Output = Result<Vec<NonSensitivePatient>, Self::Error>>
  + Send
  + '_;

  /// Retrieve the full record for a patient. Returns `None` if not found.
  fn get_patient<'a>(
    &'a self,
    id: &'a PatientId,
  ) -> impl Future<Output = Result<Option<Patient>, Self::Error>> + Send + 'a;

  /// Create a patient with a store-assigned id and no entries.
  fn add_patient(
    &self,
    input: NewPatient,
  ) -> impl Future<Output = Result<Patient, Self::Error>> + Send + '_;

  /// Insert a complete patient record under its own id, e.g. from seed data.
  ///
  /// Returns an error if the id is already taken.
  fn insert_patient(
    &self,
    patient: Patient,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Entries — append-only ─────────────────────────────────────────────

  /// Assign an id to `entry` and append it to the patient's record.
  ///
  /// Returns `None` without mutating anything if the patient does not exist.
  /// Callers should go through [`crate::intake::add_entry`], which validates
  /// the payload first.
  fn append_entry<'a>(
    &'a self,
    id: &'a PatientId,
    entry: NewEntry,
  ) -> impl Future<Output = Result<Option<Entry>, Self::Error>> + Send + 'a;
}
