//! Error type for `patientor-store-memory`.

use patientor_core::id::{EntryId, PatientId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("patient already exists: {0}")]
  DuplicatePatient(PatientId),

  #[error("patient {patient} has more than one entry with id {entry}")]
  DuplicateEntry { patient: PatientId, entry: EntryId },

  /// The id generator kept returning ids that were already taken.
  #[error("no unused id after {0} attempts")]
  IdsExhausted(usize),

  #[error("seed file error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
