//! Seed data: patients and diagnoses loaded from a JSON file at startup.
//!
//! ```json
//! {
//!   "diagnoses": [{ "code": "M24.2", "name": "Disorder of ligament", "latin": "Morbositas ligamenti" }],
//!   "patients":  [{ "id": "…", "name": "…", "dateOfBirth": "1979-01-30", "ssn": "…",
//!                   "gender": "male", "occupation": "…", "entries": [] }]
//! }
//! ```

use std::path::Path;

use patientor_core::{
  diagnosis::{Diagnosis, DiagnosisCatalog},
  patient::Patient,
};
use serde::Deserialize;

use crate::{MemoryStore, Result};

#[derive(Debug, Default, Deserialize)]
pub struct Seed {
  #[serde(default)]
  pub diagnoses: Vec<Diagnosis>,
  #[serde(default)]
  pub patients:  Vec<Patient>,
}

impl Seed {
  pub fn from_json(text: &str) -> Result<Self> { Ok(serde_json::from_str(text)?) }

  pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
    let text = tokio::fs::read_to_string(path).await?;
    Self::from_json(&text)
  }

  /// Build the store and the diagnosis catalogue described by this seed.
  pub fn into_parts(self) -> Result<(MemoryStore, DiagnosisCatalog)> {
    let store = MemoryStore::from_patients(self.patients)?;
    Ok((store, DiagnosisCatalog::new(self.diagnoses)))
  }
}
