//! The diagnosis catalogue: read-only code → name lookup used for display.
//!
//! Entries reference diagnoses by code, but nothing in this crate checks those
//! codes against the catalogue.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
  pub code:  String,
  pub name:  String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub latin: Option<String>,
}

/// Diagnoses keyed by code. Later duplicates replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct DiagnosisCatalog {
  by_code: BTreeMap<String, Diagnosis>,
}

impl DiagnosisCatalog {
  pub fn new(diagnoses: impl IntoIterator<Item = Diagnosis>) -> Self {
    Self {
      by_code: diagnoses
        .into_iter()
        .map(|d| (d.code.clone(), d))
        .collect(),
    }
  }

  /// All diagnoses in code order.
  pub fn list(&self) -> Vec<Diagnosis> { self.by_code.values().cloned().collect() }

  pub fn get(&self, code: &str) -> Option<&Diagnosis> { self.by_code.get(code) }

  pub fn len(&self) -> usize { self.by_code.len() }

  pub fn is_empty(&self) -> bool { self.by_code.is_empty() }
}
