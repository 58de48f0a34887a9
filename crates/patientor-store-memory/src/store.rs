//! [`MemoryStore`] — the in-memory implementation of [`PatientStore`].

use std::{collections::HashMap, sync::Arc};

use patientor_core::{
  entry::{Entry, NewEntry},
  id::{EntryId, IdGenerator, PatientId, RandomIds},
  patient::{NewPatient, NonSensitivePatient, Patient},
  store::PatientStore,
};
use tokio::sync::RwLock;

use crate::{Error, Result};

/// How many times to re-draw an id that is already taken before giving up.
const MAX_ID_ATTEMPTS: usize = 16;

// ─── State ───────────────────────────────────────────────────────────────────

/// Patients in insertion order, plus an id → position index.
#[derive(Default)]
struct Patients {
  records: Vec<Patient>,
  index:   HashMap<PatientId, usize>,
}

impl Patients {
  fn get(&self, id: &PatientId) -> Option<&Patient> {
    self.index.get(id).map(|&i| &self.records[i])
  }

  fn get_mut(&mut self, id: &PatientId) -> Option<&mut Patient> {
    self.index.get(id).map(|&i| &mut self.records[i])
  }

  fn insert(&mut self, patient: Patient) -> Result<()> {
    if self.index.contains_key(&patient.id) {
      return Err(Error::DuplicatePatient(patient.id));
    }
    for (i, entry) in patient.entries.iter().enumerate() {
      if patient.entries[..i].iter().any(|e| e.id == entry.id) {
        return Err(Error::DuplicateEntry {
          patient: patient.id.clone(),
          entry:   entry.id.clone(),
        });
      }
    }
    self.index.insert(patient.id.clone(), self.records.len());
    self.records.push(patient);
    Ok(())
  }
}

/// Draw ids from `ids` until one is not `taken`.
fn fresh_id(ids: &dyn IdGenerator, taken: impl Fn(&str) -> bool) -> Result<String> {
  (0..MAX_ID_ATTEMPTS)
    .map(|_| ids.generate())
    .find(|id| !taken(id.as_str()))
    .ok_or(Error::IdsExhausted(MAX_ID_ATTEMPTS))
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A patient store held entirely in process memory.
///
/// Cloning is cheap — clones share the same state. Every write takes the one
/// write lock, so appends are applied strictly one at a time in the order the
/// lock is acquired.
#[derive(Clone)]
pub struct MemoryStore {
  patients: Arc<RwLock<Patients>>,
  ids:      Arc<dyn IdGenerator>,
}

impl Default for MemoryStore {
  fn default() -> Self { Self::new() }
}

impl MemoryStore {
  /// An empty store that mints random UUID v4 ids.
  pub fn new() -> Self { Self::with_id_generator(RandomIds) }

  /// An empty store that mints ids from `ids`.
  pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
    Self {
      patients: Arc::default(),
      ids:      Arc::new(ids),
    }
  }

  /// A store pre-populated with complete patient records, e.g. seed data.
  ///
  /// Fails if two patients share an id, or one patient has two entries with
  /// the same id.
  pub fn from_patients(patients: impl IntoIterator<Item = Patient>) -> Result<Self> {
    let mut state = Patients::default();
    for patient in patients {
      state.insert(patient)?;
    }
    Ok(Self {
      patients: Arc::new(RwLock::new(state)),
      ids:      Arc::new(RandomIds),
    })
  }

  /// Number of patients currently held.
  pub async fn len(&self) -> usize { self.patients.read().await.records.len() }

  pub async fn is_empty(&self) -> bool { self.len().await == 0 }
}

impl PatientStore for MemoryStore {
  type Error = Error;

  // ── Patients ──────────────────────────────────────────────────────────────

  async fn list_patients(&self) -> Result<Vec<NonSensitivePatient>> {
    let patients = self.patients.read().await;
    Ok(patients.records.iter().map(NonSensitivePatient::from).collect())
  }

  async fn get_patient<'a>(&'a self, id: &'a PatientId) -> Result<Option<Patient>> {
    Ok(self.patients.read().await.get(id).cloned())
  }

  async fn add_patient(&self, input: NewPatient) -> Result<Patient> {
    let mut patients = self.patients.write().await;
    let id = fresh_id(&*self.ids, |id| {
      patients.index.contains_key(&PatientId::new(id))
    })?;
    let patient = input.into_patient(PatientId::new(id));
    patients.insert(patient.clone())?;
    tracing::debug!(patient = %patient.id, "patient added");
    Ok(patient)
  }

  async fn insert_patient(&self, patient: Patient) -> Result<()> {
    self.patients.write().await.insert(patient)
  }

  // ── Entries ───────────────────────────────────────────────────────────────

  async fn append_entry<'a>(
    &'a self,
    id: &'a PatientId,
    entry: NewEntry,
  ) -> Result<Option<Entry>> {
    let mut patients = self.patients.write().await;
    let Some(patient) = patients.get_mut(id) else {
      return Ok(None);
    };

    let entry_id = fresh_id(&*self.ids, |candidate| {
      patient.entries.iter().any(|e| e.id.as_str() == candidate)
    })?;
    let entry = entry.into_entry(EntryId::new(entry_id));
    patient.entries.push(entry.clone());

    tracing::debug!(
      patient = %id,
      entry = %entry.id,
      kind = %entry.kind(),
      count = patient.entries.len(),
      "entry appended",
    );
    Ok(Some(entry))
  }
}
