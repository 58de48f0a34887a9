//! Validated writes: the only way new patients and entries reach a store.
//!
//! Each operation either validates its payload and performs exactly one store
//! mutation, or returns an error having mutated nothing.

use serde_json::Value;

use crate::{
  entry::Entry,
  error::{Error, Result},
  id::PatientId,
  patient::Patient,
  store::PatientStore,
  validate::{parse_new_entry, parse_new_patient},
};

fn store_error<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}

/// Validate `payload` as an entry and append it to the patient's record.
///
/// Fails with [`Error::PatientNotFound`] before looking at the payload if the
/// patient does not exist, and with [`Error::InvalidPayload`] if the payload
/// is rejected.
pub async fn add_entry<S>(
  store: &S,
  patient_id: &PatientId,
  payload: &Value,
) -> Result<Entry>
where
  S: PatientStore,
{
  if store
    .get_patient(patient_id)
    .await
    .map_err(store_error)?
    .is_none()
  {
    return Err(Error::PatientNotFound(patient_id.clone()));
  }

  let new_entry = parse_new_entry(payload)?;

  store
    .append_entry(patient_id, new_entry)
    .await
    .map_err(store_error)?
    .ok_or_else(|| Error::PatientNotFound(patient_id.clone()))
}

/// Validate `payload` as a new patient and add it to the store.
pub async fn add_patient<S>(store: &S, payload: &Value) -> Result<Patient>
where
  S: PatientStore,
{
  let new_patient = parse_new_patient(payload)?;
  store.add_patient(new_patient).await.map_err(store_error)
}
