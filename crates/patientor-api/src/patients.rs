//! Handlers for `/patients` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/patients` | All patients, without `ssn` |
//! | `POST` | `/patients` | Body: new patient; returns 201 + full record |
//! | `GET`  | `/patients/:id` | Full record; 404 if not found |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use patientor_core::{
  id::PatientId,
  intake,
  patient::{NonSensitivePatient, Patient},
  store::PatientStore,
};
use serde_json::Value;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /patients`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<NonSensitivePatient>>, ApiError>
where
  S: PatientStore,
{
  let patients = state
    .store
    .list_patients()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(patients))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /patients/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError>
where
  S: PatientStore,
{
  let patient = state
    .store
    .get_patient(&PatientId::new(id))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Patient not found".into()))?;
  Ok(Json(patient))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /patients` — returns 201 + the stored [`Patient`].
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PatientStore,
{
  let Json(payload) = body?;
  let patient = intake::add_patient(state.store.as_ref(), &payload)
    .await
    .inspect_err(|e| tracing::warn!(error = %e, "patient rejected"))?;

  tracing::info!(patient = %patient.id, "patient added");
  Ok((StatusCode::CREATED, Json(patient)))
}
