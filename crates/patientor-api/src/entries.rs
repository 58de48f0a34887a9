//! Handler for `POST /patients/:id/entries`.
//!
//! The body is taken as untyped JSON and validated by
//! [`patientor_core::intake::add_entry`]:
//!
//! - 201 + the created entry on success,
//! - 404 `{"error":"Patient not found"}` if the patient does not exist,
//! - 400 `{"error":"<reason>"}` if the payload is rejected.

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use patientor_core::{id::PatientId, intake, store::PatientStore};
use serde_json::Value;

use crate::{ApiState, error::ApiError};

/// `POST /patients/:id/entries`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PatientStore,
{
  let id = PatientId::new(id);
  let Json(payload) = body?;

  let entry = intake::add_entry(state.store.as_ref(), &id, &payload)
    .await
    .inspect_err(|e| tracing::warn!(patient = %id, error = %e, "entry rejected"))?;

  tracing::info!(patient = %id, entry = %entry.id, kind = %entry.kind(), "entry added");
  Ok((StatusCode::CREATED, Json(entry)))
}
