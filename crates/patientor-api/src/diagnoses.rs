//! Handler for `GET /diagnoses`.

use axum::{Json, extract::State};
use patientor_core::{diagnosis::Diagnosis, store::PatientStore};

use crate::ApiState;

/// `GET /diagnoses` — the whole catalogue in code order.
pub async fn list<S>(State(state): State<ApiState<S>>) -> Json<Vec<Diagnosis>>
where
  S: PatientStore,
{
  Json(state.diagnoses.list())
}
