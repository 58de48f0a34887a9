//! JSON REST API for Patientor.
//!
//! Exposes an axum [`Router`] backed by any
//! [`patientor_core::store::PatientStore`]. TLS, CORS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", patientor_api::api_router(store, diagnoses))
//! ```

pub mod diagnoses;
pub mod entries;
pub mod error;
pub mod patients;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use patientor_core::{diagnosis::DiagnosisCatalog, store::PatientStore};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:     Arc<S>,
  pub diagnoses: Arc<DiagnosisCatalog>,
}

// Manual impl: the store itself need not be `Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      diagnoses: Arc::clone(&self.diagnoses),
    }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, diagnoses: Arc<DiagnosisCatalog>) -> Router<()>
where
  S: PatientStore + 'static,
{
  Router::new()
    .route("/ping", get(ping))
    .route("/diagnoses", get(diagnoses::list::<S>))
    // Patients
    .route("/patients", get(patients::list::<S>).post(patients::create::<S>))
    .route("/patients/{id}", get(patients::get_one::<S>))
    .route("/patients/{id}/entries", post(entries::create::<S>))
    .with_state(ApiState { store, diagnoses })
}

/// `GET /ping` — liveness check.
async fn ping() -> &'static str {
  tracing::debug!("someone pinged here");
  "pong"
}
