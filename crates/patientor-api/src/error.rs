//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// A rejected payload with one message per problem field.
  #[error("{message}")]
  Validation {
    message: String,
    details: Vec<String>,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<patientor_core::Error> for ApiError {
  fn from(e: patientor_core::Error) -> Self {
    use patientor_core::Error as E;
    match e {
      E::PatientNotFound(_) => ApiError::NotFound("Patient not found".into()),
      E::InvalidPayload(p) => ApiError::BadRequest(p.to_string()),
      E::Validation(v) => ApiError::Validation {
        message: v.to_string(),
        details: v.details(),
      },
      E::Store(e) => ApiError::Store(e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
      ApiError::Validation { message, details } => (
        StatusCode::BAD_REQUEST,
        json!({ "error": message, "details": details }),
      ),
      ApiError::Store(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": e.to_string() }),
      ),
    };
    (status, Json(body)).into_response()
  }
}
