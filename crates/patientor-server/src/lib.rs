//! Composition root for the Patientor server: configuration, seed data, and
//! the top-level router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use patientor_core::diagnosis::DiagnosisCatalog;
use patientor_store_memory::{MemoryStore, Seed};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PATIENTOR_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:      String,
  #[serde(default = "default_port")]
  pub port:      u16,
  /// JSON file with initial patients and diagnoses. Starts empty if unset.
  #[serde(default)]
  pub seed_path: Option<PathBuf>,
  /// Allow cross-origin requests from any origin.
  #[serde(default = "default_cors")]
  pub cors:      bool,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 3001 }

fn default_cors() -> bool { true }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:      default_host(),
      port:      default_port(),
      seed_path: None,
      cors:      default_cors(),
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `PATIENTOR_*` variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("PATIENTOR"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Seed ─────────────────────────────────────────────────────────────────────

/// Build the store and diagnosis catalogue, from the seed file if configured.
pub async fn open_store(
  config: &ServerConfig,
) -> patientor_store_memory::Result<(MemoryStore, DiagnosisCatalog)> {
  let Some(path) = &config.seed_path else {
    return Ok((MemoryStore::new(), DiagnosisCatalog::default()));
  };
  let path = expand_tilde(path);
  tracing::info!(path = %path.display(), "loading seed data");
  Seed::load(&path).await?.into_parts()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the API under `/api`, with request tracing and,
/// if enabled, permissive CORS.
pub fn app(config: &ServerConfig, store: MemoryStore, diagnoses: DiagnosisCatalog) -> Router {
  let router = Router::new()
    .nest("/api", patientor_api::api_router(Arc::new(store), Arc::new(diagnoses)))
    .layer(TraceLayer::new_for_http());
  if config.cors {
    router.layer(CorsLayer::permissive())
  } else {
    router
  }
}
