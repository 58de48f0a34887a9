//! Patientor server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), optionally
//! seeds the in-memory store from a JSON file, and serves the JSON API under
//! `/api`.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use patientor_server::{ServerConfig, app, open_store};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Patientor patient record server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Override the configured seed file.
  #[arg(long)]
  seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut config = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to read config from {:?}", cli.config))?;
  if let Some(seed) = cli.seed {
    config.seed_path = Some(seed);
  }

  let (store, diagnoses) = open_store(&config)
    .await
    .context("failed to open patient store")?;
  tracing::info!(
    patients = store.len().await,
    diagnoses = diagnoses.len(),
    "store ready"
  );

  let address = config.address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  tracing::info!("Listening on http://{address}");
  axum::serve(listener, app(&config, store, diagnoses))
    .await
    .context("server error")?;

  Ok(())
}
