//! `plat` — batch ETL driver for the plat property warehouse.
//!
//! Sequences extract → transform → load: fetches a batch of property
//! records from the API (or replays the staging file), dimensionalizes
//! them into a star schema, and loads the four tables into SQLite.
//!
//! # Usage
//!
//! ```
//! PLAT_API_KEY=... plat --limit 200 --database warehouse.db
//! plat --config plat.toml --offline
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use plat_core::{sink::WarehouseSink as _, transform::transform};
use plat_extract::{ClientConfig, PropertyClient, staging};
use plat_store_sqlite::SqliteSink;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "plat", about = "Property-record star-schema ETL")]
struct Args {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "plat.toml")]
  config: PathBuf,

  /// Re-run the transform from the staging file without fetching.
  #[arg(long)]
  offline: bool,

  /// Number of properties to request from the API (overrides config).
  #[arg(long)]
  limit: Option<usize>,

  /// SQLite database path (overrides config).
  #[arg(long)]
  database: Option<PathBuf>,

  /// Staging file path (overrides config).
  #[arg(long)]
  staging: Option<PathBuf>,
}

// ─── Config ───────────────────────────────────────────────────────────────────

/// Layered configuration: TOML file, then `PLAT_`-prefixed environment
/// variables, then CLI flags.
#[derive(Debug, Clone, Deserialize)]
struct PipelineConfig {
  #[serde(default)]
  api_key: String,

  #[serde(default = "default_api_url")]
  api_url: String,

  #[serde(default = "default_api_host")]
  api_host: String,

  #[serde(default = "default_staging_path")]
  staging_path: PathBuf,

  #[serde(default = "default_database_path")]
  database_path: PathBuf,

  #[serde(default = "default_limit")]
  limit: usize,

  /// Abort the run when more than this many fact rows are rejected by
  /// the sink.
  #[serde(default)]
  max_row_failures: usize,
}

fn default_api_url() -> String {
  "https://realty-mole-property-api.p.rapidapi.com".to_owned()
}

fn default_api_host() -> String {
  "realty-mole-property-api.p.rapidapi.com".to_owned()
}

fn default_staging_path() -> PathBuf {
  PathBuf::from("real_estate.json")
}

fn default_database_path() -> PathBuf {
  PathBuf::from("warehouse.db")
}

fn default_limit() -> usize {
  500
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(args.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("PLAT"))
    .build()
    .context("failed to read config")?;

  let mut cfg: PipelineConfig = settings
    .try_deserialize()
    .context("failed to deserialise PipelineConfig")?;

  // CLI flags override config file and environment.
  if let Some(limit) = args.limit {
    cfg.limit = limit;
  }
  if let Some(database) = args.database {
    cfg.database_path = database;
  }
  if let Some(staging_path) = args.staging {
    cfg.staging_path = staging_path;
  }

  run(cfg, args.offline).await
}

// ─── Pipeline ─────────────────────────────────────────────────────────────────

async fn run(cfg: PipelineConfig, offline: bool) -> anyhow::Result<()> {
  // Extract.
  let records = if offline {
    tracing::info!(path = %cfg.staging_path.display(), "replaying staging file");
    staging::load_staging(&cfg.staging_path)
      .context("failed to load staging file")?
  } else {
    let client = PropertyClient::new(ClientConfig {
      base_url: cfg.api_url.clone(),
      api_key:  cfg.api_key.clone(),
      api_host: cfg.api_host.clone(),
    })
    .context("failed to build API client")?;

    let fetched = client
      .fetch_random_properties(cfg.limit)
      .await
      .context("failed to fetch property records")?;

    // Stage first, then transform from the durable copy — the staging
    // file is the authoritative input of the run.
    staging::save_staging(&cfg.staging_path, &fetched)
      .context("failed to write staging file")?;
    staging::load_staging(&cfg.staging_path)
      .context("failed to re-read staging file")?
  };

  if records.is_empty() {
    anyhow::bail!("no records extracted; nothing to load");
  }
  tracing::info!(count = records.len(), "extracted property records");

  // Transform.
  let schema = transform(&records);
  tracing::info!(
    location = schema.location.len(),
    sales = schema.sales.len(),
    features = schema.features.len(),
    fact = schema.fact.len(),
    "dimensionalized record set"
  );
  tracing::info!(
    location = schema.report.collapsed_location,
    sales = schema.report.collapsed_sales,
    features = schema.report.collapsed_features,
    "records collapsed per dimension"
  );
  for defect in &schema.report.defects {
    tracing::warn!(%defect, "record excluded from fact table");
  }

  // Load.
  let sink = SqliteSink::open(&cfg.database_path)
    .await
    .with_context(|| {
      format!("failed to open warehouse at {}", cfg.database_path.display())
    })?;

  sink.reset().await.context("failed to reset warehouse")?;
  sink
    .load_location_dim(&schema.location)
    .await
    .context("failed to load location_dim")?;
  sink
    .load_sales_dim(&schema.sales)
    .await
    .context("failed to load sales_dim")?;
  sink
    .load_features_dim(&schema.features)
    .await
    .context("failed to load features_dim")?;

  let failures = sink
    .load_fact(&schema.fact)
    .await
    .context("failed to load property_fact")?;

  for failure in &failures {
    tracing::warn!(
      record_id = %failure.record_id,
      reason = %failure.reason,
      "fact row rejected by sink"
    );
  }
  if failures.len() > cfg.max_row_failures {
    anyhow::bail!(
      "fact load exceeded failure threshold: {} rejected (allowed {})",
      failures.len(),
      cfg.max_row_failures,
    );
  }

  tracing::info!("pipeline complete");
  Ok(())
}
