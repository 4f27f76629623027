//! # NGO Collaboration API Main Entry Point

use anyhow::Context;
use ngo_collab::{config::ConfigLoader, db, server::run_server, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from layered env files and variables
    let config = ConfigLoader::new().load()?;

    telemetry::init_tracing(&config)?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Effective configuration");
    }
    if config.uses_dev_secret() {
        tracing::warn!(
            profile = %config.profile,
            "COLLAB_JWT_SECRET not set; signing tokens with the development secret"
        );
    }

    let db = db::init_pool(&config)
        .await
        .context("initializing database connection pool")?;

    if config.run_migrations {
        db::run_migrations(&db).await?;
    } else {
        tracing::info!("Skipping migrations (COLLAB_RUN_MIGRATIONS=false)");
    }

    run_server(config, db).await
}
