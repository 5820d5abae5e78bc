//! Roster API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p roster-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use roster_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing_with_config(tracing_for_env()) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

/// Pick the log format before the full config is loaded
fn tracing_for_env() -> TracingConfig {
    let _ = dotenvy::dotenv();
    match std::env::var("APP_ENV").ok().and_then(|v| v.parse::<Environment>().ok()) {
        Some(Environment::Production) => TracingConfig::production(),
        Some(Environment::Development) => TracingConfig::development(),
        _ => TracingConfig::default(),
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Roster API Server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        store = ?config.store,
        port = config.api.port,
        recognition = config.recognition.is_enabled(),
        "Configuration loaded"
    );

    roster_api::run(config).await?;

    Ok(())
}
