//! # Penalty-Duel Runtime
//!
//! Serves the JSON line protocol over stdin/stdout. Logs go to stderr.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Install logging
//! 3. Build the repository and subsystems
//! 4. Answer requests until stdin closes

use anyhow::{Context, Result};
use duel_runtime::{DuelConfig, DuelRuntime};
use duel_telemetry::init_telemetry;
use tokio::io::{self, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = DuelConfig::from_env().context("failed to load configuration")?;
    let _telemetry = init_telemetry(config.telemetry.clone())?;

    info!(version = env!("CARGO_PKG_VERSION"), "starting penalty-duel runtime");

    let runtime = DuelRuntime::new(&config)?;
    let served = runtime
        .serve(BufReader::new(io::stdin()), io::stdout())
        .await?;

    info!(served, "penalty-duel runtime stopped");
    Ok(())
}
