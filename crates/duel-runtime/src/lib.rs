//! # Penalty-Duel Runtime Library
//!
//! Wires the subsystems into one process and serves the JSON line protocol.
//! The binary in `main.rs` reads stdin and writes stdout; tests drive
//! [`DuelRuntime::serve`] with in-memory buffers.
//!
//! ## Subsystems
//!
//! 1. Match Store (pd-01) - lifecycle, optimistic versioning, repositories
//! 2. Scoring (pd-02) - outcome judge, scoring engine, player statistics
//! 3. Challenge Classifier (pd-03) - per-viewer lists
//! 4. Action Processor (pd-04) - command validation and orchestration

pub mod container;
pub mod protocol;

pub use container::{DuelConfig, DuelContainer, RuntimeProcessor};
pub use protocol::{handle_line, serve, QueryRequest, Response};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::info;

/// Runtime owning the wired subsystems.
pub struct DuelRuntime {
    container: DuelContainer,
}

impl DuelRuntime {
    /// Validates `config` and builds every subsystem.
    pub fn new(config: &DuelConfig) -> Result<Self> {
        config.validate().context("invalid configuration")?;
        let container = DuelContainer::new(config).context("failed to build subsystems")?;
        info!(
            storage = ?config.storage.backend,
            store_timeout_ms = config.processor.store_timeout_ms,
            recency_window_ms = config.classifier.recency_window_ms,
            "duel runtime ready"
        );
        Ok(Self { container })
    }

    pub fn container(&self) -> &DuelContainer {
        &self.container
    }

    /// Answers requests until `reader` is exhausted.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<u64>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let processor = self.container.processor();
        serve(processor.as_ref(), reader, writer)
            .await
            .context("request stream failed")
    }
}
