//! # Runtime Container
//!
//! Builds the subsystems in dependency order: repository and clock, then the
//! action processor (which owns the match store, classifier and scoring
//! engine).

pub mod config;
pub mod repository;

pub use config::{ConfigError, DuelConfig, StorageBackend, StorageConfig};
pub use repository::RuntimeRepository;

use pd_01_match_store::SystemTimeSource;
use pd_04_action_processor::ActionProcessor;
use std::sync::Arc;

pub type RuntimeProcessor = ActionProcessor<RuntimeRepository, SystemTimeSource>;

/// Holds the wired subsystems.
pub struct DuelContainer {
    processor: Arc<RuntimeProcessor>,
}

impl DuelContainer {
    pub fn new(config: &DuelConfig) -> anyhow::Result<Self> {
        let repository = Arc::new(RuntimeRepository::open(&config.storage)?);
        let processor = ActionProcessor::new(
            config.processor,
            config.classifier,
            config.scoring,
            repository,
            Arc::new(SystemTimeSource),
        );
        Ok(Self {
            processor: Arc::new(processor),
        })
    }

    pub fn processor(&self) -> Arc<RuntimeProcessor> {
        Arc::clone(&self.processor)
    }
}
