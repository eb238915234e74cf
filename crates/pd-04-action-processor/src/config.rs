//! Action Processor configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_MAX_LEADERBOARD_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessorConfig {
    /// Upper bound for every store round trip.
    pub store_timeout_ms: u64,
    /// Largest leaderboard a caller may request.
    pub max_leaderboard_limit: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
            max_leaderboard_limit: DEFAULT_MAX_LEADERBOARD_LIMIT,
        }
    }
}

impl ProcessorConfig {
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
