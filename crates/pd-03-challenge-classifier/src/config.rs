//! Classifier configuration.

use serde::{Deserialize, Serialize};
use shared_types::Timestamp;

/// 24 hours.
pub const DEFAULT_RECENCY_WINDOW_MS: u64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassifierConfig {
    /// How long a finished match keeps surfacing as `finished_recent`.
    pub recency_window_ms: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            recency_window_ms: DEFAULT_RECENCY_WINDOW_MS,
        }
    }
}

impl ClassifierConfig {
    /// True if a match finished at `finished_at` still counts as recent.
    /// A finish time ahead of `now` counts as recent.
    pub fn is_recent(&self, finished_at: Timestamp, now: Timestamp) -> bool {
        now.saturating_sub(finished_at) <= self.recency_window_ms
    }
}
