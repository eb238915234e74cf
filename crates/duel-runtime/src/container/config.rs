//! # Runtime Configuration
//!
//! Unified configuration for every subsystem, loaded from the environment.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DUEL_STORAGE` | `memory` (`file` if `DUEL_DATA_DIR` is set) | Repository backend |
//! | `DUEL_DATA_DIR` | `./data/matches` | Directory of the file backend |
//! | `DUEL_RECENT_WINDOW_SECS` | `86400` | Recency window of finished matches |
//! | `DUEL_STORE_TIMEOUT_MS` | `2000` | Bound on every store round trip |
//! | `DUEL_MAX_LEADERBOARD` | `100` | Largest leaderboard a caller may request |
//! | `DUEL_POINTS_PER_GOAL` | `10` | |
//! | `DUEL_POINTS_PER_SAVE` | `15` | |
//! | `DUEL_PERFECT_ATTACK_BONUS` | `100` | |
//! | `DUEL_PERFECT_DEFENSE_BONUS` | `100` | |
//! | `DUEL_WIN_BONUS` | `50` | |
//! | `DUEL_DRAW_BONUS` | `20` | |
//! | `DUEL_STREAK_BONUS` | `300` | |
//!
//! Logging variables are documented in `duel-telemetry`.

use duel_telemetry::TelemetryConfig;
use pd_02_scoring::ScoringRules;
use pd_03_challenge_classifier::ClassifierConfig;
use pd_04_action_processor::ProcessorConfig;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct DuelConfig {
    pub storage: StorageConfig,
    pub scoring: ScoringRules,
    pub classifier: ClassifierConfig,
    pub processor: ProcessorConfig,
    pub telemetry: TelemetryConfig,
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?} is not valid: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("store timeout must be greater than zero")]
    ZeroStoreTimeout,

    #[error("recency window must be greater than zero")]
    ZeroRecencyWindow,

    #[error("leaderboard limit must be greater than zero")]
    ZeroLeaderboardLimit,

    #[error("scoring rules rejected: {0}")]
    InvalidScoring(String),

    #[error("file storage needs a data directory")]
    MissingDataDir,
}

/// Repository backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "file" | "json" => Ok(StorageBackend::File),
            other => Err(format!("unknown storage backend {other:?}")),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Data directory of the file backend.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::from("./data/matches"),
        }
    }
}

impl DuelConfig {
    /// Loads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            telemetry: TelemetryConfig::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(dir) = lookup("DUEL_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
            config.storage.backend = StorageBackend::File;
        }
        if let Some(backend) = parse(&lookup, "DUEL_STORAGE")? {
            config.storage.backend = backend;
        }

        if let Some(secs) = parse::<u64, _>(&lookup, "DUEL_RECENT_WINDOW_SECS")? {
            config.classifier.recency_window_ms = secs.saturating_mul(1000);
        }
        if let Some(ms) = parse(&lookup, "DUEL_STORE_TIMEOUT_MS")? {
            config.processor.store_timeout_ms = ms;
        }
        if let Some(limit) = parse(&lookup, "DUEL_MAX_LEADERBOARD")? {
            config.processor.max_leaderboard_limit = limit;
        }

        let rules = &mut config.scoring;
        let overrides: [(&str, &mut u32); 7] = [
            ("DUEL_POINTS_PER_GOAL", &mut rules.points_per_goal),
            ("DUEL_POINTS_PER_SAVE", &mut rules.points_per_save),
            ("DUEL_PERFECT_ATTACK_BONUS", &mut rules.perfect_attack_bonus),
            ("DUEL_PERFECT_DEFENSE_BONUS", &mut rules.perfect_defense_bonus),
            ("DUEL_WIN_BONUS", &mut rules.win_bonus),
            ("DUEL_DRAW_BONUS", &mut rules.draw_bonus),
            ("DUEL_STREAK_BONUS", &mut rules.streak_bonus),
        ];
        for (key, slot) in overrides {
            if let Some(value) = parse(&lookup, key)? {
                *slot = value;
            }
        }

        Ok(config)
    }

    /// Rejects configurations the runtime cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processor.store_timeout_ms == 0 {
            return Err(ConfigError::ZeroStoreTimeout);
        }
        if self.classifier.recency_window_ms == 0 {
            return Err(ConfigError::ZeroRecencyWindow);
        }
        if self.processor.max_leaderboard_limit == 0 {
            return Err(ConfigError::ZeroLeaderboardLimit);
        }
        if self.storage.backend == StorageBackend::File
            && self.storage.data_dir.as_os_str().is_empty()
        {
            return Err(ConfigError::MissingDataDir);
        }
        self.scoring
            .validate()
            .map_err(|e| ConfigError::InvalidScoring(e.to_string()))
    }
}

fn parse<V, F>(lookup: &F, key: &str) -> Result<Option<V>, ConfigError>
where
    V: FromStr,
    V::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: V::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}
