//! # Duel Telemetry
//!
//! Structured logging for the penalty-duel services.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use duel_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // application code
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DUEL_SERVICE_NAME` | `penalty-duel` | Service name in logs |
//! | `DUEL_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `DUEL_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |
//! | `DUEL_LOG_SOURCE` | `false` | File and line in log lines |

mod config;
mod logging;
mod tracing_setup;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use tracing_setup::{env_filter, init_tracing};

#[doc(hidden)]
pub use tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Installs logging and returns a guard to hold for the process lifetime.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    init_tracing(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Logs shutdown when dropped.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "shutting down telemetry");
    }
}

/// Span with subsystem context.
///
/// ```rust,ignore
/// let _span = duel_telemetry::subsystem_span!("submit_choice", subsystem = "action-processor").entered();
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($name:expr, $($field:tt)*) => {
        $crate::tracing::info_span!($name, $($field)*)
    };
}
