//! Structured logging setup.

use tracing_subscriber::EnvFilter;

use crate::error::{AdminError, AdminResult};

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` wins over `log_level` when it is set and valid.
pub fn init(log_level: &str) -> AdminResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level).map_err(|err| AdminError::Settings {
            message: format!("invalid log level/filter '{}': {}", log_level, err),
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| AdminError::Settings {
            message: format!("telemetry error: {}", err),
        })
}
