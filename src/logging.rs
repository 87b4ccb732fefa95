//! Logging
//!
//! Installs the global `tracing` subscriber for hosts that do not bring their own.

use tracing_subscriber::EnvFilter;

use crate::error::{BoardError, BoardResult};

/// Install a fmt subscriber. `RUST_LOG` wins over `default_filter`.
///
/// Fails with `BoardError::Logging` if a global subscriber is already set.
pub fn init_logging(default_filter: &str) -> BoardResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| BoardError::Logging {
            message: e.to_string(),
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| BoardError::Logging {
            message: e.to_string(),
        })
}
