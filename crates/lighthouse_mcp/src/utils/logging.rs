use tracing_subscriber::{EnvFilter, prelude::*};

use crate::errors::{StartupError, StartupResult};

/// Initialize logging based on environment configuration
///
/// Logs go to stderr; stdout carries the MCP protocol.
///
/// # Environment Variables
/// - `RUST_LOG`: Full filter directive (takes precedence)
/// - `LOG_LEVEL`: Plain level used when `RUST_LOG` is not set
///
/// # Returns
/// - `Ok(false)` if neither variable is set and logging is skipped
/// - `Ok(true)` once the subscriber is installed
pub fn init_logging() -> StartupResult<bool> {
    let env_filter = match (std::env::var("RUST_LOG"), std::env::var("LOG_LEVEL")) {
        (Ok(_), _) => EnvFilter::from_default_env(),
        (Err(_), Ok(level)) => EnvFilter::new(level),
        (Err(_), Err(_)) => return Ok(false),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| StartupError::LoggingInitialization(e.to_string()))?;

    Ok(true)
}
