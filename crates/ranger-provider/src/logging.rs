//! Logging setup for the `ranger-provider` binary.
//!
//! Events go to stderr so that stdout carries only the JSON response read by
//! the host. `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(false)
        .with_filter(filter);

    Registry::default()
        .with(stderr_layer)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))?;

    tracing::debug!(level, "Logging initialized");
    Ok(())
}
