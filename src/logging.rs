//! Tracing initialisation.

use tracing_subscriber::{EnvFilter, fmt};

use linkdrop_core::config::logging::LoggingConfig;

/// Initialize tracing/logging for the host application.
///
/// `RUST_LOG` takes precedence over the configured level. Must be called
/// at most once per process.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}
