//! Telemetry initialization
//!
//! Structured logging for the handler. Log lines go to stderr unless the
//! configuration names a log file, in which case they are appended there
//! without ANSI escapes.

use std::fs::OpenOptions;
use std::sync::Arc;

use obscura_core::Config;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber. `RUST_LOG` overrides the default
/// filter. Must be called once, before any log line is emitted.
pub fn init_telemetry(config: &Config) -> Result<(), anyhow::Error> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "obscura_handler=info,obscura_storage=info,obscura_vision=info,obscura_processing=info,tower_http=info"
            .into()
    });

    match &config.log_output_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", path, e))?;

            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Arc::new(file))
                        .with_ansi(false),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
