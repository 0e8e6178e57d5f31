//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr so that stdout carries only calculator output.
//! `RUST_LOG` takes precedence over the `-v` count.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Map the number of `-v` flags to a level.
///
/// - 0: warn
/// - 1: info
/// - 2: debug
/// - 3+: trace
pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();
    // Dependencies stay at warn
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,calcflow={}", level)))
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(verbosity: u8) -> Result<()> {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(level_from_verbosity(verbosity)))
        .with(layer)
        .try_init()?;
    Ok(())
}
