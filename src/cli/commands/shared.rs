//! Shared components for CLI commands
//!
//! Logging setup, configuration loading and the summary every command
//! returns to `main`.

use crate::cli::args::Args;
use crate::config::Config;
use crate::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// What a command did, for the exit summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandSummary {
    pub files_processed: usize,
    pub events: usize,
    pub rows: usize,
    pub errors_encountered: usize,
    pub elapsed: Duration,
}

/// Format a byte count in human-readable units
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` wins over the computed level when set.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("mx_results={}", log_level)))
        .map_err(|e| Error::configuration(format!("invalid log level '{}': {}", log_level, e)))?;

    let layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    let initialized = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_timer(fmt::time::uptime()))
            .try_init()
    };
    initialized.map_err(|e| Error::configuration(format!("logging already initialized: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration: defaults, config file, then environment
///
/// Command-line overrides are applied by each command.
pub fn load_configuration(args: &Args) -> Result<Config> {
    Config::load(args.config_file.as_deref())
}
