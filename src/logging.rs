//! Logging setup for Turnero.
//!
//! Output goes to stdout and, unless `logging.file` is empty, is appended to
//! a log file. `RUST_LOG` overrides the configured level when set.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{Result, TurneroError};

/// Crates whose per-query or per-connection chatter is capped at `warn`.
const QUIET_TARGETS: &[&str] = &["sqlx", "hyper", "tower"];

/// Map a configured level name to a tracing level. Unknown names fall back
/// to `info`.
fn parse_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Directive string for the configured level.
fn directives(level: &str) -> String {
    let level = parse_level(level);
    let mut out = level.to_string().to_lowercase();
    if level > Level::WARN {
        for target in QUIET_TARGETS {
            out.push_str(&format!(",{target}=warn"));
        }
    }
    out
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)))
}

/// Install the global subscriber.
///
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level);
    let console = tracing_subscriber::fmt::layer().with_target(true);

    if config.file.trim().is_empty() {
        return tracing_subscriber::registry()
            .with(console)
            .with(filter)
            .try_init()
            .map_err(|e| TurneroError::Config(format!("logging: {e}")));
    }

    let path = Path::new(&config.file);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = Arc::new(OpenOptions::new().create(true).append(true).open(path)?);

    tracing_subscriber::registry()
        .with(console.with_writer(std::io::stdout.and(file)).with_ansi(false))
        .with(filter)
        .try_init()
        .map_err(|e| TurneroError::Config(format!("logging: {e}")))
}

/// Console-only logging, used when [`init`] fails.
pub fn init_console_only(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(build_filter(level))
        .try_init();
}
