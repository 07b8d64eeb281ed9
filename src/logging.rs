//! Logging setup for inkpost.
//!
//! The `[logging]` level applies to the `inkpost` and `tower_http` targets;
//! everything else logs at `warn`. A set `RUST_LOG` replaces that filter
//! entirely.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Filter directives for a configured level. Unknown levels fall back to
/// `info`.
fn directives(level: &str) -> String {
    let level = level.trim().to_ascii_lowercase();
    let level = match level.as_str() {
        "warning" => "warn",
        l if LEVELS.contains(&l) => l,
        _ => "info",
    };
    format!("warn,inkpost={level},tower_http={level}")
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)))
}

/// Log to stdout and append to the configured file.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let path = Path::new(&config.file);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let file = File::options().create(true).append(true).open(path)?;
    let writer = std::io::stdout.and(Arc::new(file));

    tracing_subscriber::registry()
        .with(filter(&config.level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(())
}

/// Log to stdout only. Used when the log file cannot be opened.
pub fn init_console_only(level: &str) {
    tracing_subscriber::registry()
        .with(filter(level))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
