//! Tracing subscriber setup.
//!
//! The terminal belongs to the TUI, so events are only recorded when a log
//! file is configured.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Returns an error message when the log file
/// cannot be opened; the app keeps running without logging in that case.
pub fn init(settings: &LoggingSettings) -> Result<(), String> {
    let Some(path) = settings.file.as_deref() else {
        return Ok(());
    };

    let file = open_log_file(path)
        .map_err(|e| format!("failed to open log file {}: {e}", path.display()))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Arc::new(file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter(&settings.level))
        .with(file_layer)
        .try_init()
        .map_err(|e| format!("failed to install tracing subscriber: {e}"))
}
