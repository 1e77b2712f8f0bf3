//! Tracing subscriber setup.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::AppError;

/// Where log lines go.
pub enum LogTarget<'a> {
    /// Append to a file. The TUI owns the terminal, so this is the only way to log from it.
    File(&'a Path),
    Stderr,
    Off,
}

/// Install the global subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn setup(target: LogTarget<'_>) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt::Subscriber::builder()
        .with_timer(fmt::time::ChronoUtc::rfc_3339())
        .with_level(true)
        .with_env_filter(env_filter);

    let installed = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let subscriber = builder.with_ansi(false).with_writer(Mutex::new(file)).finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        LogTarget::Stderr => {
            let subscriber = builder.with_ansi(true).with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)
        }
    };
    installed.map_err(|e| AppError::Log(e.to_string()))
}
