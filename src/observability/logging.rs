//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Send log lines to the configured file, or stderr when none is set
//! - Honour `RUST_LOG`, defaulting to `edge_proxy=info,tower_http=info`
//!
//! # Design Decisions
//! - Writes go through a non-blocking appender; the returned guard must live
//!   as long as the process so buffered lines are flushed on exit
//! - The file is appended to and never rotated

use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "edge_proxy=info,tower_http=info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: InitError,
    },

    #[error("log file path {0:?} has no file name")]
    NoFileName(String),

    #[error("logging already initialized: {0}")]
    Init(#[from] TryInitError),
}

/// Install the global subscriber writing to `log_path` (stderr if empty).
pub fn init(log_path: &str) -> Result<WorkerGuard, LoggingError> {
    let (writer, guard) = if log_path.is_empty() {
        tracing_appender::non_blocking(std::io::stderr())
    } else {
        tracing_appender::non_blocking(open_log_file(log_path)?)
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(log_path.is_empty())
                .with_target(true),
        )
        .try_init()?;

    Ok(guard)
}

fn open_log_file(log_path: &str) -> Result<RollingFileAppender, LoggingError> {
    let path = Path::new(log_path);
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::NoFileName(log_path.to_string()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(|source| LoggingError::File {
            path: log_path.to_string(),
            source,
        })
}
