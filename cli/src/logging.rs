//! Tracing subscriber for the CLI. Logs go to stderr and, when enabled, to a
//! per-process file; stdout carries command output only.
use std::path::PathBuf;

use tmstore_core::api::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps the file writer flushing until dropped.
pub struct LogGuard(Option<WorkerGuard>);

/// `RUST_LOG` wins when set and non-blank; otherwise the configured level.
pub fn env_filter(logging: &LoggingConfig, rust_log: Option<&str>) -> Result<EnvFilter, String> {
    match rust_log.map(str::trim).filter(|v| !v.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives),
        None => EnvFilter::try_new(logging.level.trim()),
    }
    .map_err(|e| format!("invalid log filter: {e}"))
}

/// Directory for the log file. A blank `directory` means the OS temp dir.
pub fn log_dir(logging: &LoggingConfig) -> PathBuf {
    logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("tmstore"))
}

pub fn init(logging: &LoggingConfig) -> Result<LogGuard, String> {
    if !logging.enabled {
        return Ok(LogGuard(None));
    }
    if !logging.console && !logging.file {
        return Err("logging enabled but both console and file output are off".to_string());
    }

    let filter = env_filter(logging, std::env::var("RUST_LOG").ok().as_deref())?;

    let mut guard = None;
    let file_layer = if logging.file {
        let dir = log_dir(logging);
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("create log dir {}: {e}", dir.display()))?;
        let appender =
            tracing_appender::rolling::never(dir, format!("tmstore.{}.log", std::process::id()));
        let (writer, file_guard) = tracing_appender::non_blocking(appender);
        guard = Some(file_guard);
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
    } else {
        None
    };

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| format!("install tracing subscriber: {e}"))?;

    Ok(LogGuard(guard))
}
