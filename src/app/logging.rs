use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// File name prefix for the daily log files.
pub const LOG_FILE_PREFIX: &str = "lyrica.log";

/// Send logs to a daily rolling file under `log_dir`. The terminal belongs
/// to the panel, so nothing is written to stdout.
///
/// `RUST_LOG` wins over `level` when set. Keep the returned guard alive
/// for the whole run or buffered lines are lost.
pub fn init_logging(log_dir: &Path, level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("could not create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("lyrica={level}")))
        .context("invalid log level")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .with(filter)
        .try_init()
        .context("logging already initialised")?;

    Ok(guard)
}
