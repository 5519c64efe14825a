//! Logging setup: stderr plus a per-run log file.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the global subscriber.
///
/// Logs go to stderr and to `<log_dir>/<run>/client.log`. The returned guard
/// flushes the file writer on drop and must live until the program exits.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<WorkerGuard> {
    let run_dir = run_log_dir(log_dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir));
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("Failed to create log directory {}", run_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&run_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("Log file: {}/client.log", run_dir.display());

    Ok(guard)
}

/// Per-run subdirectory named after the start time.
fn run_log_dir(base: PathBuf) -> PathBuf {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    base.join(format!("run_{}", timestamp))
}

/// Platform cache directory for the client's logs.
fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "pokedex")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("pokedex").join("logs"))
}
