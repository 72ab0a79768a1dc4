use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;
use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Level used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LEVEL: &str = "warn";

/// Formatter settings shared by every log destination.
fn subscriber_builder() -> SubscriberBuilder<DefaultFields, Format, EnvFilter> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
}

/// `<log_dir>/net_url_<YYYYmmdd_HHMMSS>.log`
fn log_file_path(log_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    log_dir.join(format!("net_url_{}.log", timestamp))
}

/// Installs a global subscriber writing to a new timestamped file in `log_dir`.
pub fn init_logger(log_dir: &str) -> Result<()> {
    let log_dir = Path::new(log_dir);
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let log_file = log_file_path(log_dir);
    let writer = fs::File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    let subscriber = subscriber_builder()
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Logger initialized, writing to {}", log_file.display());
    Ok(())
}

/// Installs a global subscriber on stderr.
pub fn init_stderr_logger() -> Result<()> {
    let subscriber = subscriber_builder().with_writer(std::io::stderr).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
