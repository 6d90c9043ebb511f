//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

const LOG_FILE_NAME: &str = "wallet-nav.log";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/wallet-nav/logs/` (platform data dir).
/// stdout stays free for the headless NDJSON stream.
/// Log level is controlled by `WALLET_NAV_LOG` environment variable.
///
/// # Examples
/// ```bash
/// WALLET_NAV_LOG=debug wallet-nav
/// WALLET_NAV_LOG=wallet_nav_app=trace wallet-nav
/// ```
pub fn init() -> Result<()> {
    init_in(get_log_directory())
}

/// Initialize logging into an explicit directory
pub fn init_in(log_dir: PathBuf) -> Result<()> {
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    let env_filter = EnvFilter::try_from_env("WALLET_NAV_LOG")
        .unwrap_or_else(|_| EnvFilter::new("wallet_nav=info,wallet_nav_app=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("wallet-nav starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
pub fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("wallet-nav").join("logs")
}
