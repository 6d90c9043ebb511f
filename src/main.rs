//! wallet-nav - headless navigation and passcode core for a wallet client
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use wallet_nav_app::config::{self, Settings};

/// wallet-nav - drive the wallet navigation core from stdin
#[derive(Parser, Debug)]
#[command(name = "wallet-nav")]
#[command(about = "Headless navigation and passcode core for a wallet client", long_about = None)]
struct Args {
    /// Directory holding config.toml
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Directory for credentials and app defaults (overrides config)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Seconds in background before the passcode is asked again (overrides config)
    #[arg(long, value_name = "SECS")]
    relock_secs: Option<u64>,

    /// Write a default config.toml if none exists, then exit
    #[arg(long)]
    init_config: bool,

    /// Persist the effective settings (config plus overrides) to config.toml
    #[arg(long)]
    save_config: bool,
}

impl Args {
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(dir) = &self.data_dir {
            settings.storage.data_dir = Some(dir.clone());
        }
        if let Some(secs) = self.relock_secs {
            settings.security.relock_delay_secs = secs;
        }
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // Logs go to file; stdout carries NDJSON
    wallet_nav_core::logging::init()?;

    let config_dir = args
        .config_dir
        .clone()
        .unwrap_or_else(config::default_config_dir);

    if args.init_config {
        config::init_config_dir(&config_dir)?;
        eprintln!("Config ready in {}", config_dir.display());
        return Ok(());
    }

    let mut settings = config::load_settings(&config_dir);
    args.apply_overrides(&mut settings);

    if args.save_config {
        config::save_settings(&config_dir, &settings)?;
        info!("Saved settings to {}", config_dir.display());
    }

    let result = wallet_nav::run_headless(settings).await;
    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }
    Ok(result?)
}
