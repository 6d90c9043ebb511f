//! Configuration file parsing for wallet-nav
//!
//! Supports:
//! - `<config dir>/wallet-nav/config.toml` - Global settings

pub mod settings;
pub mod types;

pub use settings::{default_config_dir, init_config_dir, load_settings, save_settings};
pub use types::*;
