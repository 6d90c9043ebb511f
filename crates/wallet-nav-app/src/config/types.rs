//! Configuration types for wallet-nav
//!
//! Defines:
//! - `Settings` - Global application settings
//! - Related sub-sections

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub security: SecuritySettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,
}

impl Settings {
    /// How long the app may stay in background before it re-locks
    pub fn relock_delay(&self) -> Duration {
        Duration::from_secs(self.security.relock_delay_secs)
    }

    /// Directory holding the credential and key-value stores.
    ///
    /// Falls back to the platform data dir, then to `./.wallet-nav`.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|d| d.join("wallet-nav")))
            .unwrap_or_else(|| PathBuf::from(".wallet-nav"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SecuritySettings {
    /// Seconds in background before the passcode is required again
    #[serde(default = "default_relock_delay_secs")]
    pub relock_delay_secs: u64,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            relock_delay_secs: default_relock_delay_secs(),
        }
    }
}

fn default_relock_delay_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Override for the data directory (empty = platform default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Browser used for menu links (empty = system default)
    #[serde(default)]
    pub browser: String,
}
