//! Persisted application flags
//!
//! A single record stored under a fixed key in the key-value store. Loaded at
//! engine start and saved when onboarding completes.

use serde::{Deserialize, Serialize};
use wallet_nav_core::prelude::*;

use crate::storage::KeyValueStore;

/// Key under which [`AppSettings`] is stored
pub const APP_SETTINGS_KEY: &str = "com.waves.application.settings";

/// Application-wide persisted flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Whether the hello/onboarding flow has been completed once
    #[serde(default)]
    pub has_shown_onboarding: bool,
}

/// Explicit handle to the persisted [`AppSettings`] record
#[derive(Debug, Clone)]
pub struct SettingsStore {
    store: KeyValueStore,
}

impl SettingsStore {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    /// Read the record, creating it with defaults on first read
    pub fn load(&self) -> Result<AppSettings> {
        match self.store.get::<AppSettings>(APP_SETTINGS_KEY)? {
            Some(settings) => Ok(settings),
            None => {
                let settings = AppSettings::default();
                self.store.set(APP_SETTINGS_KEY, &settings)?;
                debug!("Created default application settings");
                Ok(settings)
            }
        }
    }

    pub fn save(&self, settings: &AppSettings) -> Result<()> {
        self.store.set(APP_SETTINGS_KEY, settings)
    }

    /// Load, mutate in place and save
    pub fn update(&self, mutate: impl FnOnce(&mut AppSettings)) -> Result<AppSettings> {
        let mut settings = self.load()?;
        mutate(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &std::path::Path) -> SettingsStore {
        SettingsStore::new(KeyValueStore::open(dir.join("defaults.json")))
    }

    #[test]
    fn test_first_load_creates_default_record() {
        let dir = tempdir().unwrap();
        let settings = store_in(dir.path());

        let loaded = settings.load().unwrap();

        assert!(!loaded.has_shown_onboarding);
        let kv = KeyValueStore::open(dir.path().join("defaults.json"));
        assert!(kv.get::<serde_json::Value>(APP_SETTINGS_KEY).unwrap().is_some());
    }

    #[test]
    fn test_update_persists_across_handles() {
        let dir = tempdir().unwrap();
        store_in(dir.path())
            .update(|s| s.has_shown_onboarding = true)
            .unwrap();

        let reopened = store_in(dir.path()).load().unwrap();
        assert!(reopened.has_shown_onboarding);
    }

    #[test]
    fn test_json_shape_uses_camel_case_key() {
        let json = serde_json::to_string(&AppSettings {
            has_shown_onboarding: true,
        })
        .unwrap();
        assert_eq!(json, r#"{"hasShownOnboarding":true}"#);
    }

    #[test]
    fn test_missing_field_defaults_to_false() {
        let settings: AppSettings = serde_json::from_str("{}").unwrap();
        assert!(!settings.has_shown_onboarding);
    }
}
