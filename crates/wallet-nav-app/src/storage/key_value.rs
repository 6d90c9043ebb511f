//! String-keyed store of JSON values (the platform "user defaults" analog)

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use wallet_nav_core::prelude::*;

use super::JsonFile;

/// Key-value entries persisted in one JSON file
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    file: JsonFile<BTreeMap<String, Value>>,
}

impl KeyValueStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::open(path),
        }
    }

    /// Decode the value stored under `key`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let mut entries = self.file.load()?;
        match entries.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Encode `value` and store it under `key`, replacing any previous value
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.file.update(|entries| {
            entries.insert(key.to_string(), value);
        })?;
        debug!("Stored key {}", key);
        Ok(())
    }

    /// Remove `key`. Returns whether it existed.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let existed = self.file.update(|entries| entries.remove(key).is_some())?;
        if existed {
            debug!("Removed key {}", key);
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Flag {
        on: bool,
    }

    #[test]
    fn test_get_missing_key() {
        let dir = tempdir().unwrap();
        let store = KeyValueStore::open(dir.path().join("defaults.json"));

        let value: Option<Flag> = store.get("missing").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempdir().unwrap();
        let store = KeyValueStore::open(dir.path().join("defaults.json"));

        store.set("flag", &Flag { on: true }).unwrap();

        assert_eq!(store.get::<Flag>("flag").unwrap(), Some(Flag { on: true }));
    }

    #[test]
    fn test_keys_are_independent() {
        let dir = tempdir().unwrap();
        let store = KeyValueStore::open(dir.path().join("defaults.json"));

        store.set("a", &1u32).unwrap();
        store.set("b", &2u32).unwrap();
        store.set("a", &3u32).unwrap();

        assert_eq!(store.get::<u32>("a").unwrap(), Some(3));
        assert_eq!(store.get::<u32>("b").unwrap(), Some(2));
    }

    #[test]
    fn test_remove() {
        let dir = tempdir().unwrap();
        let store = KeyValueStore::open(dir.path().join("defaults.json"));

        store.set("a", &1u32).unwrap();
        assert!(store.remove("a").unwrap());
        assert!(!store.remove("a").unwrap());
        assert_eq!(store.get::<u32>("a").unwrap(), None);
    }

    #[test]
    fn test_type_mismatch_is_json_error() {
        let dir = tempdir().unwrap();
        let store = KeyValueStore::open(dir.path().join("defaults.json"));

        store.set("a", &"text").unwrap();
        let err = store.get::<Flag>("a").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
