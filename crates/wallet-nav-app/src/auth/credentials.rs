//! Credential records on disk
//!
//! One record per wallet id (primary key). The passcode is stored and compared
//! as plaintext; see DESIGN.md before changing the comparison.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wallet_nav_core::prelude::*;

use crate::storage::JsonFile;

pub const CREDENTIALS_FILENAME: &str = "credentials.json";

/// Passcode and key material for one wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub id: String,
    pub key_material: String,
    pub passcode: String,
}

/// Single-file record store keyed by wallet id
#[derive(Debug, Clone)]
pub struct CredentialStore {
    file: JsonFile<BTreeMap<String, CredentialRecord>>,
}

impl CredentialStore {
    /// Open the store at `path`. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::open(path),
        }
    }

    /// Open `credentials.json` inside `data_dir`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::open(data_dir.join(CREDENTIALS_FILENAME))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn get(&self, id: &str) -> Result<Option<CredentialRecord>> {
        Ok(self.file.load()?.remove(id))
    }

    /// Insert or replace the record with the same id
    pub fn upsert(&self, record: CredentialRecord) -> Result<()> {
        let id = record.id.clone();
        let replaced = self
            .file
            .update(|records| records.insert(record.id.clone(), record).is_some())?;
        debug!(id = %id, replaced, "Stored credential record");
        Ok(())
    }

    /// Apply `mutate` to the record for `id` inside one write block.
    /// Returns `None` without writing anything if no record exists.
    pub fn modify<R>(
        &self,
        id: &str,
        mutate: impl FnOnce(&mut CredentialRecord) -> R,
    ) -> Result<Option<R>> {
        self.file
            .update(|records| records.get_mut(id).map(mutate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(id: &str, passcode: &str) -> CredentialRecord {
        CredentialRecord {
            id: id.to_string(),
            key_material: format!("key-{id}"),
            passcode: passcode.to_string(),
        }
    }

    #[test]
    fn test_file_created_on_first_write() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::in_dir(dir.path());
        assert!(!store.path().exists());
        assert_eq!(store.get("w1").unwrap(), None);

        store.upsert(record("w1", "1234")).unwrap();

        assert!(store.path().exists());
        assert_eq!(store.get("w1").unwrap(), Some(record("w1", "1234")));
    }

    #[test]
    fn test_upsert_replaces_by_primary_key() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::in_dir(dir.path());

        store.upsert(record("w1", "1234")).unwrap();
        store.upsert(record("w1", "9999")).unwrap();

        assert_eq!(store.get("w1").unwrap().unwrap().passcode, "9999");
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw.matches("\"keyMaterial\"").count(), 1);
    }

    #[test]
    fn test_modify_touches_only_that_record() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::in_dir(dir.path());
        store.upsert(record("w1", "1111")).unwrap();
        store.upsert(record("w2", "2222")).unwrap();

        let changed = store
            .modify("w1", |r| r.passcode = "0000".to_string())
            .unwrap();

        assert_eq!(changed, Some(()));
        assert_eq!(store.get("w1").unwrap().unwrap().passcode, "0000");
        assert_eq!(store.get("w2").unwrap().unwrap().passcode, "2222");
    }

    #[test]
    fn test_modify_missing_record() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::in_dir(dir.path());

        assert_eq!(store.modify("nope", |_| ()).unwrap(), None);
    }

    #[test]
    fn test_on_disk_field_names() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::in_dir(dir.path());
        store.upsert(record("w1", "1234")).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"keyMaterial\""));
        assert!(raw.contains("\"passcode\""));
    }
}
