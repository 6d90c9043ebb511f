//! File-backed persistence
//!
//! Every store is a single JSON document on disk. Reads are lock-free;
//! writes take an exclusive `fs2` lock on a sidecar `.lock` file, re-read the
//! document, apply the mutation and replace the file atomically (temp file +
//! rename). The file is created on first write.

pub mod key_value;

pub use key_value::KeyValueStore;

use std::fs::OpenOptions;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wallet_nav_core::prelude::*;

/// A JSON document of type `T` stored at a fixed path
#[derive(Debug)]
pub struct JsonFile<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonFile<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> JsonFile<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    /// Open a document by path. Nothing touches the disk until the first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current document, or `T::default()` if it does not exist yet
    pub fn load(&self) -> Result<T> {
        read_document(&self.path)
    }

    /// Run `mutate` against the document inside an exclusive write block
    pub fn update<R>(&self, mutate: impl FnOnce(&mut T) -> R) -> Result<R> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())
            .context("Failed to open lock file")?;

        // Blocks if another writer holds the lock; released on drop
        lock_file
            .lock_exclusive()
            .with_context(|| format!("Failed to lock {:?}", self.path))?;

        let mut document: T = read_document(&self.path)?;
        let result = mutate(&mut document);
        self.write_atomic(&document)?;

        Ok(result)
    }

    fn lock_path(&self) -> PathBuf {
        sibling_path(&self.path, "lock")
    }

    fn write_atomic(&self, document: &T) -> Result<()> {
        let temp_path = sibling_path(&self.path, "tmp");
        let content = serde_json::to_vec_pretty(document)?;

        let mut file = std::fs::File::create(&temp_path).context("Failed to create temp file")?;
        file.write_all(&content).context("Failed to write temp file")?;
        file.sync_all().context("Failed to flush temp file")?;

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace {:?}", self.path))?;

        trace!("Wrote {:?}", self.path);
        Ok(())
    }
}

/// Run store I/O on the blocking pool so a contended lock never stalls the runtime
pub async fn run_blocking<T, F>(task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| Error::storage(format!("Blocking store task failed: {}", e)))?
}

fn read_document<T: Default + DeserializeOwned>(path: &Path) -> Result<T> {
    match std::fs::read(path) {
        Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(T::default()),
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
            warn!("Failed to parse {:?}: {}", path, e);
            Error::corrupt_store(path)
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

/// `credentials.json` -> `.credentials.json.<suffix>` in the same directory
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string());
    path.with_file_name(format!(".{}.{}", file_name, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    type Counters = BTreeMap<String, u32>;

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempdir().unwrap();
        let file: JsonFile<Counters> = JsonFile::open(dir.path().join("missing.json"));

        assert!(file.load().unwrap().is_empty());
        assert!(!file.path().exists());
    }

    #[test]
    fn test_update_creates_file_and_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("counters.json");
        let file: JsonFile<Counters> = JsonFile::open(&path);

        file.update(|doc| doc.insert("a".to_string(), 1)).unwrap();

        assert!(path.exists());
        assert_eq!(file.load().unwrap().get("a"), Some(&1));
    }

    #[test]
    fn test_update_returns_closure_result() {
        let dir = tempdir().unwrap();
        let file: JsonFile<Counters> = JsonFile::open(dir.path().join("c.json"));

        let previous = file
            .update(|doc| doc.insert("a".to_string(), 1))
            .unwrap();
        assert_eq!(previous, None);

        let previous = file
            .update(|doc| doc.insert("a".to_string(), 2))
            .unwrap();
        assert_eq!(previous, Some(1));
    }

    #[test]
    fn test_clones_share_the_document() {
        let dir = tempdir().unwrap();
        let file: JsonFile<Counters> = JsonFile::open(dir.path().join("c.json"));
        let other = file.clone();

        file.update(|doc| doc.insert("x".to_string(), 7)).unwrap();

        assert_eq!(other.load().unwrap().get("x"), Some(&7));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("c.json");
        std::fs::write(&path, "{not json").unwrap();
        let file: JsonFile<Counters> = JsonFile::open(&path);

        let err = file.load().unwrap_err();
        assert!(matches!(err, Error::CorruptStore { .. }));
    }

    #[test]
    fn test_empty_file_reads_as_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("c.json");
        std::fs::write(&path, "\n").unwrap();
        let file: JsonFile<Counters> = JsonFile::open(&path);

        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_io_failure_keeps_io_variant() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let file: JsonFile<Counters> = JsonFile::open(blocker.join("c.json"));

        let err = file.update(|doc| doc.insert("a".to_string(), 1)).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_run_blocking_returns_task_result() {
        assert_eq!(run_blocking(|| Ok(7)).await.unwrap(), 7);

        let err = run_blocking(|| Err::<(), _>(Error::storage("disk full")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("c.json");
        let file: JsonFile<Counters> = JsonFile::open(&path);

        file.update(|doc| doc.insert("a".to_string(), 1)).unwrap();

        assert!(!dir.path().join(".c.json.tmp").exists());
    }
}
