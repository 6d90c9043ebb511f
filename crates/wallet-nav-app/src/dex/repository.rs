//! Pair list storage

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wallet_nav_core::prelude::*;
use wallet_nav_core::SmartPair;

use crate::storage::JsonFile;

pub const PAIRS_FILENAME: &str = "pairs.json";

/// Source of market pairs and their checked flags
#[cfg_attr(test, mockall::automock)]
pub trait PairsRepository: Send + Sync {
    fn list_pairs(&self) -> Result<Vec<SmartPair>>;

    /// Pairs whose asset names or ids contain `query`
    fn search_pairs(&self, query: &str) -> Result<Vec<SmartPair>>;

    /// Persist `pair.is_checked` for the stored pair with the same id
    fn set_checked(&self, pair: &SmartPair) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PairsDocument {
    pairs: Vec<SmartPair>,
}

/// Pairs kept in `pairs.json`, ordered by sort level
#[derive(Debug, Clone)]
pub struct LocalPairsRepository {
    file: JsonFile<PairsDocument>,
}

impl LocalPairsRepository {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::open(path),
        }
    }

    pub fn in_dir(data_dir: &Path) -> Self {
        Self::open(data_dir.join(PAIRS_FILENAME))
    }

    /// Add pairs that are not stored yet, keeping existing checked flags
    pub fn merge(&self, pairs: Vec<SmartPair>) -> Result<usize> {
        self.file.update(|document| {
            let mut added = 0;
            for pair in pairs {
                if !document.pairs.iter().any(|stored| stored.id == pair.id) {
                    document.pairs.push(pair);
                    added += 1;
                }
            }
            document.pairs.sort_by_key(|pair| pair.sort_level);
            added
        })
    }
}

impl PairsRepository for LocalPairsRepository {
    fn list_pairs(&self) -> Result<Vec<SmartPair>> {
        Ok(self.file.load()?.pairs)
    }

    fn search_pairs(&self, query: &str) -> Result<Vec<SmartPair>> {
        Ok(self
            .list_pairs()?
            .into_iter()
            .filter(|pair| pair.matches(query))
            .collect())
    }

    fn set_checked(&self, pair: &SmartPair) -> Result<()> {
        let found = self.file.update(|document| {
            document
                .pairs
                .iter_mut()
                .find(|stored| stored.id == pair.id)
                .map(|stored| stored.is_checked = pair.is_checked)
                .is_some()
        })?;

        if !found {
            return Err(Error::storage(format!("unknown pair '{}'", pair.id)));
        }
        debug!(pair = %pair.id, checked = pair.is_checked, "Updated pair checked flag");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wallet_nav_core::Asset;

    fn pair(amount: &str, price: &str, sort_level: i32) -> SmartPair {
        let mut pair = SmartPair::new(Asset::new(amount, amount, 8), Asset::new(price, price, 8));
        pair.sort_level = sort_level;
        pair
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let dir = tempdir().unwrap();
        let repository = LocalPairsRepository::in_dir(dir.path());

        assert!(repository.list_pairs().unwrap().is_empty());
    }

    #[test]
    fn test_merge_orders_by_sort_level_and_skips_known() {
        let dir = tempdir().unwrap();
        let repository = LocalPairsRepository::in_dir(dir.path());

        assert_eq!(
            repository
                .merge(vec![pair("ETH", "BTC", 2), pair("WAVES", "BTC", 1)])
                .unwrap(),
            2
        );
        assert_eq!(repository.merge(vec![pair("ETH", "BTC", 0)]).unwrap(), 0);

        let ids: Vec<_> = repository
            .list_pairs()
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["WAVES/BTC", "ETH/BTC"]);
    }

    #[test]
    fn test_search_filters_by_asset() {
        let dir = tempdir().unwrap();
        let repository = LocalPairsRepository::in_dir(dir.path());
        repository
            .merge(vec![pair("WAVES", "BTC", 0), pair("ETH", "USD", 1)])
            .unwrap();

        let found = repository.search_pairs("usd").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "ETH/USD");
        assert_eq!(repository.search_pairs("").unwrap().len(), 2);
    }

    #[test]
    fn test_set_checked_persists_flag() {
        let dir = tempdir().unwrap();
        let repository = LocalPairsRepository::in_dir(dir.path());
        let waves = pair("WAVES", "BTC", 0);
        repository.merge(vec![waves.clone()]).unwrap();

        repository.set_checked(&waves.toggled()).unwrap();

        assert!(repository.list_pairs().unwrap()[0].is_checked);
    }

    #[test]
    fn test_set_checked_unknown_pair_fails() {
        let dir = tempdir().unwrap();
        let repository = LocalPairsRepository::in_dir(dir.path());

        assert!(repository.set_checked(&pair("A", "B", 0)).is_err());
    }
}
