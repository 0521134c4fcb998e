//! Store Module
//!
//! `DataStore` is the sole authority for reading and persisting the entity
//! collections, and the one place that composes mutations across them.
//! Every operation is a whole-collection read-modify-write; there is no
//! partial update path.

pub mod customers;
pub mod inventory;
pub mod sales;

use crate::config::Config;
use crate::seed;
use crate::storage::{self, Storage, StorageError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Data store over the persisted entity collections
///
/// Cheap to clone; all clones share the same underlying database.
#[derive(Clone)]
pub struct DataStore {
    storage: Storage,
}

impl DataStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Open a file-backed store
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(Storage::open(path)?))
    }

    /// Open an in-memory store (for tests)
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(Storage::open_in_memory()?))
    }

    /// Open the store described by a [`Config`], creating the working
    /// directory and seeding demonstration data when configured to
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let store = Self::open(config.db_path())?;
        if config.seed_demo_data {
            store.initialize()?;
        }
        Ok(store)
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Seed demonstration records on first run
    ///
    /// Idempotent: once the inventory key exists this never writes again,
    /// so existing data is never overwritten.
    pub fn initialize(&self) -> StoreResult<()> {
        if self.storage.contains(storage::INVENTORY)? {
            return Ok(());
        }

        let inventory = Self::encode(&seed::demo_inventory())?;
        let customers = Self::encode(&seed::demo_customers())?;
        let sales = Self::encode(&seed::demo_sales())?;
        self.storage.write_many(&[
            (storage::INVENTORY, inventory.as_slice()),
            (storage::CUSTOMERS, customers.as_slice()),
            (storage::SALES, sales.as_slice()),
        ])?;

        tracing::info!("Seeded demonstration data");
        Ok(())
    }

    // ========== Collection Access ==========

    /// Load a collection, degrading to an empty list when the payload is
    /// absent or unparseable
    pub(crate) fn load<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Vec<T>> {
        let Some(bytes) = self.storage.read(key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_slice(&bytes) {
            Ok(records) => Ok(records),
            Err(err) => {
                tracing::warn!(
                    collection = key,
                    error = %err,
                    "Unparseable collection payload, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    pub(crate) fn encode<T: Serialize>(records: &[T]) -> StoreResult<Vec<u8>> {
        Ok(serde_json::to_vec(records).map_err(StorageError::from)?)
    }

    pub(crate) fn save<T: Serialize>(&self, key: &str, records: &[T]) -> StoreResult<()> {
        let bytes = Self::encode(records)?;
        self.storage.write(key, &bytes)?;
        Ok(())
    }
}

/// Next sequential id: max(existing) + 1, or 1 on an empty collection
pub(crate) fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::INVENTORY;
    use shared::models::InventoryItem;

    #[test]
    fn test_next_id() {
        assert_eq!(next_id([].into_iter()), 1);
        assert_eq!(next_id([1, 2, 3].into_iter()), 4);
        assert_eq!(next_id([5, 2].into_iter()), 6);
    }

    #[test]
    fn test_initialize_seeds_once() {
        let store = DataStore::open_in_memory().unwrap();
        store.initialize().unwrap();

        let inventory = store.inventory().unwrap();
        assert!(!inventory.is_empty());
        assert!(!store.customers().unwrap().is_empty());
        assert!(!store.sales().unwrap().is_empty());

        // Mutate, then initialize again: data must survive
        store.delete_inventory_item(inventory[0].id).unwrap();
        let remaining = store.inventory().unwrap().len();

        store.initialize().unwrap();
        assert_eq!(store.inventory().unwrap().len(), remaining);
    }

    #[test]
    fn test_load_missing_collection_is_empty() {
        let store = DataStore::open_in_memory().unwrap();
        let inventory: Vec<InventoryItem> = store.load(INVENTORY).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_load_malformed_payload_degrades_to_empty() {
        let store = DataStore::open_in_memory().unwrap();
        store.storage().write(INVENTORY, b"not json at all").unwrap();

        let inventory: Vec<InventoryItem> = store.load(INVENTORY).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_file_backed_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agrovet.redb");

        let before = {
            let store = DataStore::open(&path).unwrap();
            store.initialize().unwrap();
            store.inventory().unwrap()
        };

        let store = DataStore::open(&path).unwrap();
        assert_eq!(store.inventory().unwrap(), before);
    }

    #[test]
    fn test_from_config_creates_and_seeds() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_work_dir(dir.path().join("data").to_str().unwrap());

        let store = DataStore::from_config(&config).unwrap();
        assert!(!store.inventory().unwrap().is_empty());
        assert!(config.db_path().exists());
    }
}
