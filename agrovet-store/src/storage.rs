//! redb-based storage layer for the entity collections
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `collections` | collection key | JSON array of records | Whole-collection payloads |
//! | `session` | `current_user` | JSON `Session` | Login marker |
//!
//! Every collection is persisted as a unit: callers read the full JSON
//! array, mutate in memory, and write the array back. `write_many` commits
//! several collections in one transaction, which is what makes the
//! sale-recording unit of work atomic.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for collection payloads: key = collection key, value = JSON array
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

/// Table for the session marker: key = "current_user", value = JSON Session
const SESSION_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("session");

const CURRENT_USER_KEY: &str = "current_user";

// Collection keys
pub const INVENTORY: &str = "inventory";
pub const CUSTOMERS: &str = "customers";
pub const SALES: &str = "sales";
pub const ADMINS: &str = "admins";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Collection storage backed by redb
#[derive(Clone)]
pub struct Storage {
    db: Arc<Database>,
}

impl Storage {
    /// Open or create the database at the given path
    ///
    /// redb commits are durable as soon as `commit()` returns, and the file
    /// is always left in a consistent state, so an interrupted process never
    /// corrupts the collections.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init_tables(db)
    }

    /// Open an in-memory database (for tests)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init_tables(db)
    }

    fn init_tables(db: Database) -> StorageResult<Self> {
        // Create tables if they don't exist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
            let _ = write_txn.open_table(SESSION_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Collection Payloads ==========

    /// Read the raw payload stored under a collection key
    pub fn read(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    /// Check whether a collection key holds a payload
    pub fn contains(&self, key: &str) -> StorageResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;
        Ok(table.get(key)?.is_some())
    }

    /// Write one collection payload
    pub fn write(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        self.write_many(&[(key, value)])
    }

    /// Write several collection payloads in a single committed transaction
    pub fn write_many(&self, entries: &[(&str, &[u8])]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;
            for (key, value) in entries {
                table.insert(*key, *value)?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    // ========== Session Marker ==========

    /// Read the current session payload
    pub fn read_session(&self) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SESSION_TABLE)?;
        Ok(table.get(CURRENT_USER_KEY)?.map(|guard| guard.value().to_vec()))
    }

    /// Store the session payload
    pub fn write_session(&self, value: &[u8]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SESSION_TABLE)?;
            table.insert(CURRENT_USER_KEY, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove the session payload
    pub fn clear_session(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SESSION_TABLE)?;
            table.remove(CURRENT_USER_KEY)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_key() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(storage.read(INVENTORY).unwrap().is_none());
        assert!(!storage.contains(INVENTORY).unwrap());
    }

    #[test]
    fn test_write_read_roundtrip() {
        let storage = Storage::open_in_memory().unwrap();
        storage.write(INVENTORY, b"[1,2,3]").unwrap();

        assert!(storage.contains(INVENTORY).unwrap());
        assert_eq!(storage.read(INVENTORY).unwrap().unwrap(), b"[1,2,3]");
    }

    #[test]
    fn test_write_overwrites() {
        let storage = Storage::open_in_memory().unwrap();
        storage.write(CUSTOMERS, b"[]").unwrap();
        storage.write(CUSTOMERS, b"[{}]").unwrap();

        assert_eq!(storage.read(CUSTOMERS).unwrap().unwrap(), b"[{}]");
    }

    #[test]
    fn test_write_many_commits_all_keys() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .write_many(&[(INVENTORY, b"[1]".as_slice()), (SALES, b"[2]".as_slice())])
            .unwrap();

        assert_eq!(storage.read(INVENTORY).unwrap().unwrap(), b"[1]");
        assert_eq!(storage.read(SALES).unwrap().unwrap(), b"[2]");
    }

    #[test]
    fn test_session_set_get_clear() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(storage.read_session().unwrap().is_none());

        storage.write_session(b"{\"username\":\"amina\"}").unwrap();
        assert!(storage.read_session().unwrap().is_some());

        storage.clear_session().unwrap();
        assert!(storage.read_session().unwrap().is_none());

        // Clearing an empty session is a no-op
        storage.clear_session().unwrap();
    }

    #[test]
    fn test_file_backed_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.redb");

        {
            let storage = Storage::open(&path).unwrap();
            storage.write(SALES, b"[7]").unwrap();
        }

        let storage = Storage::open(&path).unwrap();
        assert_eq!(storage.read(SALES).unwrap().unwrap(), b"[7]");
    }
}
