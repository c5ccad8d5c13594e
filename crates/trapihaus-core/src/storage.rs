//! Persistent key-value storage for the sign-in flag.
//!
//! The gate only ever touches one key, but storage is modelled as a small
//! string key-value store so the backing can be swapped:
//! - [`RedbStore`] keeps the flag in a redb database file on disk
//! - [`MemoryStore`] keeps it in memory (tests, and the fallback when the
//!   database cannot be opened)

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use redb::{Database, TableDefinition};

use crate::error::SessionError;

/// Namespaced key under which the sign-in flag is persisted.
pub const STORAGE_KEY: &str = "@trapihaus/isSignedIn";

/// Stored value meaning "signed in". Anything else means signed out.
pub const SIGNED_IN_SENTINEL: &str = "1";

const KV_TABLE: TableDefinition<&str, &str> = TableDefinition::new("kv");

/// String key-value store backing the session flag.
///
/// Implementations are blocking; the gate calls them from
/// `tokio::task::spawn_blocking`.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Insert or overwrite a value.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Storage layer using redb for ACID-compliant persistence
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<RwLock<Database>>,
}

impl RedbStore {
    /// Open (or create) the database at the given path.
    ///
    /// This will:
    /// - Create the parent directory if it doesn't exist
    /// - Initialize the database file
    /// - Create the key-value table
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV_TABLE)?;
        }
        write_txn.commit()?;

        tracing::debug!(path = %path.display(), "Opened session store");

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
        })
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;

        Ok(table.get(key)?.map(|v| v.value().to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// In-memory store. Contents are lost when the process exits.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries.write().insert(key.into(), value.into());
        store
    }

    /// Snapshot of a raw value, bypassing the trait.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (RedbStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = RedbStore::open(temp_dir.path().join("session.redb")).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_redb_missing_key_is_none() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_redb_set_get_remove() {
        let (store, _dir) = create_test_store();

        store.set(STORAGE_KEY, SIGNED_IN_SENTINEL).unwrap();
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("1"));

        store.set(STORAGE_KEY, "0").unwrap();
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("0"));

        store.remove(STORAGE_KEY).unwrap();
        assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_redb_remove_absent_key() {
        let (store, _dir) = create_test_store();
        store.remove("@trapihaus/nothing").unwrap();
    }

    #[test]
    fn test_redb_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("session.redb");

        {
            let store = RedbStore::open(&path).unwrap();
            store.set(STORAGE_KEY, SIGNED_IN_SENTINEL).unwrap();
        }

        let reopened = RedbStore::open(&path).unwrap();
        assert_eq!(reopened.get(STORAGE_KEY).unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::with_entry(STORAGE_KEY, "1");
        assert_eq!(store.peek(STORAGE_KEY).as_deref(), Some("1"));

        store.remove(STORAGE_KEY).unwrap();
        assert_eq!(store.get(STORAGE_KEY).unwrap(), None);

        // Clones share entries
        let clone = store.clone();
        clone.set(STORAGE_KEY, "1").unwrap();
        assert_eq!(store.peek(STORAGE_KEY).as_deref(), Some("1"));
    }
}
