//! redb-based local persistence adapter
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `collections` | collection name | JSON blob | Whole-collection snapshots |
//! | `meta` | `schema_version` | `u32` | Layout version tag |
//!
//! Each collection (`pending_reports`, `report_history`, `settings`) is an
//! independently keyed blob, always replaced whole. The adapter never
//! originates data: it is the durability mirror of the in-memory state.
//!
//! # Durability
//!
//! redb commits are persistent as soon as `commit()` returns (copy-on-write
//! with atomic pointer swap), so a crash mid-write leaves the previous
//! snapshot intact.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use shared::models::{IssueReport, PendingReport, UserSettings};

/// Collection blobs: key = collection name, value = JSON-serialized snapshot
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

/// Store metadata: key = "schema_version", value = layout version
const META_TABLE: TableDefinition<&str, u32> = TableDefinition::new("meta");

const PENDING_KEY: &str = "pending_reports";
const HISTORY_KEY: &str = "report_history";
const SETTINGS_KEY: &str = "settings";

const SCHEMA_VERSION_KEY: &str = "schema_version";
const SCHEMA_VERSION: u32 = 1;

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

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u32, expected: u32 },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Local store backed by redb
#[derive(Clone)]
pub struct LocalStore {
    db: Arc<Database>,
}

impl LocalStore {
    /// Open or create the database at the given path.
    ///
    /// A fresh database is stamped with the current schema version; an
    /// existing database with a different version fails to open.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::initialize(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::initialize(db)
    }

    fn initialize(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;

            let mut meta = write_txn.open_table(META_TABLE)?;
            let existing = meta.get(SCHEMA_VERSION_KEY)?.map(|g| g.value());
            match existing {
                None => {
                    meta.insert(SCHEMA_VERSION_KEY, SCHEMA_VERSION)?;
                }
                Some(found) if found != SCHEMA_VERSION => {
                    return Err(StorageError::SchemaVersion {
                        found,
                        expected: SCHEMA_VERSION,
                    });
                }
                Some(_) => {}
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Blob Operations ==========

    fn save_blob<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let bytes = serde_json::to_vec(value)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;
            table.insert(key, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn load_blob<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;
        match table.get(key)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    // ========== Collection Snapshots ==========

    /// Replace the pending-reports collection
    pub fn save_pending(&self, pending: &[PendingReport]) -> StorageResult<()> {
        self.save_blob(PENDING_KEY, &pending)
    }

    /// Load the pending-reports collection (empty when never written)
    pub fn load_pending(&self) -> StorageResult<Vec<PendingReport>> {
        Ok(self.load_blob(PENDING_KEY)?.unwrap_or_default())
    }

    /// Replace the report-history collection
    pub fn save_history(&self, history: &[IssueReport]) -> StorageResult<()> {
        self.save_blob(HISTORY_KEY, &history)
    }

    /// Load the report-history collection (empty when never written)
    pub fn load_history(&self) -> StorageResult<Vec<IssueReport>> {
        Ok(self.load_blob(HISTORY_KEY)?.unwrap_or_default())
    }

    /// Replace the user settings snapshot
    pub fn save_settings(&self, settings: &UserSettings) -> StorageResult<()> {
        self.save_blob(SETTINGS_KEY, settings)
    }

    /// Load the user settings snapshot, if any
    pub fn load_settings(&self) -> StorageResult<Option<UserSettings>> {
        self.load_blob(SETTINGS_KEY)
    }

    /// Replace both report collections in a single write transaction.
    ///
    /// This is the promotion commit: a pending entry leaves one collection
    /// and its report enters the other atomically.
    pub fn save_pending_and_history(
        &self,
        pending: &[PendingReport],
        history: &[IssueReport],
    ) -> StorageResult<()> {
        let pending_bytes = serde_json::to_vec(&pending)?;
        let history_bytes = serde_json::to_vec(&history)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;
            table.insert(PENDING_KEY, pending_bytes.as_slice())?;
            table.insert(HISTORY_KEY, history_bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove both report collections. Settings survive.
    pub fn clear_reports(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;
            table.remove(PENDING_KEY)?;
            table.remove(HISTORY_KEY)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
