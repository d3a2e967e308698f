//! Record store backends
//!
//! Durable storage of exercise-set records plus the exercise catalog,
//! selected at startup: a SQLite table (multi-user) or a flat CSV file
//! (single-user). Both expose the same operations; there is no in-memory
//! working copy, every read goes to the backend.

mod file;
mod sqlite;

pub use file::FileStore;
pub use sqlite::SqliteStore;

use crate::catalog::CatalogAdd;
use crate::records::SetRecord;
use crate::Result;

/// Pluggable record store
pub enum RecordStore {
    Sqlite(SqliteStore),
    File(FileStore),
}

impl RecordStore {
    /// Load all records for the owner, in insertion order
    ///
    /// The file backend is single-user and ignores the owner.
    pub async fn load(&self, owner: &str) -> Result<Vec<SetRecord>> {
        match self {
            RecordStore::Sqlite(store) => store.load(owner).await,
            RecordStore::File(store) => store.load().await,
        }
    }

    /// Durably add records; never drops previously stored ones
    pub async fn append(&self, owner: &str, records: &[SetRecord]) -> Result<()> {
        match self {
            RecordStore::Sqlite(store) => store.append(owner, records).await,
            RecordStore::File(store) => store.append(records).await,
        }
    }

    /// Remove exactly the record at `index` of the loaded sequence
    ///
    /// Out of bounds is `Error::NotFound`.
    pub async fn delete_at(&self, owner: &str, index: usize) -> Result<()> {
        match self {
            RecordStore::Sqlite(store) => store.delete_at(owner, index).await,
            RecordStore::File(store) => store.delete_at(index).await,
        }
    }

    /// Truncate all records for the owner; idempotent
    pub async fn delete_all(&self, owner: &str) -> Result<()> {
        match self {
            RecordStore::Sqlite(store) => store.delete_all(owner).await,
            RecordStore::File(store) => store.delete_all().await,
        }
    }

    /// Ordered exercise catalog, seeded with defaults on first use
    pub async fn catalog(&self, owner: &str) -> Result<Vec<String>> {
        match self {
            RecordStore::Sqlite(store) => store.catalog(owner).await,
            RecordStore::File(store) => store.catalog().await,
        }
    }

    /// Add a catalog entry
    ///
    /// Blank names are rejected; a case-sensitive duplicate returns
    /// `CatalogAdd::AlreadyExists` without mutation.
    pub async fn catalog_add(&self, owner: &str, name: &str) -> Result<CatalogAdd> {
        match self {
            RecordStore::Sqlite(store) => store.catalog_add(owner, name).await,
            RecordStore::File(store) => store.catalog_add(name).await,
        }
    }
}
