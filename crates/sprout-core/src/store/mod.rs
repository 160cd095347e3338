//! Storage layer for the plant collection
//!
//! The store is a key-value collection with atomic whole-collection and
//! whole-record writes. `put_one` refreshes `updated_at` so the mutation
//! wins future merges; `put_all` is the reconciler's intentional overwrite
//! and writes records exactly as given.

mod memory;
mod sqlite;

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;

use crate::error::Result;
use crate::models::{Plant, PlantId, SyncConfig};

/// Trait for plant collection storage operations
pub trait RecordStore {
    /// Get the whole collection
    fn get_all(&self) -> Result<Vec<Plant>>;

    /// Replace the whole collection atomically, preserving timestamps as
    /// given. Only the reconciliation engine should call this.
    fn put_all(&self, plants: &[Plant]) -> Result<()>;

    /// Get a single plant by ID
    fn get_by_id(&self, id: &PlantId) -> Result<Option<Plant>>;

    /// Insert or replace a single plant, refreshing its `updated_at`.
    ///
    /// Returns the record as stored.
    fn put_one(&self, plant: Plant) -> Result<Plant>;

    /// Load the persisted sync configuration, with defaults on first run
    fn load_sync_config(&self) -> Result<SyncConfig>;

    /// Persist the sync configuration
    fn save_sync_config(&self, config: &SyncConfig) -> Result<()>;
}
