//! In-memory record store (useful for testing and ephemeral runs)

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::models::{Plant, PlantId, SyncConfig};

use super::RecordStore;

/// `RecordStore` backed by a plain map, no persistence
#[derive(Default)]
pub struct MemoryRecordStore {
    plants: Mutex<BTreeMap<PlantId, Plant>>,
    config: Mutex<SyncConfig>,
}

impl MemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an initial collection, timestamps untouched
    #[must_use]
    pub fn with_plants(plants: impl IntoIterator<Item = Plant>) -> Self {
        let store = Self::new();
        {
            let mut map = store.plants.lock().unwrap_or_else(|e| e.into_inner());
            for plant in plants {
                map.insert(plant.id, plant);
            }
        }
        store
    }

    fn plants_lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<PlantId, Plant>>> {
        self.plants
            .lock()
            .map_err(|_| Error::Database("plant map lock poisoned".to_string()))
    }
}

impl RecordStore for MemoryRecordStore {
    fn get_all(&self) -> Result<Vec<Plant>> {
        Ok(self.plants_lock()?.values().cloned().collect())
    }

    fn put_all(&self, plants: &[Plant]) -> Result<()> {
        let mut map = self.plants_lock()?;
        map.clear();
        for plant in plants {
            map.insert(plant.id, plant.clone());
        }
        Ok(())
    }

    fn get_by_id(&self, id: &PlantId) -> Result<Option<Plant>> {
        Ok(self.plants_lock()?.get(id).cloned())
    }

    fn put_one(&self, mut plant: Plant) -> Result<Plant> {
        plant.touch();
        self.plants_lock()?.insert(plant.id, plant.clone());
        Ok(plant)
    }

    fn load_sync_config(&self) -> Result<SyncConfig> {
        self.config
            .lock()
            .map(|config| config.clone())
            .map_err(|_| Error::Database("sync config lock poisoned".to_string()))
    }

    fn save_sync_config(&self, config: &SyncConfig) -> Result<()> {
        *self
            .config
            .lock()
            .map_err(|_| Error::Database("sync config lock poisoned".to_string()))? = config.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_put_one_refreshes_updated_at() {
        let store = MemoryRecordStore::new();
        let mut plant = Plant::new("Monstera");
        plant.updated_at = None;

        let stored = store.put_one(plant.clone()).unwrap();
        assert!(stored.updated_at.is_some());

        let fetched = store.get_by_id(&plant.id).unwrap().unwrap();
        assert_eq!(fetched, stored);
    }

    #[test]
    fn test_put_all_preserves_timestamps() {
        let store = MemoryRecordStore::new();
        let mut plant = Plant::new("Fern");
        plant.updated_at = None;

        store.put_all(std::slice::from_ref(&plant)).unwrap();
        let fetched = store.get_by_id(&plant.id).unwrap().unwrap();
        assert_eq!(fetched.updated_at, None);
    }

    #[test]
    fn test_put_all_replaces_collection() {
        let store = MemoryRecordStore::with_plants([Plant::new("Old")]);
        let replacement = Plant::new("New");
        store.put_all(std::slice::from_ref(&replacement)).unwrap();

        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "New");
    }

    #[test]
    fn test_sync_config_round_trip() {
        let store = MemoryRecordStore::new();
        assert_eq!(store.load_sync_config().unwrap(), SyncConfig::default());

        let config = SyncConfig {
            enabled: true,
            auto_sync: true,
            last_sync: Some(chrono::Utc::now()),
        };
        store.save_sync_config(&config).unwrap();
        assert_eq!(store.load_sync_config().unwrap(), config);
    }
}
