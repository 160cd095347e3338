//! SQLite record store implementation
//!
//! Plants are stored as JSON documents in a key-value table so a
//! whole-collection write is a single transaction.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::models::{Plant, PlantId, SyncConfig};

use super::RecordStore;

/// `RecordStore` backed by a local `SQLite` file
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Open a database at the given path, creating it if it doesn't exist.
    ///
    /// Runs migrations automatically.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        // WAL may be unavailable on some filesystems; not fatal.
        conn.pragma_update(None, "journal_mode", "WAL").ok();
        conn.pragma_update(None, "synchronous", "NORMAL").ok();

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS plants (
                 id   TEXT PRIMARY KEY,
                 body TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS settings (
                 key   TEXT PRIMARY KEY,
                 value TEXT NOT NULL
             );",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Database("connection lock poisoned".to_string()))
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let result = conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn()?.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete_setting(&self, key: &str) -> Result<()> {
        self.conn()?
            .execute("DELETE FROM settings WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl RecordStore for SqliteRecordStore {
    fn get_all(&self) -> Result<Vec<Plant>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT body FROM plants ORDER BY id")?;
        let bodies = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        bodies
            .iter()
            .map(|body| serde_json::from_str(body).map_err(Error::from))
            .collect()
    }

    fn put_all(&self, plants: &[Plant]) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM plants", [])?;
        {
            let mut stmt = tx.prepare("INSERT INTO plants (id, body) VALUES (?1, ?2)")?;
            for plant in plants {
                stmt.execute(params![plant.id.as_str(), serde_json::to_string(plant)?])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn get_by_id(&self, id: &PlantId) -> Result<Option<Plant>> {
        let conn = self.conn()?;
        let result = conn.query_row(
            "SELECT body FROM plants WHERE id = ?1",
            params![id.as_str()],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(body) => Ok(Some(serde_json::from_str(&body)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put_one(&self, mut plant: Plant) -> Result<Plant> {
        plant.touch();
        self.conn()?.execute(
            "INSERT OR REPLACE INTO plants (id, body) VALUES (?1, ?2)",
            params![plant.id.as_str(), serde_json::to_string(&plant)?],
        )?;
        Ok(plant)
    }

    fn load_sync_config(&self) -> Result<SyncConfig> {
        let mut config = SyncConfig::default();

        if let Some(value) = self.get_setting("sync_enabled")? {
            config.enabled = value == "true";
        }
        if let Some(value) = self.get_setting("sync_auto")? {
            config.auto_sync = value == "true";
        }
        if let Some(value) = self.get_setting("sync_last_sync")? {
            config.last_sync = DateTime::parse_from_rfc3339(&value)
                .ok()
                .map(|t| t.with_timezone(&Utc));
        }

        Ok(config)
    }

    fn save_sync_config(&self, config: &SyncConfig) -> Result<()> {
        self.set_setting("sync_enabled", if config.enabled { "true" } else { "false" })?;
        self.set_setting("sync_auto", if config.auto_sync { "true" } else { "false" })?;
        match config.last_sync {
            Some(last_sync) => self.set_setting("sync_last_sync", &last_sync.to_rfc3339())?,
            None => self.delete_setting("sync_last_sync")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn setup() -> SqliteRecordStore {
        SqliteRecordStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_put_one_and_get() {
        let store = setup();
        let plant = Plant::new("Monstera");
        let stored = store.put_one(plant.clone()).unwrap();

        let fetched = store.get_by_id(&plant.id).unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert!(fetched.updated_at >= plant.updated_at);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = setup();
        assert!(store.get_by_id(&PlantId::new()).unwrap().is_none());
    }

    #[test]
    fn test_put_all_replaces_collection() {
        let store = setup();
        store.put_one(Plant::new("Old")).unwrap();

        let replacement = vec![Plant::new("A"), Plant::new("B")];
        store.put_all(&replacement).unwrap();

        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|p| p.name != "Old"));
    }

    #[test]
    fn test_put_all_preserves_timestamps() {
        let store = setup();
        let mut plant = Plant::new("Fern");
        plant.updated_at = None;

        store.put_all(std::slice::from_ref(&plant)).unwrap();
        let fetched = store.get_by_id(&plant.id).unwrap().unwrap();
        assert_eq!(fetched.updated_at, None);
    }

    #[test]
    fn test_sync_config_defaults_on_first_run() {
        let store = setup();
        assert_eq!(store.load_sync_config().unwrap(), SyncConfig::default());
    }

    #[test]
    fn test_sync_config_round_trip() {
        let store = setup();
        let config = SyncConfig {
            enabled: true,
            auto_sync: true,
            last_sync: Some(Utc::now()),
        };
        store.save_sync_config(&config).unwrap();

        let loaded = store.load_sync_config().unwrap();
        assert_eq!(loaded.enabled, config.enabled);
        assert_eq!(loaded.auto_sync, config.auto_sync);
        // RFC 3339 round-trips to the same instant
        assert_eq!(loaded.last_sync, config.last_sync);
    }

    #[test]
    fn test_sync_config_clearing_last_sync_removes_stored_row() {
        let store = setup();
        let mut config = SyncConfig {
            enabled: true,
            auto_sync: false,
            last_sync: Some(Utc::now()),
        };
        store.save_sync_config(&config).unwrap();
        assert!(store.load_sync_config().unwrap().last_sync.is_some());

        config.last_sync = None;
        store.save_sync_config(&config).unwrap();
        assert_eq!(store.load_sync_config().unwrap().last_sync, None);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sprout.db");

        let plant = Plant::new("Cactus");
        {
            let store = SqliteRecordStore::open(&path).unwrap();
            store.put_one(plant.clone()).unwrap();
        }

        let store = SqliteRecordStore::open(&path).unwrap();
        let fetched = store.get_by_id(&plant.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Cactus");
    }
}
