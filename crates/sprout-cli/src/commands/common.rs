//! Shared helpers for CLI commands

use std::path::{Path, PathBuf};

use sprout_core::alert::AlertSink;
use sprout_core::store::{RecordStore, SqliteRecordStore};
use sprout_core::{Plant, PlantId};

use crate::error::CliError;

/// Resolve the database path: explicit flag, else the platform data dir
pub fn database_path(db_path: Option<&Path>) -> Result<PathBuf, CliError> {
    if let Some(path) = db_path {
        return Ok(path.to_path_buf());
    }

    let base = dirs::data_dir()
        .ok_or_else(|| CliError::InvalidInput("could not determine data directory".to_string()))?;
    let dir = base.join("sprout");
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("sprout.db"))
}

pub fn open_store(db_path: Option<&Path>) -> Result<SqliteRecordStore, CliError> {
    let path = database_path(db_path)?;
    Ok(SqliteRecordStore::open(path)?)
}

/// Resolve a full ID or unique ID prefix against the collection
pub fn resolve_plant_id(store: &impl RecordStore, prefix: &str) -> Result<PlantId, CliError> {
    if let Ok(id) = prefix.parse::<PlantId>() {
        return Ok(id);
    }

    let matches: Vec<PlantId> = store
        .get_all()?
        .iter()
        .map(|plant| plant.id)
        .filter(|id| id.as_str().starts_with(prefix))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(CliError::InvalidInput(format!(
            "no plant matches '{prefix}'"
        ))),
        _ => Err(CliError::InvalidInput(format!(
            "'{prefix}' is ambiguous ({} matches)",
            matches.len()
        ))),
    }
}

/// Short ID prefix used in human-readable listings
pub fn short_id(plant: &Plant) -> String {
    plant.id.as_str().chars().take(8).collect()
}

/// `AlertSink` that prints alerts to the terminal
pub struct ConsoleAlertSink;

impl AlertSink for ConsoleAlertSink {
    fn notify(&self, title: &str, body: &str, dedupe_key: &str) {
        println!("[alert] {title}: {body}");
        tracing::debug!(dedupe_key, "alert dispatched");
    }
}
