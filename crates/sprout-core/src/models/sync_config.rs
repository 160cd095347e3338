//! Sync configuration model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Process-wide sync configuration, persisted alongside the collection.
///
/// Read before every reconciliation attempt and written back after every
/// attempt; `last_sync` only advances on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Whether sync is enabled at all
    pub enabled: bool,
    /// Whether the background driver reconciles on its own
    pub auto_sync: bool,
    /// When the last successful reconciliation finished
    pub last_sync: Option<DateTime<Utc>>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            auto_sync: false,
            last_sync: None,
        }
    }
}
