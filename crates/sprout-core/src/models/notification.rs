//! Care notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::PlantId;

/// What a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Watering,
    Fertilizing,
    Health,
    Inactivity,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Watering => "watering",
            Self::Fertilizing => "fertilizing",
            Self::Health => "health",
            Self::Inactivity => "inactivity",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification priority; `High > Medium > Low`.
///
/// Variant order matters: the derived `Ord` is what the scheduler's
/// priority-descending sort relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// One due or overdue care action, computed fresh each scheduling pass.
///
/// Never persisted; a pure projection over the collection and the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationItem {
    /// Plant this action belongs to
    pub plant_id: PlantId,
    /// Display name of the plant, carried for rendering
    pub plant_name: String,
    /// What the action is about
    pub kind: NotificationKind,
    /// When the action is (or was) due
    pub due_at: DateTime<Utc>,
    /// Whether the due moment has passed
    pub is_overdue: bool,
    /// Urgency bucket driving ordering and push behavior
    pub priority: Priority,
    /// Human-readable summary (e.g. "Watering overdue by 2 days")
    pub message: String,
}

impl NotificationItem {
    /// Deterministic identifier for alert de-duplication.
    ///
    /// Stable across scheduling passes for the same still-open due event,
    /// so a sink can deliver at most one alert per `(plant, kind)`.
    #[must_use]
    pub fn dedupe_key(&self) -> String {
        format!("{}:{}", self.plant_id, self.kind)
    }
}
