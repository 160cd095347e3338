//! Plant model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for a plant, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlantId(Uuid);

impl PlantId {
    /// Create a new unique plant ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for PlantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlantId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Overall health assessment of a plant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// No issues observed
    Healthy,
    /// Needs a closer look soon
    Attention,
    /// Needs intervention now
    Critical,
    /// Not yet assessed
    #[default]
    Unknown,
}

/// The kinds of care that carry a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareKind {
    Watering,
    Fertilizing,
}

impl CareKind {
    /// Interval applied by `complete` when the plant carries no matching
    /// recommendation.
    #[must_use]
    pub const fn default_interval_days(self) -> i64 {
        match self {
            Self::Watering => 3,
            Self::Fertilizing => 30,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Watering => "watering",
            Self::Fertilizing => "fertilizing",
        }
    }
}

impl fmt::Display for CareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A suggested care routine for a plant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareRecommendation {
    /// Kind of care this recommendation covers
    pub kind: CareKind,
    /// Suggested interval between care events, in days
    pub interval_days: i64,
    /// Human-readable description (e.g. "Water when topsoil is dry")
    pub description: String,
}

/// Trackable due dates derived from past care and analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ImportantDates {
    /// When the next watering is due, if scheduled
    pub next_watering_due: Option<DateTime<Utc>>,
    /// When the next fertilizing is due, if scheduled
    pub next_fertilizing_due: Option<DateTime<Utc>>,
    /// When the plant was last analyzed
    pub last_analyzed: Option<DateTime<Utc>>,
}

impl ImportantDates {
    /// Get the next due date for the given care kind
    #[must_use]
    pub const fn next_due(&self, kind: CareKind) -> Option<DateTime<Utc>> {
        match kind {
            CareKind::Watering => self.next_watering_due,
            CareKind::Fertilizing => self.next_fertilizing_due,
        }
    }

    /// Set the next due date for the given care kind
    pub fn set_next_due(&mut self, kind: CareKind, due: DateTime<Utc>) {
        match kind {
            CareKind::Watering => self.next_watering_due = Some(due),
            CareKind::Fertilizing => self.next_fertilizing_due = Some(due),
        }
    }
}

/// One completed care event, newest first in `Plant::logs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareLogEntry {
    /// Kind of care performed
    pub kind: CareKind,
    /// When the care was performed
    pub at: DateTime<Utc>,
    /// Optional free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A tracked plant in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    /// Unique identifier, immutable after creation
    pub id: PlantId,
    /// Display name
    pub name: String,
    /// Optional species or cultivar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    /// Current health assessment
    #[serde(default)]
    pub health_status: HealthStatus,
    /// Suggested care routines; first match by kind wins for scheduling
    #[serde(default)]
    pub care_recommendations: Vec<CareRecommendation>,
    /// Trackable due dates
    #[serde(default)]
    pub important_dates: ImportantDates,
    /// Care history, newest first
    #[serde(default)]
    pub logs: Vec<CareLogEntry>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp; the sole tie-breaker for sync conflicts.
    /// A record without one always loses a merge.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Plant {
    /// Create a new plant with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PlantId::new(),
            name: name.into(),
            species: None,
            health_status: HealthStatus::Unknown,
            care_recommendations: Vec::new(),
            important_dates: ImportantDates::default(),
            logs: Vec::new(),
            created_at: now,
            updated_at: Some(now),
        }
    }

    /// First recommendation matching the given kind, if any.
    ///
    /// Duplicates per kind are tolerated; the first match wins.
    #[must_use]
    pub fn recommendation_for(&self, kind: CareKind) -> Option<&CareRecommendation> {
        self.care_recommendations.iter().find(|r| r.kind == kind)
    }

    /// The timestamp used to decide sync conflicts.
    ///
    /// Records missing `updated_at` compare as the Unix epoch.
    #[must_use]
    pub fn logical_clock(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Most recent sign of life on this record, used for inactivity checks
    #[must_use]
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.updated_at
            .map_or(self.created_at, |updated| updated.max(self.created_at))
    }

    /// Refresh `updated_at` so this record wins future merges
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    /// Prepend a care log entry (logs are newest first)
    pub fn record_care(&mut self, kind: CareKind, at: DateTime<Utc>, note: Option<String>) {
        self.logs.insert(0, CareLogEntry { kind, at, note });
    }
}
