//! Data models for Sprout

mod notification;
mod plant;
mod sync_config;

pub use notification::{NotificationItem, NotificationKind, Priority};
pub use plant::{
    CareKind, CareLogEntry, CareRecommendation, HealthStatus, ImportantDates, Plant, PlantId,
};
pub use sync_config::SyncConfig;
