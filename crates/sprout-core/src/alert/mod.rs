//! Alert dispatch and scheduler-driven mutations
//!
//! Turns the scheduler's queue into user-facing notifications and applies
//! "done" / "snooze" back onto the collection. The dispatcher keeps no
//! notified-state of its own: every alert carries a deterministic
//! `(plant, kind)` dedupe key and the sink is expected to deliver at most
//! once per still-open due event.

use chrono::{DateTime, Duration, Utc};

use crate::error::{Error, Result};
use crate::models::{CareKind, NotificationItem, Plant, PlantId, Priority};
use crate::store::RecordStore;

/// Fire-and-forget push to the user-facing notification surface
pub trait AlertSink {
    fn notify(&self, title: &str, body: &str, dedupe_key: &str);
}

/// Dispatches alerts and records completions/snoozes through the store
pub struct AlertDispatcher<'a, S, A> {
    store: &'a S,
    sink: &'a A,
}

impl<'a, S: RecordStore, A: AlertSink> AlertDispatcher<'a, S, A> {
    pub const fn new(store: &'a S, sink: &'a A) -> Self {
        Self { store, sink }
    }

    /// Push an alert for every high- and medium-priority item.
    ///
    /// Low-priority items are informational and stay in-app only.
    pub fn dispatch(&self, items: &[NotificationItem]) {
        for item in items {
            if item.priority < Priority::Medium {
                continue;
            }
            self.sink
                .notify(&item.plant_name, &item.message, &item.dedupe_key());
        }
    }

    /// Mark a care action as done.
    ///
    /// The next due date advances by the plant's matching recommendation
    /// interval, falling back to the kind's default when no recommendation
    /// exists. Appends a care log entry and persists the plant, refreshing
    /// its `updated_at`.
    pub fn complete(&self, id: &PlantId, kind: CareKind, now: DateTime<Utc>) -> Result<Plant> {
        let mut plant = self.get_plant(id)?;

        let interval_days = plant
            .recommendation_for(kind)
            .map_or_else(|| kind.default_interval_days(), |rec| rec.interval_days);

        plant
            .important_dates
            .set_next_due(kind, now + Duration::days(interval_days));
        plant.record_care(kind, now, None);

        self.store.put_one(plant)
    }

    /// Push a care action back by one day without logging anything
    pub fn snooze(&self, id: &PlantId, kind: CareKind, now: DateTime<Utc>) -> Result<Plant> {
        let mut plant = self.get_plant(id)?;
        plant
            .important_dates
            .set_next_due(kind, now + Duration::days(1));
        self.store.put_one(plant)
    }

    fn get_plant(&self, id: &PlantId) -> Result<Plant> {
        self.store
            .get_by_id(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }
}

#[cfg(test)]
pub(crate) struct RecordingSink {
    pub notified: std::sync::Mutex<Vec<(String, String, String)>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        Self {
            notified: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn dedupe_keys(&self) -> Vec<String> {
        self.notified
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, key)| key.clone())
            .collect()
    }
}

#[cfg(test)]
impl AlertSink for RecordingSink {
    fn notify(&self, title: &str, body: &str, dedupe_key: &str) {
        self.notified.lock().unwrap().push((
            title.to_string(),
            body.to_string(),
            dedupe_key.to_string(),
        ));
    }
}
