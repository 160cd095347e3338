//! Care scheduling
//!
//! Derives due and overdue care actions from each plant's care metadata and
//! the clock. Pure projection: nothing here mutates stored data, so it is
//! safe to run on every tick against whatever the last sync left behind.

use chrono::{DateTime, Duration, Utc};

use crate::error::Result;
use crate::models::{HealthStatus, NotificationItem, NotificationKind, Plant, Priority};
use crate::store::RecordStore;

/// Days without any record activity before a plant is flagged as forgotten
const INACTIVITY_THRESHOLD_DAYS: i64 = 7;

/// Scheduler over a record store; reads only
pub struct CareScheduler<'a, S> {
    store: &'a S,
}

impl<'a, S: RecordStore> CareScheduler<'a, S> {
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Compute the due-action queue for the current collection
    pub fn compute_due_actions(&self, now: DateTime<Utc>) -> Result<Vec<NotificationItem>> {
        let plants = self.store.get_all()?;
        Ok(compute_due_actions(&plants, now))
    }
}

/// Compute due and overdue care actions for a collection snapshot.
///
/// Each plant is evaluated against four independent rules (watering,
/// fertilizing, health, inactivity) and may emit several items in one pass.
/// The result is sorted by priority descending, then `due_at` ascending —
/// an ordering callers rely on.
#[must_use]
pub fn compute_due_actions(plants: &[Plant], now: DateTime<Utc>) -> Vec<NotificationItem> {
    let mut items: Vec<NotificationItem> = Vec::new();

    for plant in plants {
        if let Some(item) = watering_item(plant, now) {
            items.push(item);
        }
        if let Some(item) = fertilizing_item(plant, now) {
            items.push(item);
        }
        if let Some(item) = health_item(plant, now) {
            items.push(item);
        }
        if let Some(item) = inactivity_item(plant, now) {
            items.push(item);
        }
    }

    items.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.due_at.cmp(&b.due_at)));
    items
}

fn watering_item(plant: &Plant, now: DateTime<Utc>) -> Option<NotificationItem> {
    let due = plant.important_dates.next_watering_due?;

    // Whole-day difference: a due date any time today counts as "today".
    let days_until = (due.date_naive() - now.date_naive()).num_days();
    if days_until > 1 {
        return None;
    }

    let (message, priority) = if days_until < 0 {
        let days = -days_until;
        (
            format!(
                "Watering overdue by {days} day{}",
                if days == 1 { "" } else { "s" }
            ),
            Priority::High,
        )
    } else if days_until == 0 {
        ("Watering due today".to_string(), Priority::Medium)
    } else {
        ("Watering due tomorrow".to_string(), Priority::Medium)
    };

    Some(NotificationItem {
        plant_id: plant.id,
        plant_name: plant.name.clone(),
        kind: NotificationKind::Watering,
        due_at: due,
        is_overdue: days_until < 0,
        priority,
        message,
    })
}

fn fertilizing_item(plant: &Plant, now: DateTime<Utc>) -> Option<NotificationItem> {
    let due = plant.important_dates.next_fertilizing_due?;
    if due >= now + Duration::days(1) {
        return None;
    }

    let is_overdue = due < now;
    Some(NotificationItem {
        plant_id: plant.id,
        plant_name: plant.name.clone(),
        kind: NotificationKind::Fertilizing,
        due_at: due,
        is_overdue,
        priority: if is_overdue {
            Priority::High
        } else {
            Priority::Medium
        },
        message: if is_overdue {
            "Fertilizing overdue".to_string()
        } else {
            "Fertilizing due soon".to_string()
        },
    })
}

fn health_item(plant: &Plant, now: DateTime<Utc>) -> Option<NotificationItem> {
    if plant.health_status != HealthStatus::Critical {
        return None;
    }

    Some(NotificationItem {
        plant_id: plant.id,
        plant_name: plant.name.clone(),
        kind: NotificationKind::Health,
        due_at: now,
        is_overdue: true,
        priority: Priority::High,
        message: "Health is critical, check on it now".to_string(),
    })
}

fn inactivity_item(plant: &Plant, now: DateTime<Utc>) -> Option<NotificationItem> {
    let last_activity = plant.last_activity();
    let idle = now - last_activity;
    if idle < Duration::days(INACTIVITY_THRESHOLD_DAYS) {
        return None;
    }

    Some(NotificationItem {
        plant_id: plant.id,
        plant_name: plant.name.clone(),
        kind: NotificationKind::Inactivity,
        due_at: last_activity + Duration::days(INACTIVITY_THRESHOLD_DAYS),
        is_overdue: true,
        priority: Priority::Low,
        message: format!("No activity for {} days", idle.num_days()),
    })
}
