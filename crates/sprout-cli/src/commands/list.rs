use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sprout_core::store::RecordStore;
use sprout_core::{CareKind, Plant};

use crate::commands::common::{open_store, short_id};
use crate::error::CliError;

#[derive(Serialize)]
pub struct PlantListItem<'a> {
    pub id: String,
    pub name: &'a str,
    pub species: Option<&'a str>,
    pub health_status: &'a sprout_core::models::HealthStatus,
    pub next_watering_due: Option<DateTime<Utc>>,
    pub next_fertilizing_due: Option<DateTime<Utc>>,
    pub logs: &'a [sprout_core::models::CareLogEntry],
}

fn to_list_item(plant: &Plant) -> PlantListItem<'_> {
    PlantListItem {
        id: plant.id.as_str(),
        name: &plant.name,
        species: plant.species.as_deref(),
        health_status: &plant.health_status,
        next_watering_due: plant.important_dates.next_watering_due,
        next_fertilizing_due: plant.important_dates.next_fertilizing_due,
        logs: &plant.logs,
    }
}

pub fn run_list(as_json: bool, db_path: Option<&Path>) -> Result<(), CliError> {
    let store = open_store(db_path)?;
    let plants = store.get_all()?;

    if as_json {
        let items: Vec<PlantListItem<'_>> = plants.iter().map(to_list_item).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if plants.is_empty() {
        println!("No plants yet. Add one with `sprout add <name>`.");
        return Ok(());
    }

    for plant in &plants {
        let watering = format_due(plant, CareKind::Watering);
        println!(
            "{}  {:<20} water: {}",
            short_id(plant),
            plant.name,
            watering
        );
    }
    Ok(())
}

fn format_due(plant: &Plant, kind: CareKind) -> String {
    plant.important_dates.next_due(kind).map_or_else(
        || "unscheduled".to_string(),
        |due| due.format("%Y-%m-%d").to_string(),
    )
}
