use std::path::Path;

use sprout_core::models::CareRecommendation;
use sprout_core::store::RecordStore;
use sprout_core::{CareKind, Plant};

use crate::commands::common::{open_store, short_id};
use crate::error::CliError;

pub fn run_add(
    name: &str,
    species: Option<String>,
    water_every: Option<i64>,
    feed_every: Option<i64>,
    db_path: Option<&Path>,
) -> Result<(), CliError> {
    if name.trim().is_empty() {
        return Err(CliError::InvalidInput(
            "plant name must not be empty".to_string(),
        ));
    }

    let mut plant = Plant::new(name.trim());
    plant.species = species;

    if let Some(days) = water_every {
        plant.care_recommendations.push(CareRecommendation {
            kind: CareKind::Watering,
            interval_days: days,
            description: format!("Water every {days} days"),
        });
    }
    if let Some(days) = feed_every {
        plant.care_recommendations.push(CareRecommendation {
            kind: CareKind::Fertilizing,
            interval_days: days,
            description: format!("Fertilize every {days} days"),
        });
    }

    let store = open_store(db_path)?;
    let stored = store.put_one(plant)?;

    println!("Added {} ({})", stored.name, short_id(&stored));
    Ok(())
}
