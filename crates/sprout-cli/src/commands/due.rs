use std::path::Path;

use chrono::Utc;
use sprout_core::schedule::CareScheduler;

use crate::commands::common::open_store;
use crate::error::CliError;

pub fn run_due(as_json: bool, db_path: Option<&Path>) -> Result<(), CliError> {
    let store = open_store(db_path)?;
    let items = CareScheduler::new(&store).compute_due_actions(Utc::now())?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("Nothing due. Your plants are happy.");
        return Ok(());
    }

    for item in &items {
        let marker = if item.is_overdue { "!" } else { " " };
        println!(
            "{marker} [{:?}] {:<20} {}",
            item.priority, item.plant_name, item.message
        );
    }
    Ok(())
}
