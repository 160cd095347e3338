use std::path::Path;

use chrono::Utc;
use sprout_core::alert::AlertDispatcher;
use sprout_core::CareKind;

use crate::commands::common::{open_store, resolve_plant_id, ConsoleAlertSink};
use crate::error::CliError;

pub fn run_done(id: &str, kind: CareKind, db_path: Option<&Path>) -> Result<(), CliError> {
    let store = open_store(db_path)?;
    let plant_id = resolve_plant_id(&store, id)?;

    let sink = ConsoleAlertSink;
    let dispatcher = AlertDispatcher::new(&store, &sink);
    let updated = dispatcher.complete(&plant_id, kind, Utc::now())?;

    match updated.important_dates.next_due(kind) {
        Some(due) => println!(
            "{} {} done; next due {}",
            updated.name,
            kind,
            due.format("%Y-%m-%d")
        ),
        None => println!("{} {} done", updated.name, kind),
    }
    Ok(())
}

pub fn run_snooze(id: &str, kind: CareKind, db_path: Option<&Path>) -> Result<(), CliError> {
    let store = open_store(db_path)?;
    let plant_id = resolve_plant_id(&store, id)?;

    let sink = ConsoleAlertSink;
    let dispatcher = AlertDispatcher::new(&store, &sink);
    let updated = dispatcher.snooze(&plant_id, kind, Utc::now())?;

    println!("Snoozed {} {} until tomorrow", updated.name, kind);
    Ok(())
}
