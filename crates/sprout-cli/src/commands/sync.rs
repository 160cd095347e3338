use std::path::Path;

use sprout_core::sync::{HttpRemoteMirror, ReconciliationEngine, SyncOutcome};

use crate::commands::common::open_store;
use crate::error::CliError;

pub async fn run_sync(remote: &str, db_path: Option<&Path>) -> Result<(), CliError> {
    let store = open_store(db_path)?;
    let mirror = HttpRemoteMirror::new(remote)?;

    let engine = ReconciliationEngine::new(&store, &mirror);
    match engine.reconcile(true).await {
        SyncOutcome::Success => {
            println!("Synced with {remote}");
            Ok(())
        }
        SyncOutcome::Offline => {
            println!("Offline; nothing was changed. Try again once you're connected.");
            Ok(())
        }
        SyncOutcome::Error(e) => Err(e.into()),
    }
}
