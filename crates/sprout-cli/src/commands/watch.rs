use std::path::Path;
use std::time::Duration;

use sprout_core::driver::SyncDriver;
use sprout_core::store::RecordStore;
use sprout_core::sync::HttpRemoteMirror;
use tokio::sync::watch;

use crate::commands::common::{open_store, ConsoleAlertSink};
use crate::error::CliError;

pub async fn run_watch(remote: &str, interval: u64, db_path: Option<&Path>) -> Result<(), CliError> {
    let store = open_store(db_path)?;
    let mirror = HttpRemoteMirror::new(remote)?;
    let sink = ConsoleAlertSink;

    // Enable background sync for this session.
    let mut config = store.load_sync_config()?;
    config.enabled = true;
    config.auto_sync = true;
    store.save_sync_config(&config)?;

    // The CLI has no OS connectivity signal; assume online and let the
    // engine downgrade failed connections to offline outcomes.
    let (_online_tx, online_rx) = watch::channel(true);

    println!("Watching every {interval}s; press Ctrl-C to stop.");
    let mut driver = SyncDriver::new(
        &store,
        &mirror,
        &sink,
        online_rx,
        Duration::from_secs(interval),
    );
    driver.run().await;
    Ok(())
}
