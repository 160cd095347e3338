//! Background driver
//!
//! Owns the periodic tick and the reconnect edge. Within one pass the order
//! is fixed: reconcile (when sync is enabled and we are online), then
//! schedule, then dispatch, so scheduling always sees the freshest
//! obtainable local state. At most one pass is in flight at a time; a tick
//! or reconnect that fires mid-pass is dropped, not queued.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::alert::{AlertDispatcher, AlertSink};
use crate::error::{Error, Result};
use crate::models::NotificationItem;
use crate::schedule::CareScheduler;
use crate::store::RecordStore;
use crate::sync::{ReconciliationEngine, RemoteMirror, SyncOutcome};

/// Default interval between background passes
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Single-owner background loop over store, mirror, and alert sink
pub struct SyncDriver<'a, S, M, A> {
    store: &'a S,
    mirror: &'a M,
    sink: &'a A,
    online: watch::Receiver<bool>,
    tick_interval: Duration,
    pass_in_flight: bool,
}

impl<'a, S: RecordStore, M: RemoteMirror, A: AlertSink> SyncDriver<'a, S, M, A> {
    pub const fn new(
        store: &'a S,
        mirror: &'a M,
        sink: &'a A,
        online: watch::Receiver<bool>,
        tick_interval: Duration,
    ) -> Self {
        Self {
            store,
            mirror,
            sink,
            online,
            tick_interval,
            pass_in_flight: false,
        }
    }

    /// Run until the connectivity sender goes away.
    ///
    /// Fires a pass on every tick and an extra edge-triggered pass whenever
    /// connectivity comes back.
    pub async fn run(&mut self) {
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // One receiver for the whole loop, so each connectivity edge is
        // consumed exactly once. A fresh clone per iteration would never
        // advance its seen version and `changed()` would keep completing
        // for the same edge.
        let mut online = self.online.clone();

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.drive("tick").await;
                }
                changed = online.changed() => {
                    if changed.is_err() {
                        // Host tore down the connectivity signal.
                        break;
                    }
                    if *online.borrow_and_update() {
                        self.drive("reconnect").await;
                    }
                }
            }
        }
    }

    /// Guarded entry point: no-op when a pass is already in flight
    pub async fn drive(&mut self, trigger: &str) {
        if self.pass_in_flight {
            tracing::debug!(trigger, "pass already in flight, dropping trigger");
            return;
        }
        self.pass_in_flight = true;
        let result = self.pass().await;
        self.pass_in_flight = false;

        if let Err(e) = result {
            tracing::error!(trigger, error = %e, "background pass failed");
        }
    }

    /// One full pass: reconcile, then schedule, then dispatch.
    ///
    /// Transient sync failures (offline, transport) are logged and left for
    /// the next tick rather than interrupting the user; scheduling still
    /// runs against the local collection.
    pub async fn pass(&self) -> Result<Vec<NotificationItem>> {
        let online = *self.online.borrow();
        let config = self.store.load_sync_config()?;

        if config.enabled && config.auto_sync {
            let engine = ReconciliationEngine::new(self.store, self.mirror);
            match engine.reconcile(online).await {
                SyncOutcome::Success => tracing::debug!("background sync succeeded"),
                SyncOutcome::Offline => tracing::debug!("offline, sync deferred"),
                SyncOutcome::Error(Error::Transport(message)) => {
                    tracing::warn!(error = %message, "transient sync failure, retrying next tick");
                }
                SyncOutcome::Error(e) => return Err(e),
            }
        }

        let items = CareScheduler::new(self.store).compute_due_actions(Utc::now())?;
        AlertDispatcher::new(self.store, self.sink).dispatch(&items);
        Ok(items)
    }
}
