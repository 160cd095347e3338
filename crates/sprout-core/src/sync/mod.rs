//! Offline sync engine
//!
//! Reconciles the local plant collection with its remote mirror using a
//! whole-collection, last-writer-wins merge keyed by `Plant::logical_clock`.
//! A pass is all-or-nothing: nothing is written until both reads succeed,
//! and a failed write aborts the pass with the local collection untouched.

mod remote;

pub use remote::{HttpRemoteMirror, MemoryRemoteMirror, RemoteMirror};

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::Utc;

use crate::error::{Error, Result};
use crate::models::{Plant, PlantId, SyncConfig};
use crate::store::RecordStore;

/// How a reconciliation attempt ended
#[derive(Debug)]
pub enum SyncOutcome {
    /// Both sides converged to the merged snapshot
    Success,
    /// Connectivity absent; retry on the next tick or reconnect
    Offline,
    /// I/O failed mid-pass; no partial merge was persisted
    Error(Error),
}

impl SyncOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Merge two collection snapshots, last writer wins per record.
///
/// Seeded with all of `local`; a remote record replaces the local candidate
/// only when its `updated_at` is strictly greater, so ties keep the local
/// record. Records absent from one side are kept — a delete on one replica
/// is indistinguishable from "never existed" and an untouched copy on the
/// other side reappears after the merge (no tombstones).
#[must_use]
pub fn merge_collections(local: &[Plant], remote: &[Plant]) -> Vec<Plant> {
    let mut merged: BTreeMap<PlantId, Plant> =
        local.iter().map(|plant| (plant.id, plant.clone())).collect();

    for record in remote {
        match merged.entry(record.id) {
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
            }
            Entry::Occupied(mut slot) => {
                if record.logical_clock() > slot.get().logical_clock() {
                    slot.insert(record.clone());
                }
            }
        }
    }

    merged.into_values().collect()
}

/// Two-way reconciliation of a `RecordStore` with a `RemoteMirror`
pub struct ReconciliationEngine<'a, S, M> {
    store: &'a S,
    mirror: &'a M,
}

impl<'a, S: RecordStore, M: RemoteMirror> ReconciliationEngine<'a, S, M> {
    pub const fn new(store: &'a S, mirror: &'a M) -> Self {
        Self { store, mirror }
    }

    /// Run one reconciliation pass.
    ///
    /// When `online` is false the mirror is never contacted and no state is
    /// mutated. Sync configuration is written back after every attempt;
    /// `last_sync` advances only on success.
    pub async fn reconcile(&self, online: bool) -> SyncOutcome {
        if !online {
            return SyncOutcome::Offline;
        }

        let mut config = match self.store.load_sync_config() {
            Ok(config) => config,
            Err(e) => return SyncOutcome::Error(e),
        };

        let result = self.run_pass(&mut config).await;

        if let Err(e) = self.store.save_sync_config(&config) {
            return SyncOutcome::Error(e);
        }

        match result {
            Ok(()) => SyncOutcome::Success,
            Err(Error::Offline) => SyncOutcome::Offline,
            Err(e) => SyncOutcome::Error(e),
        }
    }

    async fn run_pass(&self, config: &mut SyncConfig) -> Result<()> {
        let local = self.store.get_all()?;
        let remote = self.mirror.download().await?;

        let merged = merge_collections(&local, &remote);

        // Remote first: a failed upload leaves the local collection exactly
        // as it was, and a failed local write is repaired by the next pass
        // (the merge is idempotent).
        self.mirror.upload(&merged).await?;
        self.store.put_all(&merged)?;

        config.last_sync = Some(Utc::now());
        tracing::debug!(
            local = local.len(),
            remote = remote.len(),
            merged = merged.len(),
            "collections reconciled"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRecordStore;
    use chrono::{DateTime, Duration};
    use pretty_assertions::assert_eq;

    fn plant_updated_at(name: &str, updated_at: Option<DateTime<Utc>>) -> Plant {
        let mut plant = Plant::new(name);
        plant.updated_at = updated_at;
        plant
    }

    fn sorted_names(plants: &[Plant]) -> Vec<String> {
        let mut names: Vec<String> = plants.iter().map(|p| p.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn merge_remote_newer_wins() {
        let now = Utc::now();
        let local = plant_updated_at("Local edit", Some(now));
        let mut remote = local.clone();
        remote.name = "Remote edit".to_string();
        remote.updated_at = Some(now + Duration::seconds(5));

        let merged = merge_collections(&[local], &[remote]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Remote edit");
    }

    #[test]
    fn merge_local_newer_wins() {
        let now = Utc::now();
        let local = plant_updated_at("Local edit", Some(now + Duration::seconds(5)));
        let mut remote = local.clone();
        remote.name = "Remote edit".to_string();
        remote.updated_at = Some(now);

        let merged = merge_collections(&[local], &[remote]);
        assert_eq!(merged[0].name, "Local edit");
    }

    #[test]
    fn merge_tie_keeps_local() {
        let now = Utc::now();
        let local = plant_updated_at("Local edit", Some(now));
        let mut remote = local.clone();
        remote.name = "Remote edit".to_string();

        let merged = merge_collections(&[local], &[remote]);
        assert_eq!(merged[0].name, "Local edit");
    }

    #[test]
    fn merge_missing_updated_at_always_loses() {
        let mut local = Plant::new("No clock");
        local.updated_at = None;
        let mut remote = local.clone();
        remote.name = "Has clock".to_string();
        remote.updated_at = Some(Utc::now());

        let merged = merge_collections(&[local.clone()], &[remote]);
        assert_eq!(merged[0].name, "Has clock");

        // And the reverse: a remote record without a clock never replaces
        // a local record that has one.
        let mut remote_no_clock = local.clone();
        remote_no_clock.name = "Still no clock".to_string();
        local.name = "Has clock".to_string();
        local.updated_at = Some(Utc::now());
        let merged = merge_collections(&[local], &[remote_no_clock]);
        assert_eq!(merged[0].name, "Has clock");
    }

    #[test]
    fn merge_keeps_both_sides_additions() {
        let local_only = Plant::new("Local only");
        let remote_only = Plant::new("Remote only");

        let merged = merge_collections(&[local_only], &[remote_only]);
        assert_eq!(sorted_names(&merged), vec!["Local only", "Remote only"]);
    }

    #[test]
    fn merge_resurrects_records_deleted_on_one_side() {
        // No tombstones: a record removed locally but untouched remotely
        // comes back after the merge.
        let kept_remotely = Plant::new("Deleted locally");
        let merged = merge_collections(&[], &[kept_remotely.clone()]);
        assert_eq!(merged, vec![kept_remotely]);
    }

    #[test]
    fn merge_is_idempotent() {
        let now = Utc::now();
        let a = plant_updated_at("A", Some(now));
        let mut b = a.clone();
        b.name = "B".to_string();
        b.updated_at = Some(now + Duration::seconds(1));
        let c = Plant::new("C");

        let local = vec![a, c];
        let remote = vec![b];

        let once = merge_collections(&local, &remote);
        let twice = merge_collections(&once, &remote);
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn reconcile_converges_both_sides() {
        let now = Utc::now();
        let shared = plant_updated_at("Replica B version", Some(now));
        let mut newer = shared.clone();
        newer.name = "Replica A version".to_string();
        newer.updated_at = Some(now + Duration::seconds(30));

        let store = MemoryRecordStore::with_plants([shared]);
        let mirror = MemoryRemoteMirror::with_snapshot(vec![newer.clone()]);
        let engine = ReconciliationEngine::new(&store, &mirror);

        let outcome = engine.reconcile(true).await;
        assert!(outcome.is_success(), "unexpected outcome: {outcome:?}");

        let local = store.get_all().unwrap();
        assert_eq!(local, vec![newer.clone()]);
        assert_eq!(mirror.snapshot(), vec![newer]);
        assert!(store.load_sync_config().unwrap().last_sync.is_some());
    }

    #[tokio::test]
    async fn reconcile_offline_touches_nothing() {
        let store = MemoryRecordStore::with_plants([Plant::new("Local")]);
        let mirror = MemoryRemoteMirror::with_snapshot(vec![Plant::new("Remote")]);
        let engine = ReconciliationEngine::new(&store, &mirror);

        let outcome = engine.reconcile(false).await;
        assert!(matches!(outcome, SyncOutcome::Offline));

        assert_eq!(store.get_all().unwrap().len(), 1);
        assert_eq!(mirror.snapshot().len(), 1);
        assert_eq!(store.load_sync_config().unwrap().last_sync, None);
    }

    #[tokio::test]
    async fn reconcile_download_connect_failure_is_offline() {
        let store = MemoryRecordStore::with_plants([Plant::new("Local")]);
        let mirror = MemoryRemoteMirror::new();
        mirror.set_offline(true);
        let engine = ReconciliationEngine::new(&store, &mirror);

        // The caller believed we were online, but the connection failed.
        let outcome = engine.reconcile(true).await;
        assert!(matches!(outcome, SyncOutcome::Offline));
        assert_eq!(store.get_all().unwrap().len(), 1);
        assert_eq!(store.load_sync_config().unwrap().last_sync, None);
    }

    #[tokio::test]
    async fn reconcile_upload_failure_aborts_whole_pass() {
        let store = MemoryRecordStore::with_plants([Plant::new("Local")]);
        let mirror = MemoryRemoteMirror::with_snapshot(vec![Plant::new("Remote")]);
        mirror.set_fail_uploads(true);
        let engine = ReconciliationEngine::new(&store, &mirror);

        let outcome = engine.reconcile(true).await;
        assert!(matches!(outcome, SyncOutcome::Error(Error::Transport(_))));

        // Local collection untouched, last_sync not advanced.
        let local = store.get_all().unwrap();
        assert_eq!(sorted_names(&local), vec!["Local"]);
        assert_eq!(store.load_sync_config().unwrap().last_sync, None);
    }

    #[tokio::test]
    async fn reconcile_twice_without_changes_is_a_no_op() {
        let store = MemoryRecordStore::with_plants([Plant::new("Local")]);
        let mirror = MemoryRemoteMirror::with_snapshot(vec![Plant::new("Remote")]);
        let engine = ReconciliationEngine::new(&store, &mirror);

        assert!(engine.reconcile(true).await.is_success());
        let after_first = store.get_all().unwrap();
        let remote_after_first = mirror.snapshot();

        assert!(engine.reconcile(true).await.is_success());
        assert_eq!(store.get_all().unwrap(), after_first);
        assert_eq!(mirror.snapshot(), remote_after_first);
    }
}
