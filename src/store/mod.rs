//! The report store: single source of truth and the only mutation path.
//!
//! The store owns the report collection, the session profile, and the
//! simulation-mode flag. Every mutation goes through it: validate, apply
//! under one lock, persist a snapshot, notify subscribers. Presentation
//! code reads the collection and derived metrics and never mutates state
//! directly.
//!
//! Instances are independent; there is no ambient singleton, so tests
//! can open as many stores as they need.

pub mod events;
pub mod seed;

pub use events::{StoreEvent, StoreSubscription};
pub use seed::seed_reports;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use crossbeam_channel::{bounded, Sender, TrySendError};
use log::{debug, warn};

use crate::error::{StoreError, StoreResult, ValidationError};
use crate::metrics::{Metrics, MetricsConfig};
use crate::report::{Report, ReportDraft, ReportId};
use crate::simulation::{FeedConfig, SimulationFeed};
use crate::snapshot::SnapshotStore;
use crate::status::Status;
use crate::user::{Profile, Role};

/// First id handed out by a store that opens on an empty collection.
/// Non-empty collections continue from `max(existing) + 1`.
const ID_OFFSET: u64 = 1026;

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Simulation feed parameters.
    pub simulation: FeedConfig,
    /// Metrics constants.
    pub metrics: MetricsConfig,
    /// Per-subscriber event buffer capacity.
    pub event_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            simulation: FeedConfig::default(),
            metrics: MetricsConfig::default(),
            event_capacity: 256,
        }
    }
}

#[derive(Debug)]
struct StoreState {
    reports: Vec<Report>,
    next_id: u64,
    profile: Profile,
    simulation_on: bool,
}

/// Owner of all report state; see the module docs for the data flow.
///
/// `ReportStore` is `Send + Sync`; operations take `&self` and serialize
/// through an internal lock, so the simulation feed and user-initiated
/// calls never interleave inside a read-modify-write.
pub struct ReportStore {
    state: RwLock<StoreState>,
    snapshots: Arc<dyn SnapshotStore>,
    subscribers: Mutex<Vec<Sender<StoreEvent>>>,
    dropped_events: AtomicU64,
    feed: Mutex<Option<SimulationFeed>>,
    config: StoreConfig,
}

impl ReportStore {
    /// Opens a store over the given snapshot backend.
    ///
    /// Hydrates the collection from a persisted snapshot when one exists
    /// and decodes cleanly; otherwise falls back to the fixed seed set.
    /// A malformed snapshot is logged and treated as absent; opening
    /// never fails.
    #[must_use]
    pub fn open(snapshots: Arc<dyn SnapshotStore>, config: StoreConfig) -> Arc<Self> {
        let reports = match snapshots.load() {
            Ok(Some(reports)) => reports,
            Ok(None) => seed::seed_reports(),
            Err(err) => {
                warn!("snapshot hydration failed, falling back to seed data: {err}");
                seed::seed_reports()
            }
        };

        let next_id = reports
            .iter()
            .map(|r| r.id.value())
            .max()
            .map_or(ID_OFFSET, |max| max + 1);

        Arc::new(Self {
            state: RwLock::new(StoreState {
                reports,
                next_id,
                profile: Profile::default(),
                simulation_on: false,
            }),
            snapshots,
            subscribers: Mutex::new(Vec::new()),
            dropped_events: AtomicU64::new(0),
            feed: Mutex::new(None),
            config,
        })
    }

    /// Opens a store over a fresh in-memory backend with default
    /// configuration. Convenience for tests and embedded demos.
    #[must_use]
    pub fn open_in_memory() -> Arc<Self> {
        Self::open(
            Arc::new(crate::snapshot::MemorySnapshots::new()),
            StoreConfig::default(),
        )
    }

    /// Submits a new report.
    ///
    /// Assigns the next unique id, stamps `Pending` status, zero votes,
    /// the creation time, and the category emblem, then inserts the
    /// report at the front of the collection (most-recent-first is part
    /// of the contract). Returns the constructed report so the caller can
    /// display its id.
    ///
    /// # Errors
    /// [`StoreError::Validation`] when the title is blank; the collection
    /// is left unchanged.
    pub fn add_report(&self, draft: ReportDraft) -> StoreResult<Report> {
        self.insert_new(draft, 0)
    }

    /// Shared insertion path for citizen submissions and the simulation
    /// feed. `votes` is 0 for submissions; the feed seeds a random count.
    pub(crate) fn insert_new(&self, draft: ReportDraft, votes: u32) -> StoreResult<Report> {
        draft.validate()?;

        let (report, reports) = {
            let mut state = self.write_state()?;
            let id = ReportId::new(state.next_id);
            state.next_id += 1;

            let report = Report::from_draft(id, draft, votes, Utc::now());
            state.reports.insert(0, report.clone());
            (report, state.reports.clone())
        };

        self.persist(&reports);
        self.publish(StoreEvent::ReportAdded { id: report.id });
        Ok(report)
    }

    /// Moves a report along the status state machine.
    ///
    /// Same-state calls are accepted as idempotent no-ops: nothing is
    /// written and no event is published.
    ///
    /// # Errors
    /// - [`StoreError::ReportNotFound`] when no report has `id`; the
    ///   collection is untouched.
    /// - [`StoreError::Validation`] when the transition is outside the
    ///   state machine; the report keeps its current status.
    pub fn update_status(&self, id: ReportId, next: Status) -> StoreResult<()> {
        let reports = {
            let mut state = self.write_state()?;
            let report = state
                .reports
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(StoreError::ReportNotFound(id))?;

            if report.status == next {
                return Ok(());
            }
            if !report.status.can_transition_to(next) {
                return Err(ValidationError::InvalidTransition {
                    from: report.status,
                    to: next,
                }
                .into());
            }

            report.status = next;
            state.reports.clone()
        };

        self.persist(&reports);
        self.publish(StoreEvent::StatusChanged { id, status: next });
        Ok(())
    }

    /// Flips the session actor between citizen and administrator.
    ///
    /// Pure UI-mode switch: the report collection is shared by both roles
    /// and is not touched. Returns the role now active.
    ///
    /// # Errors
    /// Only on internal lock failure.
    pub fn toggle_role(&self) -> StoreResult<Role> {
        let role = {
            let mut state = self.write_state()?;
            state.profile.role = state.profile.role.toggled();
            state.profile.role
        };

        self.publish(StoreEvent::RoleChanged { role });
        Ok(role)
    }

    /// Starts or stops the simulation feed.
    ///
    /// Enabling spawns a worker that synthesizes a report every
    /// [`FeedConfig::interval`] through the same insertion path as
    /// [`Self::add_report`]. Disabling cancels the worker and waits for
    /// it to exit; at most one already-running tick can still land.
    /// Calling with the current value is a no-op.
    ///
    /// # Errors
    /// Only on internal lock failure.
    pub fn set_simulation_mode(self: &Arc<Self>, enabled: bool) -> StoreResult<()> {
        {
            let mut state = self.write_state()?;
            if state.simulation_on == enabled {
                return Ok(());
            }
            state.simulation_on = enabled;
        }

        let mut feed = self
            .feed
            .lock()
            .map_err(|_| StoreError::internal("poisoned feed lock"))?;

        if enabled {
            *feed = Some(SimulationFeed::spawn(
                Arc::downgrade(self),
                self.config.simulation.clone(),
            ));
            debug!("simulation feed started");
        } else if let Some(running) = feed.take() {
            running.stop();
            debug!("simulation feed stopped");
        }
        drop(feed);

        self.publish(StoreEvent::SimulationChanged { enabled });
        Ok(())
    }

    /// Computes dashboard metrics over the current collection.
    ///
    /// Pure read; no mutation, no snapshot write.
    ///
    /// # Errors
    /// Only on internal lock failure.
    pub fn metrics(&self) -> StoreResult<Metrics> {
        let state = self.read_state()?;
        Ok(Metrics::compute(&state.reports, &self.config.metrics))
    }

    /// The current collection, most recent first.
    ///
    /// # Errors
    /// Only on internal lock failure.
    pub fn reports(&self) -> StoreResult<Vec<Report>> {
        Ok(self.read_state()?.reports.clone())
    }

    /// Looks up a single report by id.
    ///
    /// # Errors
    /// Only on internal lock failure.
    pub fn report(&self, id: ReportId) -> StoreResult<Option<Report>> {
        Ok(self
            .read_state()?
            .reports
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    /// The session profile.
    ///
    /// # Errors
    /// Only on internal lock failure.
    pub fn profile(&self) -> StoreResult<Profile> {
        Ok(self.read_state()?.profile.clone())
    }

    /// The active role.
    ///
    /// # Errors
    /// Only on internal lock failure.
    pub fn role(&self) -> StoreResult<Role> {
        Ok(self.read_state()?.profile.role)
    }

    /// True while the simulation feed is running.
    ///
    /// # Errors
    /// Only on internal lock failure.
    pub fn simulation_enabled(&self) -> StoreResult<bool> {
        Ok(self.read_state()?.simulation_on)
    }

    /// Registers a new event subscriber.
    ///
    /// # Errors
    /// Only on internal lock failure.
    pub fn subscribe(&self) -> StoreResult<StoreSubscription> {
        let (tx, rx) = bounded(self.config.event_capacity.max(1));
        self.subscribers
            .lock()
            .map_err(|_| StoreError::internal("poisoned subscriber lock"))?
            .push(tx);
        Ok(StoreSubscription::new(rx))
    }

    /// Events lost to full subscriber buffers since the store opened.
    #[must_use]
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events.load(Ordering::Relaxed)
    }

    fn read_state(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|_| StoreError::internal("poisoned state lock"))
    }

    fn write_state(&self) -> StoreResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|_| StoreError::internal("poisoned state lock"))
    }

    /// Fire-and-forget snapshot write. A failure never rolls back the
    /// in-memory mutation that triggered it.
    fn persist(&self, reports: &[Report]) {
        if let Err(err) = self.snapshots.save(reports) {
            warn!("snapshot write failed, in-memory state is authoritative: {err}");
        }
    }

    /// Non-blocking publish to every subscriber. Full buffers drop the
    /// event; disconnected subscribers are pruned.
    fn publish(&self, event: StoreEvent) {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            return;
        };

        subscribers.retain(|tx| match tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped_events.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
    }
}

impl Drop for ReportStore {
    fn drop(&mut self) {
        // Stop the feed worker so it does not outlive the store.
        if let Ok(mut feed) = self.feed.lock() {
            if let Some(running) = feed.take() {
                running.stop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::category::Category;
    use crate::snapshot::MemorySnapshots;
    use crate::status::Priority;

    fn draft(title: &str) -> ReportDraft {
        ReportDraft::new(title, Category::RoadSurface)
            .with_location("Carrera 50, Rionegro")
            .with_reporter("Vecino")
    }

    #[test]
    fn empty_snapshot_hydrates_seed_and_assigns_from_offset() {
        let store = ReportStore::open_in_memory();
        let reports = store.reports().unwrap();
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].id, ReportId::new(1025));

        let added = store.add_report(draft("Bache en la vía")).unwrap();
        assert_eq!(added.id, ReportId::new(1026));
    }

    #[test]
    fn malformed_snapshot_falls_back_to_seed() {
        let snapshots = Arc::new(MemorySnapshots::with_blob("][ not json"));
        let store = ReportStore::open(snapshots, StoreConfig::default());
        assert_eq!(store.reports().unwrap().len(), 4);
    }

    #[test]
    fn truly_empty_collection_starts_at_offset() {
        let snapshots = Arc::new(MemorySnapshots::with_blob("[]"));
        let store = ReportStore::open(snapshots, StoreConfig::default());
        assert!(store.reports().unwrap().is_empty());

        let added = store.add_report(draft("Primer reporte")).unwrap();
        assert_eq!(added.id, ReportId::new(1026));
    }

    #[test]
    fn add_report_front_inserts_and_stamps_fields() {
        let store = ReportStore::open_in_memory();
        let added = store
            .add_report(draft("Obstrucción en la vía").with_priority(Priority::High))
            .unwrap();

        assert_eq!(added.status, Status::Pending);
        assert_eq!(added.votes, 0);
        assert_eq!(added.emblem, "🚗");

        let reports = store.reports().unwrap();
        assert_eq!(reports[0], added);
        assert_eq!(reports.len(), 5);
    }

    #[test]
    fn add_report_ids_are_strictly_increasing() {
        let store = ReportStore::open_in_memory();
        let mut last = 0;
        for i in 0..10 {
            let added = store.add_report(draft(&format!("Reporte {i}"))).unwrap();
            assert!(added.id.value() > last);
            last = added.id.value();
        }
    }

    #[test]
    fn add_report_rejects_blank_title() {
        let store = ReportStore::open_in_memory();
        let before = store.reports().unwrap().len();

        let err = store.add_report(draft("  ")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.reports().unwrap().len(), before);
    }

    #[test]
    fn update_status_walks_the_state_machine() {
        let store = ReportStore::open_in_memory();
        let id = ReportId::new(1025);

        store.update_status(id, Status::InRepair).unwrap();
        store.update_status(id, Status::Resolved).unwrap();

        let report = store.report(id).unwrap().unwrap();
        assert_eq!(report.status, Status::Resolved);
    }

    #[test]
    fn update_status_rejects_illegal_transition() {
        let store = ReportStore::open_in_memory();
        // 1023 is seeded as Resolved.
        let err = store
            .update_status(ReportId::new(1023), Status::InRepair)
            .unwrap_err();
        assert!(err.is_validation());

        let report = store.report(ReportId::new(1023)).unwrap().unwrap();
        assert_eq!(report.status, Status::Resolved);
    }

    #[test]
    fn update_status_same_state_is_idempotent_noop() {
        let store = ReportStore::open_in_memory();
        let sub = store.subscribe().unwrap();

        store
            .update_status(ReportId::new(1025), Status::Pending)
            .unwrap();
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn update_status_unknown_id_is_not_found() {
        let store = ReportStore::open_in_memory();
        let err = store
            .update_status(ReportId::new(40_000), Status::InRepair)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn rejection_keeps_the_report_addressable() {
        let store = ReportStore::open_in_memory();
        let id = ReportId::new(1025);
        let total_before = store.reports().unwrap().len();

        store.update_status(id, Status::Rejected).unwrap();

        assert_eq!(store.reports().unwrap().len(), total_before);
        let report = store.report(id).unwrap().unwrap();
        assert_eq!(report.status, Status::Rejected);
    }

    #[test]
    fn resolving_updates_metrics_without_removal() {
        let store = ReportStore::open_in_memory();
        let before = store.metrics().unwrap();

        let id = ReportId::new(1025);
        store.update_status(id, Status::InRepair).unwrap();
        store.update_status(id, Status::Resolved).unwrap();

        let after = store.metrics().unwrap();
        assert_eq!(after.resolved, before.resolved + 1);
        assert_eq!(after.total, before.total);
        assert_eq!(after.pending, before.pending - 1);
    }

    #[test]
    fn toggle_role_twice_restores_original() {
        let store = ReportStore::open_in_memory();
        let original = store.role().unwrap();

        let flipped = store.toggle_role().unwrap();
        assert_ne!(flipped, original);

        let restored = store.toggle_role().unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn toggle_role_leaves_reports_untouched() {
        let store = ReportStore::open_in_memory();
        let before = store.reports().unwrap();
        store.toggle_role().unwrap();
        assert_eq!(store.reports().unwrap(), before);
    }

    #[test]
    fn mutations_rewrite_the_snapshot() {
        let snapshots = Arc::new(MemorySnapshots::new());
        let store = ReportStore::open(Arc::clone(&snapshots) as Arc<dyn SnapshotStore>, StoreConfig::default());

        store.add_report(draft("Bache nuevo")).unwrap();
        let persisted = snapshots.load().unwrap().unwrap();
        assert_eq!(persisted.len(), 5);
        assert_eq!(persisted[0].title, "Bache nuevo");

        store
            .update_status(ReportId::new(1025), Status::InRepair)
            .unwrap();
        let persisted = snapshots.load().unwrap().unwrap();
        let r1025 = persisted.iter().find(|r| r.id == ReportId::new(1025)).unwrap();
        assert_eq!(r1025.status, Status::InRepair);
    }

    #[test]
    fn subscribers_see_mutation_events() {
        let store = ReportStore::open_in_memory();
        let sub = store.subscribe().unwrap();

        let added = store.add_report(draft("Bache")).unwrap();
        store
            .update_status(added.id, Status::InRepair)
            .unwrap();
        store.toggle_role().unwrap();

        let events = sub.drain();
        assert_eq!(
            events,
            vec![
                StoreEvent::ReportAdded { id: added.id },
                StoreEvent::StatusChanged {
                    id: added.id,
                    status: Status::InRepair
                },
                StoreEvent::RoleChanged {
                    role: Role::Administrator
                },
            ]
        );
    }

    #[test]
    fn dropped_subscriber_is_pruned_and_counted() {
        let config = StoreConfig {
            event_capacity: 1,
            ..StoreConfig::default()
        };
        let store = ReportStore::open(Arc::new(MemorySnapshots::new()), config);

        let sub = store.subscribe().unwrap();
        store.add_report(draft("uno")).unwrap();
        store.add_report(draft("dos")).unwrap();
        // Buffer capacity 1: the second event was dropped.
        assert_eq!(store.dropped_events(), 1);

        drop(sub);
        store.add_report(draft("tres")).unwrap();
        // Disconnected subscriber pruned, no further drops counted.
        assert_eq!(store.dropped_events(), 1);
    }

    #[test]
    fn simulation_mode_same_value_is_noop() {
        let store = ReportStore::open_in_memory();
        let sub = store.subscribe().unwrap();

        store.set_simulation_mode(false).unwrap();
        assert!(sub.try_recv().is_none());
        assert!(!store.simulation_enabled().unwrap());
    }
}
