//! Timer-driven synthetic report feed.
//!
//! When simulation mode is on, a dedicated worker thread synthesizes a
//! report every tick and inserts it through the store's normal mutation
//! path, so synthesized reports get unique ids, front insertion, snapshot
//! writes, and subscriber notifications like any citizen submission.
//!
//! The worker holds only a `Weak` store handle and a stop channel:
//! disabling simulation mode (or dropping the store) cancels it
//! deterministically rather than leaning on garbage collection. A tick
//! already running when the stop signal arrives may still land, bounded
//! to at most one extra report.

use std::sync::Weak;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Receiver, Sender};
use log::warn;
use rand::Rng;

use crate::category::Category;
use crate::report::{Coordinates, ReportDraft};
use crate::status::Priority;
use crate::store::ReportStore;

/// Synthetic reporter identity stamped on every generated report.
pub const MONITORING_REPORTER: &str = "Sistema de Monitoreo";

const SIM_LOCATION: &str = "Ubicación Simulada, Rionegro";
const SIM_DESCRIPTION: &str =
    "Reporte generado automáticamente por el sistema de simulación para demostración.";

const TITLES: [&str; 5] = [
    "Problema reportado por vecino",
    "Situación urgente en la zona",
    "Requiere atención inmediata",
    "Mantenimiento preventivo necesario",
    "Obstrucción en la vía pública",
];

/// Simulation feed parameters.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Tick interval between synthesized reports.
    pub interval: Duration,
    /// Latitude bounds of the synthetic coordinate box.
    pub lat_range: (f64, f64),
    /// Longitude bounds of the synthetic coordinate box.
    pub lng_range: (f64, f64),
    /// Probability that a synthesized report is High priority; the rest
    /// are Medium.
    pub high_priority_bias: f64,
    /// Exclusive upper bound for seeded vote counts.
    pub max_votes: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        // The coordinate box approximates the demo municipality.
        Self {
            interval: Duration::from_millis(3000),
            lat_range: (6.14, 6.17),
            lng_range: (-75.39, -75.36),
            high_priority_bias: 0.3,
            max_votes: 50,
        }
    }
}

/// Handle to a running feed worker.
///
/// Owned by the store while simulation mode is on.
#[derive(Debug)]
pub(crate) struct SimulationFeed {
    stop_tx: Sender<()>,
    join: Option<JoinHandle<()>>,
}

impl SimulationFeed {
    /// Spawns the worker thread.
    pub(crate) fn spawn(store: Weak<ReportStore>, config: FeedConfig) -> Self {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let join = thread::Builder::new()
            .name("civicalab-simulation".to_string())
            .spawn(move || worker_loop(&store, &config, stop_rx))
            .expect("failed to spawn civicalab simulation worker");

        Self {
            stop_tx,
            join: Some(join),
        }
    }

    /// Signals the worker and waits for it to exit.
    pub(crate) fn stop(mut self) {
        let _ = self.stop_tx.try_send(());
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for SimulationFeed {
    fn drop(&mut self) {
        // Best-effort: the worker also exits once its store is gone.
        let _ = self.stop_tx.try_send(());
    }
}

fn worker_loop(store: &Weak<ReportStore>, config: &FeedConfig, stop_rx: Receiver<()>) {
    let ticker = tick(config.interval);

    loop {
        select! {
            recv(stop_rx) -> _ => break,
            recv(ticker) -> msg => {
                if msg.is_err() {
                    break;
                }
                let Some(store) = store.upgrade() else {
                    break;
                };

                let (draft, votes) = synthesize(config);
                if let Err(err) = store.insert_new(draft, votes) {
                    warn!("simulation feed failed to insert a report: {err}");
                }
            }
        }
    }
}

/// Builds one randomized synthetic submission.
fn synthesize(config: &FeedConfig) -> (ReportDraft, u32) {
    let mut rng = rand::thread_rng();

    let category = Category::ALL[rng.gen_range(0..Category::ALL.len())];
    let title = format!(
        "{} - {}",
        TITLES[rng.gen_range(0..TITLES.len())],
        category.name()
    );

    let coordinates = Coordinates {
        lat: sample_range(&mut rng, config.lat_range),
        lng: sample_range(&mut rng, config.lng_range),
    };

    let priority = if rng.gen_bool(config.high_priority_bias.clamp(0.0, 1.0)) {
        Priority::High
    } else {
        Priority::Medium
    };

    let votes = if config.max_votes == 0 {
        0
    } else {
        rng.gen_range(0..config.max_votes)
    };

    let draft = ReportDraft::new(title, category)
        .with_location(SIM_LOCATION)
        .with_coordinates(coordinates)
        .with_priority(priority)
        .with_reporter(MONITORING_REPORTER)
        .with_description(SIM_DESCRIPTION);

    (draft, votes)
}

fn sample_range(rng: &mut impl Rng, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesize_respects_config() {
        let config = FeedConfig::default();

        for _ in 0..50 {
            let (draft, votes) = synthesize(&config);

            assert!(draft.validate().is_ok());
            assert!(Category::ALL.contains(&draft.category));
            assert_eq!(draft.reporter, MONITORING_REPORTER);
            assert_eq!(draft.location, SIM_LOCATION);
            assert!(draft.title.ends_with(draft.category.name()));

            assert!(draft.coordinates.lat >= config.lat_range.0);
            assert!(draft.coordinates.lat < config.lat_range.1);
            assert!(draft.coordinates.lng >= config.lng_range.0);
            assert!(draft.coordinates.lng < config.lng_range.1);

            assert!(matches!(draft.priority, Priority::High | Priority::Medium));
            assert!(votes < config.max_votes);
        }
    }

    #[test]
    fn test_synthesize_handles_degenerate_config() {
        let config = FeedConfig {
            lat_range: (6.15, 6.15),
            lng_range: (-75.37, -75.37),
            high_priority_bias: 0.0,
            max_votes: 0,
            ..FeedConfig::default()
        };

        let (draft, votes) = synthesize(&config);
        assert!((draft.coordinates.lat - 6.15).abs() < f64::EPSILON);
        assert_eq!(draft.priority, Priority::Medium);
        assert_eq!(votes, 0);
    }
}
