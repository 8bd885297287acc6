//! Derived dashboard metrics.
//!
//! Counts and the savings estimate are computed from the collection on
//! every call. The NPS score and average response time are fixed
//! placeholder constants carried on [`MetricsConfig`], which keeps them
//! distinguishable from the values that are actually derived.

use serde::Serialize;

use crate::report::Report;
use crate::status::Status;

/// Fixed constants behind the metrics computation.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Estimated cost per resolved report, in currency units.
    pub unit_cost: f64,
    /// Fraction of the unit cost counted as operational saving.
    pub savings_rate: f64,
    /// Placeholder net promoter score. Not derived from report data.
    pub nps_score: u32,
    /// Placeholder average response time in days. Not derived.
    pub avg_response_days: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            unit_cost: 850_000.0,
            savings_rate: 0.35,
            nps_score: 72,
            avg_response_days: 2.5,
        }
    }
}

/// Aggregates over the current collection plus the fixed placeholders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    /// Number of reports in the collection.
    pub total: usize,
    /// Reports with status [`Status::Resolved`].
    pub resolved: usize,
    /// Reports with status [`Status::Pending`].
    pub pending: usize,
    /// Estimated monthly saving in millions of currency units, rounded to
    /// one decimal.
    pub monthly_saving: f64,
    /// Placeholder NPS, copied from [`MetricsConfig`].
    pub nps_score: u32,
    /// Placeholder response time, copied from [`MetricsConfig`].
    pub avg_response_days: f64,
}

impl Metrics {
    /// Computes metrics for the given collection. Pure; no mutation, no I/O.
    #[must_use]
    pub fn compute(reports: &[Report], config: &MetricsConfig) -> Self {
        let total = reports.len();
        let resolved = reports
            .iter()
            .filter(|r| r.status == Status::Resolved)
            .count();
        let pending = reports
            .iter()
            .filter(|r| r.status == Status::Pending)
            .count();

        #[allow(clippy::cast_precision_loss)]
        let saving = resolved as f64 * config.unit_cost * config.savings_rate / 1_000_000.0;
        let monthly_saving = (saving * 10.0).round() / 10.0;

        Self {
            total,
            resolved,
            pending,
            monthly_saving,
            nps_score: config.nps_score,
            avg_response_days: config.avg_response_days,
        }
    }
}
