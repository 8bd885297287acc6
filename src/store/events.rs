//! Store change notifications.
//!
//! The store publishes a [`StoreEvent`] to every subscriber after each
//! successful mutation. Delivery is non-blocking: a subscriber that stops
//! draining its stream loses events (counted by the store) rather than
//! stalling mutations.

use std::time::Duration;

use crossbeam_channel::Receiver;

use crate::report::ReportId;
use crate::status::Status;
use crate::user::Role;

/// A successful state change, published after the mutation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// A report was added (citizen submission or simulation feed).
    ReportAdded {
        /// Id of the new report.
        id: ReportId,
    },
    /// A report moved along the status state machine.
    StatusChanged {
        /// Id of the mutated report.
        id: ReportId,
        /// Its new status.
        status: Status,
    },
    /// The session actor switched surfaces.
    RoleChanged {
        /// The role now active.
        role: Role,
    },
    /// The simulation feed was started or stopped.
    SimulationChanged {
        /// True when the feed is now running.
        enabled: bool,
    },
}

/// A subscription stream of [`StoreEvent`]s.
///
/// Dropping the stream disconnects it; the store prunes disconnected
/// subscribers on the next publish.
#[derive(Debug)]
pub struct StoreSubscription {
    rx: Receiver<StoreEvent>,
}

impl StoreSubscription {
    pub(crate) fn new(rx: Receiver<StoreEvent>) -> Self {
        Self { rx }
    }

    /// Takes the next buffered event without blocking.
    #[must_use]
    pub fn try_recv(&self) -> Option<StoreEvent> {
        self.rx.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event.
    ///
    /// Returns `None` on timeout or when the store is gone.
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<StoreEvent> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Drains every currently buffered event.
    pub fn drain(&self) -> Vec<StoreEvent> {
        self.rx.try_iter().collect()
    }
}
