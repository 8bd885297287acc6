//! Persistence adapter: durable snapshot of the report collection.
//!
//! The snapshot is a single named record holding the full ordered
//! collection. It is read once when the store opens and rewritten after
//! every mutating operation. Backends are pluggable behind
//! [`SnapshotStore`]:
//! - [`MemorySnapshots`] for tests and embedded use
//! - [`FileSnapshots`] for a durable JSON file (the browser local-storage
//!   analog of the original demo)

mod file;
mod memory;

pub use file::FileSnapshots;
pub use memory::MemorySnapshots;

use thiserror::Error;

use crate::report::Report;

/// Errors that can occur in a snapshot backend.
///
/// These never propagate out of store operations: a failed read falls
/// back to seed data, a failed write is logged and the in-memory
/// mutation stands.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Underlying I/O failure.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored blob is not a valid report collection.
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend invariant failure (e.g. a poisoned lock).
    #[error("snapshot backend error: {0}")]
    Backend(String),
}

/// Contract a snapshot backend must implement.
///
/// Implementations must be safe to call from the mutating thread and the
/// simulation feed worker; writes replace the record wholesale.
pub trait SnapshotStore: Send + Sync {
    /// Reads the persisted collection. `Ok(None)` when no snapshot exists.
    ///
    /// # Errors
    /// Returns [`SnapshotError`] when the record exists but cannot be read
    /// or decoded; the caller treats that as "no usable snapshot".
    fn load(&self) -> Result<Option<Vec<Report>>, SnapshotError>;

    /// Replaces the snapshot with the full ordered collection.
    ///
    /// # Errors
    /// Returns [`SnapshotError`] when the record cannot be written.
    fn save(&self, reports: &[Report]) -> Result<(), SnapshotError>;
}
