//! In-memory snapshot backend.
//!
//! Holds the serialized blob in a lock, matching the observable behavior
//! of the durable backends without touching the filesystem. Intended for
//! tests and embedded usage.

use std::sync::RwLock;

use crate::report::Report;
use crate::snapshot::{SnapshotError, SnapshotStore};

fn lock_err(context: &'static str) -> SnapshotError {
    SnapshotError::Backend(format!("poisoned lock: {context}"))
}

/// Thread-safe in-memory snapshot backend.
#[derive(Debug, Default)]
pub struct MemorySnapshots {
    blob: RwLock<Option<String>>,
}

impl MemorySnapshots {
    /// Creates an empty backend (no snapshot present).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-seeded with a raw blob.
    ///
    /// Useful for testing hydration against malformed data.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: RwLock::new(Some(blob.into())),
        }
    }

    /// The raw stored blob, if any.
    ///
    /// # Errors
    /// [`SnapshotError::Backend`] when the lock is poisoned.
    pub fn blob(&self) -> Result<Option<String>, SnapshotError> {
        Ok(self
            .blob
            .read()
            .map_err(|_| lock_err("memory.blob"))?
            .clone())
    }
}

impl SnapshotStore for MemorySnapshots {
    fn load(&self) -> Result<Option<Vec<Report>>, SnapshotError> {
        let blob = self.blob.read().map_err(|_| lock_err("memory.load"))?;
        match blob.as_deref() {
            None => Ok(None),
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
        }
    }

    fn save(&self, reports: &[Report]) -> Result<(), SnapshotError> {
        let raw = serde_json::to_string(reports)?;
        let mut blob = self.blob.write().map_err(|_| lock_err("memory.save"))?;
        *blob = Some(raw);
        Ok(())
    }
}
