//! JSON-file snapshot backend.
//!
//! One pretty-printed JSON file holds the whole collection, the durable
//! analog of the original demo's local-storage record. Writes go through
//! a sibling temp file followed by a rename, so a crash mid-write leaves
//! the previous snapshot intact.

use std::fs;
use std::path::{Path, PathBuf};

use crate::report::Report;
use crate::snapshot::{SnapshotError, SnapshotStore};

/// Snapshot backend storing the collection in a single JSON file.
#[derive(Debug, Clone)]
pub struct FileSnapshots {
    path: PathBuf,
}

impl FileSnapshots {
    /// Default record name, kept from the original demo's storage key.
    pub const DEFAULT_FILE: &'static str = "civicalab_reports.json";

    /// Creates a backend writing to the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a backend using [`Self::DEFAULT_FILE`] under `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(Self::DEFAULT_FILE),
        }
    }

    /// The path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SnapshotStore for FileSnapshots {
    fn load(&self) -> Result<Option<Vec<Report>>, SnapshotError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, reports: &[Report]) -> Result<(), SnapshotError> {
        let raw = serde_json::to_vec_pretty(reports)?;

        let temp = self.temp_path();
        fs::write(&temp, &raw)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    use crate::category::Category;
    use crate::report::{Coordinates, ReportDraft, ReportId};

    fn sample() -> Vec<Report> {
        vec![
            Report::from_draft(
                ReportId::new(1025),
                ReportDraft::new("Bache grande en la Autopista", Category::RoadSurface)
                    .with_coordinates(Coordinates { lat: 6.1549, lng: -75.4194 }),
                45,
                Utc::now(),
            ),
            Report::from_draft(
                ReportId::new(1024),
                ReportDraft::new("Luminaria apagada", Category::PublicLighting),
                23,
                Utc::now(),
            ),
        ]
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileSnapshots::in_dir(dir.path());
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileSnapshots::in_dir(dir.path());

        let reports = sample();
        backend.save(&reports).unwrap();

        let loaded = backend.load().unwrap().unwrap();
        assert_eq!(loaded, reports);
        assert_eq!(loaded[0].id, ReportId::new(1025));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileSnapshots::in_dir(dir.path());
        backend.save(&sample()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![FileSnapshots::DEFAULT_FILE]);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileSnapshots::in_dir(dir.path());
        fs::write(backend.path(), "{ truncated").unwrap();

        assert!(matches!(
            backend.load(),
            Err(SnapshotError::Serialization(_))
        ));
    }
}
