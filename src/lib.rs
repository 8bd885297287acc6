//! # CivicaLab Report Store
//!
//! Core state container for a municipal citizen-reporting demo: citizens
//! submit issue reports (potholes, lighting, trees, safety, sanitation)
//! and an administrator dashboard triages them. This crate owns all of
//! the application's state and logic; rendering layers are external
//! collaborators that read the collection and call the operations here.
//!
//! ## Core Concepts
//!
//! - **Report**: a single citizen-submitted or system-generated issue record
//! - **Report Store**: the single source of truth and only mutation path
//! - **Snapshot**: the durable serialized form of the report collection
//! - **Simulation mode**: a background feed that periodically synthesizes
//!   reports for demonstrations
//!
//! ## Usage
//!
//! ```rust
//! use civicalab::{Category, ReportDraft, ReportStore, Status};
//!
//! let store = ReportStore::open_in_memory();
//!
//! let report = store
//!     .add_report(ReportDraft::new("Bache en la vía", Category::RoadSurface))
//!     .expect("valid draft");
//! assert_eq!(report.status, Status::Pending);
//!
//! store.update_status(report.id, Status::InRepair).expect("legal transition");
//! let metrics = store.metrics().expect("store is usable");
//! assert_eq!(metrics.total, 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod category;
pub mod error;
pub mod metrics;
pub mod report;
pub mod simulation;
pub mod snapshot;
pub mod status;
pub mod store;
pub mod user;

// Re-export primary types at crate root for convenience
pub use category::{Category, CategoryInfo, CATEGORIES};
pub use error::{StoreError, StoreResult, ValidationError};
pub use metrics::{Metrics, MetricsConfig};
pub use report::{Coordinates, Report, ReportDraft, ReportId};
pub use simulation::{FeedConfig, MONITORING_REPORTER};
pub use snapshot::{FileSnapshots, MemorySnapshots, SnapshotError, SnapshotStore};
pub use status::{Priority, Status};
pub use store::{ReportStore, StoreConfig, StoreEvent, StoreSubscription};
pub use user::{Profile, Role};
