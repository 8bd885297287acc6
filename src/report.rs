//! Report records and submission drafts.
//!
//! A [`Report`] is the unit everything else operates on: citizens submit
//! drafts, triage mutates status, metrics aggregate over the collection,
//! and the snapshot backend persists it verbatim.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::ValidationError;
use crate::status::{Priority, Status};

/// Unique report identifier.
///
/// Ids are monotonically assigned within a store's lifetime and never
/// reused, even after a report is rejected. Rendering code relies on them
/// being small readable integers (the demo seed starts at 1022).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ReportId(u64);

impl ReportId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw id value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ReportId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Map placement point.
///
/// Used only to drop a pin; there is no validation that it lies within any
/// real municipal boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

/// A citizen-submitted or system-generated issue record.
///
/// `created_at` is set once at creation and immutable thereafter; it
/// serializes as an RFC 3339 string, which sorts lexicographically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Unique identifier, assigned by the store.
    pub id: ReportId,
    /// Free-text summary. Display-truncated by presentation, not here.
    pub title: String,
    /// One of the five fixed categories.
    pub category: Category,
    /// Free-text address description.
    pub location: String,
    /// Map placement point.
    pub coordinates: Coordinates,
    /// Current state-machine position.
    pub status: Status,
    /// Assigned urgency.
    pub priority: Priority,
    /// Submitter name, or the synthetic monitoring identity.
    pub reporter: String,
    /// Creation timestamp, immutable.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Support counter. No increment operation is exposed yet.
    pub votes: u32,
    /// Free-text detail.
    pub description: String,
    /// Display glyph, derived from the category at creation time.
    pub emblem: String,
}

impl Report {
    /// Builds the stored record for an accepted draft.
    ///
    /// Status starts at [`Status::Pending`] and the emblem is stamped from
    /// the draft's category. Citizen submissions pass `votes = 0`; the
    /// simulation feed seeds a nonzero count.
    #[must_use]
    pub fn from_draft(
        id: ReportId,
        draft: ReportDraft,
        votes: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        let emblem = draft.category.emblem().to_string();
        Self {
            id,
            title: draft.title,
            category: draft.category,
            location: draft.location,
            coordinates: draft.coordinates,
            status: Status::Pending,
            priority: draft.priority,
            reporter: draft.reporter,
            created_at,
            votes,
            description: draft.description,
            emblem,
        }
    }
}

/// Submission input: the citizen-supplied fields only.
///
/// Id, status, votes, and creation time are assigned by the store on
/// acceptance. The category is a closed enum, so "missing category" is
/// unrepresentable here; unknown names are rejected at the serde boundary.
///
/// # Examples
///
/// ```
/// use civicalab::{Category, Coordinates, Priority, ReportDraft};
///
/// let draft = ReportDraft::new("Bache en la vía", Category::RoadSurface)
///     .with_location("Carrera 50 # 12-34, Rionegro")
///     .with_coordinates(Coordinates { lat: 6.155, lng: -75.374 })
///     .with_priority(Priority::High)
///     .with_reporter("María Gómez");
/// assert!(draft.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    /// Free-text summary. Must not be blank.
    pub title: String,
    /// One of the five fixed categories.
    pub category: Category,
    /// Free-text address description.
    #[serde(default)]
    pub location: String,
    /// Map placement point.
    pub coordinates: Coordinates,
    /// Assigned urgency.
    pub priority: Priority,
    /// Submitter name.
    #[serde(default)]
    pub reporter: String,
    /// Free-text detail.
    #[serde(default)]
    pub description: String,
}

impl ReportDraft {
    /// Creates a draft with the required fields and empty optional ones.
    #[must_use]
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            category,
            location: String::new(),
            coordinates: Coordinates { lat: 0.0, lng: 0.0 },
            priority: Priority::Medium,
            reporter: String::new(),
            description: String::new(),
        }
    }

    /// Sets the address description.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the map placement point.
    #[must_use]
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = coordinates;
        self
    }

    /// Sets the urgency.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the submitter name.
    #[must_use]
    pub fn with_reporter(mut self, reporter: impl Into<String>) -> Self {
        self.reporter = reporter.into();
        self
    }

    /// Sets the detail text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Checks the submission constraints.
    ///
    /// # Errors
    /// [`ValidationError::EmptyTitle`] when the title is empty or blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}
