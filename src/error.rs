//! Error types for the report store.
//!
//! All errors are strongly typed using thiserror. Validation and not-found
//! conditions are recoverable: the operation is rejected, state is
//! unchanged, and the caller is informed synchronously. No error here is
//! fatal to the store.

use thiserror::Error;

use crate::report::ReportId;
use crate::status::Status;

/// Validation errors raised before any state is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The submission title is empty or blank. Surfaced as a blocking
    /// message in the citizen flow.
    #[error("report title cannot be empty")]
    EmptyTitle,

    /// The requested status change is outside the state machine.
    #[error("illegal status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status of the report.
        from: Status,
        /// Requested status.
        to: Status,
    },
}

/// Top-level error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input validation failed; the collection is unchanged.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No report with the given id exists.
    #[error("report not found: {0}")]
    ReportNotFound(ReportId),

    /// Internal invariant failure (e.g. a poisoned lock).
    #[error("internal error: {message}")]
    Internal {
        /// Human-readable context.
        message: String,
    },
}

impl StoreError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a not-found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ReportNotFound(_))
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
