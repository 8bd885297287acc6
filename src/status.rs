//! Report lifecycle status and priority.
//!
//! The status field moves along a small state machine: a report starts
//! `Pending`, triage moves it to `InRepair` or `Rejected`, and repair work
//! finishes at `Resolved`. `Resolved` and `Rejected` are terminal; a
//! rejected report stays in the collection and keeps its id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Processing state of a report.
///
/// Canonical string forms are the demo's Spanish labels, so snapshots from
/// the original prototype hydrate unchanged.
///
/// # Examples
///
/// ```
/// use civicalab::Status;
///
/// assert!(Status::Pending.can_transition_to(Status::InRepair));
/// assert!(!Status::Resolved.can_transition_to(Status::Pending));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Status {
    /// Submitted, waiting for triage ("Pendiente"). Initial state.
    Pending,
    /// Approved and being worked on ("En Reparación").
    InRepair,
    /// Work finished ("Resuelto"). Terminal.
    Resolved,
    /// Declined at triage ("Rechazado"). Terminal.
    Rejected,
}

impl Status {
    /// Canonical display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::InRepair => "En Reparación",
            Self::Resolved => "Resuelto",
            Self::Rejected => "Rechazado",
        }
    }

    /// True when the state machine permits moving from `self` to `next`.
    ///
    /// Same-state is not a transition; callers decide whether to treat it
    /// as an idempotent no-op (the store does).
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::InRepair)
                | (Self::Pending, Self::Rejected)
                | (Self::InRepair, Self::Resolved)
        )
    }

    /// True for states with no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Rejected)
    }
}

impl TryFrom<String> for Status {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim() {
            "Pendiente" => Ok(Self::Pending),
            "En Reparación" => Ok(Self::InRepair),
            "Resuelto" => Ok(Self::Resolved),
            "Rechazado" => Ok(Self::Rejected),
            other => Err(format!(
                "unknown status: {other}. Expected one of: Pendiente, En Reparación, Resuelto, Rechazado"
            )),
        }
    }
}

impl From<Status> for String {
    fn from(value: Status) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Urgency assigned to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Priority {
    /// "Alta"
    High,
    /// "Media"
    Medium,
    /// "Baja"
    Low,
}

impl Priority {
    /// Canonical display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::High => "Alta",
            Self::Medium => "Media",
            Self::Low => "Baja",
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim() {
            "Alta" => Ok(Self::High),
            "Media" => Ok(Self::Medium),
            "Baja" => Ok(Self::Low),
            other => Err(format!(
                "unknown priority: {other}. Expected one of: Alta, Media, Baja"
            )),
        }
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Status; 4] = [
        Status::Pending,
        Status::InRepair,
        Status::Resolved,
        Status::Rejected,
    ];

    #[test]
    fn test_transition_table_is_exact() {
        let legal = [
            (Status::Pending, Status::InRepair),
            (Status::Pending, Status::Rejected),
            (Status::InRepair, Status::Resolved),
        ];

        for from in ALL {
            for to in ALL {
                let expected = legal.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "unexpected verdict for {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!Status::Pending.is_terminal());
        assert!(!Status::InRepair.is_terminal());
        assert!(Status::Resolved.is_terminal());
        assert!(Status::Rejected.is_terminal());
    }

    #[test]
    fn test_status_serde_is_display_name() {
        let json = serde_json::to_value(Status::InRepair).unwrap();
        assert_eq!(json, serde_json::Value::String("En Reparación".to_string()));

        let parsed: Status = serde_json::from_str("\"Rechazado\"").unwrap();
        assert_eq!(parsed, Status::Rejected);

        let unknown: Result<Status, _> = serde_json::from_str("\"Cerrado\"");
        assert!(unknown.is_err());
    }

    #[test]
    fn test_priority_serde_round_trip() {
        for p in [Priority::High, Priority::Medium, Priority::Low] {
            let json = serde_json::to_string(&p).unwrap();
            let back: Priority = serde_json::from_str(&json).unwrap();
            assert_eq!(back, p);
        }

        let unknown: Result<Priority, _> = serde_json::from_str("\"Urgente\"");
        assert!(unknown.is_err());
    }
}
