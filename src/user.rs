//! The demo-session actor.
//!
//! A single persona drives the whole demo; its role decides which surface
//! (citizen form or administrator dashboard) is rendered. Swapping role
//! never changes or filters the report collection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which presentation surface the session actor sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Submits reports through the citizen form.
    Citizen,
    /// Triages reports on the dashboard.
    Administrator,
}

impl Role {
    /// The other role. Two toggles restore the original.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Citizen => Self::Administrator,
            Self::Administrator => Self::Citizen,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Citizen => f.write_str("citizen"),
            Self::Administrator => f.write_str("administrator"),
        }
    }
}

/// Session persona. Name, trust level, and avatar are cosmetic labels
/// with no effect on report processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    pub name: String,
    /// Active role.
    pub role: Role,
    /// Cosmetic trust label attached to the citizen persona.
    pub trust_level: String,
    /// Display avatar glyph.
    pub avatar: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Ciudadano Activo".to_string(),
            role: Role::Citizen,
            trust_level: "Alto".to_string(),
            avatar: "👤".to_string(),
        }
    }
}
