//! Report categories and the static category table.
//!
//! The category set is closed: every report belongs to exactly one of the
//! five municipal service areas. Presentation metadata (color token, icon
//! reference, short description) lives in a fixed lookup table; the store
//! itself only needs the canonical name and the emblem glyph.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five fixed municipal issue categories.
///
/// The canonical string form is the Spanish display name used by the demo
/// municipality ("Malla Vial", "Aseo", ...); serde round-trips through it,
/// so a snapshot written by the original prototype hydrates unchanged.
///
/// # Examples
///
/// ```
/// use civicalab::Category;
///
/// assert_eq!(Category::RoadSurface.name(), "Malla Vial");
/// assert_eq!(Category::RoadSurface.emblem(), "🚗");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    /// Potholes and pavement damage ("Malla Vial").
    RoadSurface,
    /// Street lighting poles and lamps ("Alumbrado Público").
    PublicLighting,
    /// Trees and green zones ("Arborización").
    Forestry,
    /// Surveillance and emergencies ("Seguridad").
    Safety,
    /// Waste collection and street cleaning ("Aseo").
    Sanitation,
}

impl Category {
    /// All categories, in table order.
    pub const ALL: [Self; 5] = [
        Self::RoadSurface,
        Self::PublicLighting,
        Self::Forestry,
        Self::Safety,
        Self::Sanitation,
    ];

    /// Canonical display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RoadSurface => "Malla Vial",
            Self::PublicLighting => "Alumbrado Público",
            Self::Forestry => "Arborización",
            Self::Safety => "Seguridad",
            Self::Sanitation => "Aseo",
        }
    }

    /// Display glyph stamped on reports of this category.
    #[must_use]
    pub const fn emblem(self) -> &'static str {
        match self {
            Self::RoadSurface => "🚗",
            Self::PublicLighting => "💡",
            Self::Forestry => "🌳",
            Self::Safety => "🛡️",
            Self::Sanitation => "🗑️",
        }
    }

    /// The table row for this category.
    #[must_use]
    pub fn info(self) -> &'static CategoryInfo {
        // ALL and CATEGORIES share the same order.
        &CATEGORIES[self as usize]
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Err("category cannot be empty".to_string());
        }

        Self::ALL
            .into_iter()
            .find(|c| c.name() == value)
            .ok_or_else(|| {
                format!(
                    "unknown category: {value}. Expected one of: Malla Vial, Alumbrado Público, Arborización, Seguridad, Aseo"
                )
            })
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A row of the presentation-facing category table.
///
/// Consumed by rendering code for pickers, pins, and legends. The color
/// token and icon reference are opaque to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    /// Stable numeric id (1-based, table order).
    pub id: u8,
    /// The category this row describes.
    pub category: Category,
    /// Presentation color token.
    pub color: &'static str,
    /// Icon reference understood by the presentation layer.
    pub icon: &'static str,
    /// Short human description.
    pub description: &'static str,
}

/// The fixed category table, in the same order as [`Category::ALL`].
pub const CATEGORIES: [CategoryInfo; 5] = [
    CategoryInfo {
        id: 1,
        category: Category::RoadSurface,
        color: "bg-orange-500",
        icon: "construction",
        description: "Baches, pavimento",
    },
    CategoryInfo {
        id: 2,
        category: Category::PublicLighting,
        color: "bg-yellow-500",
        icon: "lightbulb",
        description: "Postes, luminarias",
    },
    CategoryInfo {
        id: 3,
        category: Category::Forestry,
        color: "bg-green-500",
        icon: "tree-pine",
        description: "Árboles, zonas verdes",
    },
    CategoryInfo {
        id: 4,
        category: Category::Safety,
        color: "bg-red-500",
        icon: "shield",
        description: "Vigilancia, emergencias",
    },
    CategoryInfo {
        id: 5,
        category: Category::Sanitation,
        color: "bg-blue-500",
        icon: "trash-2",
        description: "Recolección, limpieza",
    },
];
