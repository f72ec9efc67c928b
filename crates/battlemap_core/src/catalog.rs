//! Terrain catalog: the fixed set of piece types the generator can place.
//!
//! The standard catalog is built once per process and shared read-only.
//! Custom catalogs exist for tests and tools that need different radii or
//! weights; the generator treats both the same way.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Radius of every piece in the standard catalog.
pub const STANDARD_RADIUS: f64 = 40.0;

/// Gameplay category of a terrain piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainCategory {
    /// Blocks movement and line of sight. Tokens keep clear of it.
    Blocking,
    /// Slows movement.
    Difficult,
    /// Low cover that can be crossed.
    Obstacle,
    /// Raised ground.
    Hill,
    /// Woods.
    Forest,
}

impl TerrainCategory {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blocking => "Blocking",
            Self::Difficult => "Difficult",
            Self::Obstacle => "Obstacle",
            Self::Hill => "Hill",
            Self::Forest => "Forest",
        }
    }
}

/// One placeable terrain piece type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerrainType {
    /// Index into the owning catalog.
    pub id: usize,
    /// Radius of the piece's bounding circle.
    pub radius: f64,
    /// Relative selection likelihood in `[0, 1]`.
    pub weight: f64,
    /// Opaque key the renderer uses to pick an image.
    pub visual_tag: &'static str,
    /// Gameplay category.
    pub category: TerrainCategory,
}

impl TerrainType {
    /// Whether tokens must keep clear of this piece.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.category == TerrainCategory::Blocking
    }
}

const fn standard(id: usize, visual_tag: &'static str, category: TerrainCategory) -> TerrainType {
    TerrainType {
        id,
        radius: STANDARD_RADIUS,
        weight: 1.0,
        visual_tag,
        category,
    }
}

const STANDARD_TYPES: [TerrainType; 9] = [
    standard(0, "stone_wall", TerrainCategory::Obstacle),
    standard(1, "pond", TerrainCategory::Difficult),
    standard(2, "house", TerrainCategory::Blocking),
    standard(3, "tree", TerrainCategory::Difficult),
    standard(4, "boulder", TerrainCategory::Hill),
    standard(5, "boulder2", TerrainCategory::Hill),
    standard(6, "boulder3", TerrainCategory::Hill),
    standard(7, "foliage", TerrainCategory::Difficult),
    standard(8, "crop_field", TerrainCategory::Difficult),
];

/// Ordered list of terrain types. A type's `id` equals its index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerrainCatalog {
    types: Vec<TerrainType>,
}

impl TerrainCatalog {
    /// Build a catalog from types, renumbering ids to match their order.
    ///
    /// Radii are clamped to be positive and weights into `[0, 1]`.
    #[must_use]
    pub fn new(types: impl IntoIterator<Item = TerrainType>) -> Self {
        let types = types
            .into_iter()
            .enumerate()
            .map(|(id, mut t)| {
                t.id = id;
                t.radius = t.radius.max(f64::EPSILON);
                t.weight = t.weight.clamp(0.0, 1.0);
                t
            })
            .collect();
        Self { types }
    }

    /// The process-wide standard catalog.
    pub fn standard() -> &'static Self {
        static CATALOG: OnceLock<TerrainCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| Self::new(STANDARD_TYPES))
    }

    /// Number of types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True if the catalog has no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Look up a type by id.
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&TerrainType> {
        self.types.get(id)
    }

    /// Look up a type by its visual tag.
    #[must_use]
    pub fn by_tag(&self, visual_tag: &str) -> Option<&TerrainType> {
        self.types.iter().find(|t| t.visual_tag == visual_tag)
    }

    /// All types in id order.
    pub fn iter(&self) -> impl Iterator<Item = &TerrainType> {
        self.types.iter()
    }
}
