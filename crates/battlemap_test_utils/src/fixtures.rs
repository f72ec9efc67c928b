//! Test fixtures and helpers.
//!
//! Hand-placed layouts and small catalogs for consistent testing.

use battlemap_core::catalog::{TerrainCatalog, TerrainCategory, TerrainType};
use battlemap_core::map_generation::PlacedTerrain;
use battlemap_core::math::Vec2;

/// A single terrain type with the given radius, weight and category.
#[must_use]
pub fn terrain(
    visual_tag: &'static str,
    radius: f64,
    weight: f64,
    category: TerrainCategory,
) -> TerrainType {
    TerrainType {
        id: 0,
        radius,
        weight,
        visual_tag,
        category,
    }
}

/// Catalog whose only type has weight 0, so weighted selection never succeeds.
#[must_use]
pub fn zero_weight_catalog() -> TerrainCatalog {
    TerrainCatalog::new([terrain("ghost", 40.0, 0.0, TerrainCategory::Hill)])
}

/// Catalog of one huge type that fills any small map after one placement.
#[must_use]
pub fn crowded_catalog() -> TerrainCatalog {
    TerrainCatalog::new([terrain("keep", 400.0, 1.0, TerrainCategory::Blocking)])
}

/// Place the standard type `visual_tag` at `(x, y)` with no rotation.
///
/// # Panics
///
/// Panics if the standard catalog has no such tag.
#[must_use]
pub fn standard_node(visual_tag: &str, x: f64, y: f64) -> PlacedTerrain<'static> {
    let terrain = TerrainCatalog::standard()
        .by_tag(visual_tag)
        .unwrap_or_else(|| panic!("no standard terrain tagged {visual_tag}"));
    PlacedTerrain::new(Vec2::new(x, y), 0.0, terrain)
}

/// A standard house at `(x, y)` whose bounding radius is overridden.
#[must_use]
pub fn blocking_node(x: f64, y: f64, bounding_radius: f64) -> PlacedTerrain<'static> {
    PlacedTerrain {
        bounding_radius,
        ..standard_node("house", x, y)
    }
}

/// Blocking pieces every 50 units along `y`, closing that line to tokens.
#[must_use]
pub fn blocking_wall(y: f64, width: f64) -> Vec<PlacedTerrain<'static>> {
    let mut nodes = Vec::new();
    let mut x = 0.0;
    while x <= width {
        nodes.push(blocking_node(x, y, 30.0));
        x += 50.0;
    }
    nodes
}
