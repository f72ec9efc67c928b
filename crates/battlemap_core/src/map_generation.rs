//! Procedural terrain layout by rejection sampling.
//!
//! A run picks a target piece count, then repeatedly draws a terrain type
//! and a position inside the edge-inset rectangle, keeping the candidate
//! only if its bounding circle clears every piece already placed. The run
//! is best-effort: it stops after a fixed number of attempts and returns
//! whatever it managed to place.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::catalog::{TerrainCatalog, TerrainType};
use crate::error::{GenerationError, Result};
use crate::math::{Rect, Vec2};
use crate::rng::SeededRng;
use crate::settings::{GeneratorSettings, ResourceBudget};

/// Scale applied to a type's radius to get its bounding circle.
///
/// Below 1 so neighbouring artwork may overlap slightly at the edges.
pub const BOUND_SCALING: f64 = 0.85;

/// Placement attempts per run, accepted or not.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 50;

/// Catalog draws allowed when selecting one terrain type.
pub const MAX_SELECTION_DRAWS: u32 = 1000;

/// Fewest pieces a run aims for.
pub const MIN_TARGET_NODES: u32 = 8;

/// Number of distinct target counts above the minimum (8..=11).
pub const TARGET_NODE_SPREAD: usize = 4;

/// Map configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Map width.
    pub width: f64,
    /// Map height.
    pub height: f64,
    /// Distance from every edge inside which no piece center may fall.
    pub edge_boundary: f64,
    /// Reject types probabilistically by weight.
    pub weighted: bool,
    /// Seed to reproduce; `None` draws a fresh one.
    pub seed: Option<u32>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            edge_boundary: 50.0,
            weighted: false,
            seed: None,
        }
    }
}

impl MapConfig {
    /// Set the map size.
    #[must_use]
    pub fn with_dimensions(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the edge boundary.
    #[must_use]
    pub fn with_edge_boundary(mut self, edge_boundary: f64) -> Self {
        self.edge_boundary = edge_boundary;
        self
    }

    /// Enable or disable weighted selection.
    #[must_use]
    pub const fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Copy the toggles from generator settings.
    #[must_use]
    pub fn with_settings(mut self, settings: &GeneratorSettings) -> Self {
        self.weighted = settings.weighted;
        self
    }

    /// Rectangle that piece centers must fall in.
    pub fn placement_area(&self) -> Result<Rect> {
        Rect::inset(self.width, self.height, self.edge_boundary).ok_or(
            GenerationError::InvalidDimensions {
                width: self.width,
                height: self.height,
                edge_boundary: self.edge_boundary,
            },
        )
    }
}

/// A terrain piece placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedTerrain<'c> {
    /// Center of the piece.
    pub position: Vec2,
    /// Rotation in radians, `[0, 2π)`. Cosmetic only.
    pub angle: f64,
    /// Radius used for overlap tests.
    pub bounding_radius: f64,
    /// Catalog entry this piece is an instance of.
    pub terrain: &'c TerrainType,
}

impl<'c> PlacedTerrain<'c> {
    /// Place `terrain` at `position`, deriving the bounding radius.
    #[must_use]
    pub fn new(position: Vec2, angle: f64, terrain: &'c TerrainType) -> Self {
        Self {
            position,
            angle,
            bounding_radius: bounding_radius(terrain),
            terrain,
        }
    }

    /// True if a circle at `position` with `radius` overlaps this piece.
    #[must_use]
    pub fn overlaps(&self, position: Vec2, radius: f64) -> bool {
        self.position.within(position, self.bounding_radius + radius)
    }
}

/// Bounding radius of a type once placed.
#[must_use]
pub fn bounding_radius(terrain: &TerrainType) -> f64 {
    terrain.radius * BOUND_SCALING
}

/// How a map run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapOutcome {
    /// Reached the target count.
    Complete,
    /// Ran out of placement attempts; the layout is partial.
    AttemptsExhausted,
    /// No catalog entry could be selected; the layout is partial.
    NoSelectableTerrain,
}

/// Result of one map generation run.
#[derive(Debug, Clone, Serialize)]
pub struct MapRun<'c> {
    /// Seed the run used.
    pub seed: u32,
    /// Configuration the run used, with the resolved seed.
    pub config: MapConfig,
    /// Piece count the run aimed for.
    pub target: u32,
    /// Placement attempts made.
    pub attempts: u32,
    /// Why the run stopped.
    pub outcome: MapOutcome,
    /// Budget left after placement, if one was supplied.
    pub remaining_budget: Option<ResourceBudget>,
    /// Placed pieces in placement order.
    pub nodes: Vec<PlacedTerrain<'c>>,
}

impl MapRun<'_> {
    /// Number of placed pieces of type `id`.
    #[must_use]
    pub fn count_of(&self, id: usize) -> usize {
        self.nodes.iter().filter(|n| n.terrain.id == id).count()
    }

    /// True if the run reached its target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcome == MapOutcome::Complete
    }
}

/// Generate a map, drawing a fresh seed when the config has none.
pub fn generate<'c>(
    config: &MapConfig,
    catalog: &'c TerrainCatalog,
    budget: Option<ResourceBudget>,
) -> Result<MapRun<'c>> {
    let mut rng = SeededRng::from_optional_seed(config.seed);
    generate_with_rng(config, catalog, budget, &mut rng)
}

/// Generate a map from an existing random stream.
///
/// The run's seed is taken from `rng`; `config.seed` is ignored.
pub fn generate_with_rng<'c>(
    config: &MapConfig,
    catalog: &'c TerrainCatalog,
    budget: Option<ResourceBudget>,
    rng: &mut SeededRng,
) -> Result<MapRun<'c>> {
    let area = config.placement_area()?;
    let mut budget = budget.map(|b| b.truncated(catalog.len()));

    #[allow(clippy::cast_possible_truncation)]
    let mut target = MIN_TARGET_NODES + rng.next_index(TARGET_NODE_SPREAD) as u32;
    if let Some(budget) = &budget {
        target = target.min(budget.total());
    }

    let mut nodes: Vec<PlacedTerrain<'c>> = Vec::with_capacity(target as usize);
    let mut attempts = 0;
    let mut outcome = MapOutcome::Complete;

    while (nodes.len() as u32) < target {
        if attempts >= MAX_PLACEMENT_ATTEMPTS {
            outcome = MapOutcome::AttemptsExhausted;
            break;
        }
        attempts += 1;

        let Some(terrain) = select_terrain(catalog, config.weighted, budget.as_ref(), rng) else {
            tracing::warn!(
                seed = rng.seed(),
                placed = nodes.len(),
                "No terrain type is selectable, stopping map generation"
            );
            outcome = MapOutcome::NoSelectableTerrain;
            break;
        };

        let position = Vec2::new(
            rng.next_range(area.min.x, area.max.x),
            rng.next_range(area.min.y, area.max.y),
        );
        let radius = bounding_radius(terrain);
        if overlaps_any(&nodes, position, radius) {
            tracing::trace!(x = position.x, y = position.y, id = terrain.id, "Candidate overlaps");
            continue;
        }

        let angle = rng.next_f64() * TAU;
        nodes.push(PlacedTerrain::new(position, angle, terrain));
        if let Some(budget) = budget.as_mut() {
            budget.consume(terrain.id);
        }
    }

    tracing::debug!(
        seed = rng.seed(),
        target,
        placed = nodes.len(),
        attempts,
        ?outcome,
        "Map generated"
    );

    if cfg!(feature = "debug-validation") {
        if let Some((a, b)) = find_overlap(&nodes) {
            tracing::error!(a, b, "Generated map has overlapping pieces");
        }
    }

    Ok(MapRun {
        seed: rng.seed(),
        config: MapConfig {
            seed: Some(rng.seed()),
            ..config.clone()
        },
        target,
        attempts,
        outcome,
        remaining_budget: budget,
        nodes,
    })
}

/// Pick a terrain type by rejection sampling over the whole catalog.
///
/// A draw is rejected when the budget has none of that type left, or, in
/// weighted mode, when a fresh uniform value exceeds the type's weight.
/// Returns `None` if nothing passes within [`MAX_SELECTION_DRAWS`] draws or
/// the budget has nothing left at all.
pub fn select_terrain<'c>(
    catalog: &'c TerrainCatalog,
    weighted: bool,
    budget: Option<&ResourceBudget>,
    rng: &mut SeededRng,
) -> Option<&'c TerrainType> {
    if catalog.is_empty() || budget.is_some_and(|b| !b.has_any_below(catalog.len())) {
        return None;
    }

    for _ in 0..MAX_SELECTION_DRAWS {
        let terrain = catalog.get(rng.next_index(catalog.len()))?;
        if budget.is_some_and(|b| b.remaining(terrain.id) < 1) {
            continue;
        }
        if weighted && rng.next_f64() > terrain.weight {
            continue;
        }
        return Some(terrain);
    }
    None
}

/// True if a circle at `position` with `radius` overlaps any placed piece.
///
/// Scans in placement order and stops at the first overlap.
#[must_use]
pub fn overlaps_any(nodes: &[PlacedTerrain<'_>], position: Vec2, radius: f64) -> bool {
    nodes.iter().any(|node| node.overlaps(position, radius))
}

/// First pair of pieces whose bounding circles overlap, if any.
#[must_use]
pub fn find_overlap(nodes: &[PlacedTerrain<'_>]) -> Option<(usize, usize)> {
    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate().skip(i + 1) {
            if a.overlaps(b.position, b.bounding_radius) {
                return Some((i, j));
            }
        }
    }
    None
}
