//! # Battlemap Core
//!
//! Procedural terrain layout and scenario token placement for tabletop
//! wargame battlefields.
//!
//! This crate contains **only** placement logic:
//! - No drawing (frames are plain draw-command lists)
//! - No IO
//! - No hidden randomness (every run carries its seed)
//!
//! A shared seed reproduces a map exactly, and a shared token seed
//! reproduces the token layout over it.
//!
//! ## Crate Structure
//!
//! - [`rng`] - Seeded random stream and seed parsing
//! - [`catalog`] - Terrain piece types
//! - [`settings`] - Weighting toggle and resource budgets
//! - [`map_generation`] - Rejection-sampling terrain placement
//! - [`scenario`] - Scenarios and their token strategies
//! - [`tokens`] - Token placement
//! - [`render`] - Draw-command frames and the render sink seam
//! - [`battlefield`] - Map plus tokens as one session

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod battlefield;
pub mod catalog;
pub mod error;
pub mod map_generation;
pub mod math;
pub mod render;
pub mod rng;
pub mod scenario;
pub mod settings;
pub mod tokens;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::battlefield::{Battlefield, BattlefieldRequest};
    pub use crate::catalog::{TerrainCatalog, TerrainCategory, TerrainType};
    pub use crate::error::{GenerationError, Result};
    pub use crate::map_generation::{MapConfig, MapOutcome, MapRun, PlacedTerrain};
    pub use crate::math::Vec2;
    pub use crate::render::{DebugLevel, MapFrame, RenderError, RenderSink, TokenFrame};
    pub use crate::rng::SeededRng;
    pub use crate::scenario::{Scenario, TokenStrategy};
    pub use crate::settings::{GeneratorSettings, ResourceBudget};
    pub use crate::tokens::{Token, TokenLayoutConfig, TokenRun};
}
