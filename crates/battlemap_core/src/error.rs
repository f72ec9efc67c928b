//! Error types for map and token generation.

use thiserror::Error;

/// Result type alias using [`GenerationError`].
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Top-level error type for all generation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// Map dimensions leave no room for piece centers.
    #[error("Invalid map dimensions {width}x{height} with edge boundary {edge_boundary}")]
    InvalidDimensions {
        /// Map width.
        width: f64,
        /// Map height.
        height: f64,
        /// Inset from every edge.
        edge_boundary: f64,
    },

    /// Seed string is not an unsigned 32-bit integer.
    #[error("Invalid seed: {0:?}")]
    InvalidSeed(String),

    /// Resource budget string could not be parsed.
    #[error("Invalid resource budget: {0}")]
    InvalidBudget(String),

    /// Scenario name or index is not recognised.
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    /// A single token could not be placed within its retry budget.
    #[error("Token {token_index} could not be placed after {attempts} attempts")]
    TokenPlacementFailed {
        /// Zero-based index of the token within the strategy.
        token_index: usize,
        /// Attempts spent on that token.
        attempts: u32,
    },

    /// A scenario strategy failed every attempt the driver allowed.
    #[error("Scenario '{scenario}' is infeasible after {attempts} attempts")]
    ScenarioInfeasible {
        /// Display name of the scenario.
        scenario: String,
        /// Strategy invocations made.
        attempts: u32,
    },

    /// Settings document failed to parse.
    #[error("Failed to parse generator settings: {0}")]
    SettingsParse(String),
}
