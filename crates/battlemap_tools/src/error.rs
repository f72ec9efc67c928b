//! Error types for the command-line tools.

use std::path::PathBuf;

use battlemap_core::error::GenerationError;
use battlemap_core::render::RenderError;
use thiserror::Error;

/// Result type alias using [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;

/// Everything that can stop a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Generation rejected the request or failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Bad render options.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A settings file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Output could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}
