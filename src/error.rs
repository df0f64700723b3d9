//! Unified error types for the status server.

use thiserror::Error;

use crate::cluster::SourceError;

/// Unified error type for the status server.
#[derive(Error, Debug)]
pub enum StatusError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// A membership or registry snapshot could not be taken.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] SourceError),

    /// The response body could not be produced.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Snapshot seed file could not be loaded.
    #[error("failed to load snapshot {path}: {reason}")]
    Snapshot {
        /// Path of the snapshot file.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

/// Failures turning a view model into a response body.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Service groups could not be serialized.
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The display template failed to execute.
    #[error("template execution failed: {0}")]
    Template(#[from] askama::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, StatusError>;
