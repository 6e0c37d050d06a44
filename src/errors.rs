/*!
 * Error types for the autoedit pipeline.
 *
 * Structural failures that make a timeline unusable are modelled as
 * `PipelineError` values. Consistency warnings and assignment misses are
 * not errors: stages return them alongside their output.
 */

use thiserror::Error;

/// Errors that abort a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The script produced no segments
    #[error("Script is empty: no segments could be produced")]
    EmptyScript,

    /// A duration that must be positive was zero or negative
    #[error("Invalid duration for {context}: {frames} frames")]
    InvalidDuration {
        /// What the duration belongs to
        context: String,
        /// Offending frame count
        frames: i64,
    },

    /// The avatar clip has no source reference
    #[error("Avatar source is missing")]
    MissingAvatarSource,

    /// Timeline validation reported structural errors
    #[error("Timeline is invalid: {}", errors.join("; "))]
    InvalidTimeline {
        /// Errors reported by the validator
        errors: Vec<String>,
    },

    /// A configured importance pattern failed to compile
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Configuration values are inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the editing pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Error while parsing or writing JSON documents
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}
