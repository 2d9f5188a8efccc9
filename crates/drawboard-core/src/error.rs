//! Error types for the core crate.

use thiserror::Error;

/// Errors surfaced by the core.
///
/// Interaction never fails; only loading and saving scenes or configuration
/// can.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for core operations.
pub type BoardResult<T> = Result<T, BoardError>;
