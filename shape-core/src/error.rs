//! Error types for editor operations.

use thiserror::Error;

use crate::{Position, ShapeId};

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur in editor operations.
///
/// None of these are fatal to the process: each one aborts only the
/// operation that raised it.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The scene adapter could not allocate a visual. The registry is unchanged.
    #[error("Failed to create visual: {0}")]
    CreationFailed(String),

    /// A position had a NaN or infinite component.
    #[error("Invalid position: {0:?}")]
    InvalidPosition(Position),

    /// The operation referenced a shape that is not in the registry.
    #[error("Shape not found: {0}")]
    NotFound(ShapeId),

    /// The imported payload is not a JSON array or is not JSON at all.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The persistence collaborator failed to read or write a document.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Scene document serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<std::io::Error> for EditorError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}
