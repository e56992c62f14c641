//! Error types for the practice sheet pipeline

use thiserror::Error;

/// Failures reported by a pronunciation lookup collaborator
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The collaborator could not answer at all
    #[error("pronunciation lookup unavailable: {0}")]
    Unavailable(String),

    /// The collaborator answered with data of an unexpected shape
    #[error("malformed pronunciation data: {0}")]
    Malformed(String),
}

/// Failures loading a pronunciation dictionary
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("invalid dictionary JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dictionary root must be a JSON object")]
    NotAnObject,
}

/// Failures while drawing or serializing a worksheet document
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExportError {
    /// The drawing backend rejected a primitive
    #[error("drawing failed on page {page}: {message}")]
    Drawing { page: usize, message: String },

    /// The finished document could not be serialized
    #[error("document serialization failed: {0}")]
    Serialization(String),

    /// The document could not be written to its destination
    #[error("could not save document: {0}")]
    Io(String),
}

/// A primitive rejected by a vector-drawing backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct CanvasError(pub String);

impl CanvasError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Failures reading or writing the preference store
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("preference store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
