//! Error handling module for phonequote
//!
//! The valuation engine and the storage resolver never fail. These errors
//! cover the edges around them: catalog contents that fail validation, and
//! caller-side validation of a configuration before it reaches the engine.
//! Catalog file I/O reports through `anyhow` with context instead.

use thiserror::Error;

/// Main error type for phonequote
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Reference data that fails validation
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Caller input out of range
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Unknown storage option: {0}")]
    UnknownStorage(String),

    #[error("Storage option {storage} is not sold for {model}")]
    StorageNotAllowed { model: String, storage: String },

    /// A check name that matches neither a functional nor a cosmetic check
    #[error("Unknown check: {0}")]
    UnknownCheck(String),
}

/// Result type alias for phonequote operations
pub type Result<T> = std::result::Result<T, QuoteError>;

impl QuoteError {
    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage_not_allowed(model: impl Into<String>, storage: impl Into<String>) -> Self {
        Self::StorageNotAllowed {
            model: model.into(),
            storage: storage.into(),
        }
    }
}
