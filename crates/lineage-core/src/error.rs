//! Error types for Lineage Core

use crate::person::PersonKey;
use thiserror::Error;

/// Result type alias using Lineage's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Lineage error types. Every public operation surfaces failures as one of
/// these kinds; callers branch on the kind, never on message text.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Person not found: {0}")]
    NotFound(PersonKey),

    #[error("Person already exists: {0}")]
    DuplicateKey(PersonKey),

    #[error("Relationship names the same person twice: {0}")]
    SelfRelationship(PersonKey),

    #[error("Person is already married: {0}")]
    AlreadyMarried(PersonKey),

    #[error("Backend unavailable: {0}")]
    Backend(String),
}

impl Error {
    /// Wrap a storage-layer failure as a backend error.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}
