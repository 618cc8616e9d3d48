//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Raised only while building catalog records (validation, invariants,
/// duplicate keys). Querying an already-built catalog never fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. blank name, zero price).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A cross-field invariant was violated (e.g. discount anchor below price).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (blank, malformed slug).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Two records claim the same unique key.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
