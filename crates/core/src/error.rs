//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is an expected, recoverable outcome. None of them leave the
/// catalog modified, and none of them are fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A candidate value failed validation (e.g. blank identifier).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A state transition would break a domain invariant.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// No entity exists with the requested identifier.
    #[error("not found: {0}")]
    NotFound(String),

    /// The entity exists but has no units available.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// The operation collides with existing state (e.g. duplicate identifier).
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

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn unavailable(id: impl Into<String>) -> Self {
        Self::Unavailable(id.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Stable machine-readable code, used by transport layers.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation_error",
            DomainError::InvariantViolation(_) => "invariant_violation",
            DomainError::NotFound(_) => "not_found",
            DomainError::Unavailable(_) => "unavailable",
            DomainError::Conflict(_) => "conflict",
        }
    }
}
