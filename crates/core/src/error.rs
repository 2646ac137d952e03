//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every transport maps these variants onto its own failure shape (HTTP status
/// codes for REST, typed errors or `null` for GraphQL).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No live record has the requested identifier.
    #[error("not found")]
    NotFound,

    /// The backing store failed (connection, IO, poisoned lock).
    #[error("storage failure: {0}")]
    Storage(String),

    /// Missing or invalid credential.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        assert_eq!(
            DomainError::validation("name is required").to_string(),
            "validation failed: name is required"
        );
        assert_eq!(DomainError::not_found().to_string(), "not found");
    }

    #[test]
    fn not_found_is_distinct() {
        assert!(DomainError::NotFound.is_not_found());
        assert!(!DomainError::storage("down").is_not_found());
    }
}
