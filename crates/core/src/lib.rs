//! Shared primitives for all Rust crates in Accessgrid.

#![forbid(unsafe_code)]

/// Actor primitives shared across services.
pub mod auth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::Actor;

/// Result type used across Accessgrid crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
///
/// Surrounding whitespace is trimmed on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Referenced role, permission or user does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Create operation collides with a unique catalog key.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// Write operation raced with a concurrent transaction.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Delete would orphan grants or remove a protected catalog entry.
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// Caller could not be identified.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::{AppError, NonEmptyString};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn non_empty_string_trims_surrounding_whitespace() {
        let value = NonEmptyString::new("  documents ").unwrap_or_else(|_| unreachable!());
        assert_eq!(value.as_str(), "documents");
    }

    #[test]
    fn errors_render_their_category() {
        let error = AppError::Duplicate("permission 'documents.delete' already exists".to_owned());
        assert_eq!(
            error.to_string(),
            "duplicate: permission 'documents.delete' already exists"
        );
    }
}
