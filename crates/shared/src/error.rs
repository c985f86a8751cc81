//! Application-wide error taxonomy.
//!
//! Repository and service errors in the other crates convert into
//! `AppError` at the boundary to the surrounding request-handling
//! layer. The variants mirror the write-path failure modes: malformed
//! input, protect-on-delete violations, protected-record writes,
//! unknown identifiers, and lost-update conflicts.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or semantically invalid input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Attempt to delete or alter a record still referenced elsewhere.
    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrity(String),

    /// Write attempt against protected data or outside the caller's branch scope.
    #[error("Permission denied: {0}")]
    Permission(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Concurrent modification or duplicate entry.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Permission(_) => 403,
            Self::NotFound(_) => 404,
            Self::ReferentialIntegrity(_) | Self::Conflict(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::ReferentialIntegrity(_) => "REFERENTIAL_INTEGRITY_ERROR",
            Self::Permission(_) => "PERMISSION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if retrying the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::Permission(String::new()).status_code(), 403);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(
            AppError::ReferentialIntegrity(String::new()).status_code(),
            409
        );
        assert_eq!(AppError::Conflict(String::new()).status_code(), 409);
        assert_eq!(AppError::Database(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::ReferentialIntegrity(String::new()).error_code(),
            "REFERENTIAL_INTEGRITY_ERROR"
        );
        assert_eq!(
            AppError::Permission(String::new()).error_code(),
            "PERMISSION_ERROR"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(AppError::Conflict(String::new()).error_code(), "CONFLICT");
    }

    #[test]
    fn test_retryable() {
        assert!(AppError::Conflict(String::new()).is_retryable());
        assert!(!AppError::Validation(String::new()).is_retryable());
        assert!(!AppError::Permission(String::new()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::ReferentialIntegrity("msg".into()).to_string(),
            "Referential integrity violation: msg"
        );
        assert_eq!(
            AppError::Permission("msg".into()).to_string(),
            "Permission denied: msg"
        );
    }
}
