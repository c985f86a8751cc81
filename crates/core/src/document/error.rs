//! Document lifecycle errors.

use thiserror::Error;

use super::status::DocumentStatus;
use super::validation::ValidationReport;

/// Errors raised by the shared document machinery.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// One or more line or header fields failed validation.
    #[error("validation failed: {0}")]
    Invalid(ValidationReport),

    /// The document has left `Draft` and its content is frozen.
    #[error("document is {0} and can no longer be edited")]
    NotEditable(DocumentStatus),

    /// The requested status transition is not allowed.
    #[error("cannot transition from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: DocumentStatus,
        /// Requested status.
        to: DocumentStatus,
    },

    /// Concurrent writers raced on the same document.
    #[error("version mismatch: expected {expected}, found {actual}")]
    VersionMismatch {
        /// Version the writer read before mutating.
        expected: i32,
        /// Version currently stored.
        actual: i32,
    },

    /// A payment would exceed the remaining balance.
    #[error("payment exceeds balance due")]
    Overpayment,
}

impl DocumentError {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "DOCUMENT_INVALID",
            Self::NotEditable(_) => "DOCUMENT_NOT_EDITABLE",
            Self::InvalidTransition { .. } => "DOCUMENT_INVALID_TRANSITION",
            Self::VersionMismatch { .. } => "DOCUMENT_VERSION_MISMATCH",
            Self::Overpayment => "DOCUMENT_OVERPAYMENT",
        }
    }
}

/// Rejects content mutations on documents that have left `Draft`.
pub fn ensure_editable(status: DocumentStatus) -> Result<(), DocumentError> {
    if status.is_editable() {
        Ok(())
    } else {
        Err(DocumentError::NotEditable(status))
    }
}

/// Checks a stored version against the one the writer read.
pub fn ensure_version(expected: i32, actual: i32) -> Result<(), DocumentError> {
    if expected == actual {
        Ok(())
    } else {
        Err(DocumentError::VersionMismatch { expected, actual })
    }
}
