//! Write protection for system-generated records.
//!
//! Seeded defaults (head-office branch, conventional account types,
//! the default chart of accounts) are flagged `is_system_generated`
//! and must survive ordinary administration. Regular callers may only
//! toggle such records active or inactive; editing or deleting them
//! requires a privileged maintenance context.

use thiserror::Error;

/// The kind of write being attempted against a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOperation {
    /// Inserting a new record.
    Create,
    /// Modifying an existing record's fields.
    Update,
    /// Removing a record.
    Delete,
    /// Flipping the record's `active` flag only.
    ToggleActive,
}

impl WriteOperation {
    /// Lowercase name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::ToggleActive => "toggle_active",
        }
    }
}

/// Raised when a write would touch a protected record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtectionError {
    /// The record is system generated and the operation is not allowed.
    #[error("cannot {} a system-generated record", .operation.as_str())]
    SystemGenerated {
        /// The rejected operation.
        operation: WriteOperation,
    },
}

impl ProtectionError {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::SystemGenerated { .. } => "SYSTEM_RECORD_PROTECTED",
        }
    }
}

/// Checks whether a write may proceed against a record.
///
/// Non-system records accept every operation. System-generated records
/// accept only [`WriteOperation::ToggleActive`] from ordinary callers;
/// `privileged` bypasses the guard for maintenance tooling that owns
/// the seeded data.
pub fn check_write(
    is_system_generated: bool,
    operation: WriteOperation,
    privileged: bool,
) -> Result<(), ProtectionError> {
    if !is_system_generated || privileged {
        return Ok(());
    }
    match operation {
        WriteOperation::Create | WriteOperation::ToggleActive => Ok(()),
        WriteOperation::Update | WriteOperation::Delete => {
            Err(ProtectionError::SystemGenerated { operation })
        }
    }
}
