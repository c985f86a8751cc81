//! Registry error types.

use ledgerline_shared::types::BranchId;
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Branch code already exists.
    #[error("Branch code '{0}' already exists")]
    DuplicateBranchCode(String),

    /// Another branch is already marked as head office.
    #[error("Branch {0} is already the head office")]
    HeadOfficeExists(BranchId),

    /// Branch not found.
    #[error("Branch not found: {0}")]
    BranchNotFound(BranchId),

    /// Branch is inactive and cannot scope new documents.
    #[error("Branch {0} is inactive")]
    BranchInactive(BranchId),

    /// Contact is still referenced by documents.
    #[error("Contact is referenced by {0} documents")]
    ContactInUse(u64),
}

impl RegistryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateBranchCode(_) => "DUPLICATE_BRANCH_CODE",
            Self::HeadOfficeExists(_) => "HEAD_OFFICE_EXISTS",
            Self::BranchNotFound(_) => "BRANCH_NOT_FOUND",
            Self::BranchInactive(_) => "BRANCH_INACTIVE",
            Self::ContactInUse(_) => "CONTACT_IN_USE",
        }
    }
}
