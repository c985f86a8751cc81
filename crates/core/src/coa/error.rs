//! Chart of accounts error types.

use ledgerline_shared::types::AccountId;
use thiserror::Error;

/// Errors that can occur during chart of accounts operations.
#[derive(Debug, Error)]
pub enum CoaError {
    /// Account code already exists in the branch.
    #[error("Account code '{0}' already exists in this branch")]
    DuplicateCode(String),

    /// Parent account not found.
    #[error("Parent account not found: {0}")]
    ParentNotFound(AccountId),

    /// Parent account belongs to a different branch.
    #[error("Parent account {0} belongs to a different branch")]
    ParentWrongBranch(AccountId),

    /// Parent account is not a group account.
    #[error("Parent account {0} is not a group account")]
    ParentNotGroup(AccountId),

    /// Reparenting would make the account its own ancestor.
    #[error("Parent account {0} is the account itself or one of its descendants")]
    CircularParent(AccountId),

    /// Normal balance does not match the category convention.
    #[error("Normal balance does not match category convention for '{0}'")]
    UnconventionalNormalBalance(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Account has child accounts and cannot be deleted.
    #[error("Cannot delete account: {0} child accounts exist")]
    HasChildren(u64),

    /// Account has journal lines posted against it.
    #[error("Cannot delete account: {0} journal lines reference it")]
    HasJournalLines(u64),

    /// Account has stored balances.
    #[error("Cannot delete account: {0} balance records reference it")]
    HasBalances(u64),
}

impl CoaError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateCode(_) => "DUPLICATE_ACCOUNT_CODE",
            Self::ParentNotFound(_) => "PARENT_NOT_FOUND",
            Self::ParentWrongBranch(_) => "PARENT_WRONG_BRANCH",
            Self::ParentNotGroup(_) => "PARENT_NOT_GROUP",
            Self::CircularParent(_) => "CIRCULAR_PARENT",
            Self::UnconventionalNormalBalance(_) => "UNCONVENTIONAL_NORMAL_BALANCE",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::HasChildren(_) => "ACCOUNT_HAS_CHILDREN",
            Self::HasJournalLines(_) => "ACCOUNT_HAS_JOURNAL_LINES",
            Self::HasBalances(_) => "ACCOUNT_HAS_BALANCES",
        }
    }

    /// Returns true if this error is a protect-on-delete violation.
    #[must_use]
    pub const fn is_referential(&self) -> bool {
        matches!(
            self,
            Self::HasChildren(_) | Self::HasJournalLines(_) | Self::HasBalances(_)
        )
    }
}
