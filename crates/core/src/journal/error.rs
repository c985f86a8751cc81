//! Journal voucher errors.

use ledgerline_shared::types::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::document::ValidationReport;

/// Errors raised by voucher validation and posting.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Per-line amount rules failed.
    #[error("voucher lines invalid: {0}")]
    Invalid(ValidationReport),

    /// A voucher cannot post without lines.
    #[error("voucher has no lines")]
    Empty,

    /// Total debits and total credits disagree.
    #[error("voucher does not balance: debits {debits}, credits {credits}")]
    Unbalanced {
        /// Sum of all debit amounts.
        debits: Decimal,
        /// Sum of all credit amounts.
        credits: Decimal,
    },

    /// A line references an account that does not exist in the branch.
    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    /// A line references a deactivated account.
    #[error("account {0} is inactive")]
    AccountInactive(AccountId),

    /// Group accounts aggregate children and never take postings.
    #[error("account {0} is a group and cannot take postings")]
    GroupAccount(AccountId),
}

impl JournalError {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "JOURNAL_LINES_INVALID",
            Self::Empty => "JOURNAL_EMPTY",
            Self::Unbalanced { .. } => "JOURNAL_UNBALANCED",
            Self::AccountNotFound(_) => "JOURNAL_ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "JOURNAL_ACCOUNT_INACTIVE",
            Self::GroupAccount(_) => "JOURNAL_GROUP_ACCOUNT",
        }
    }
}
