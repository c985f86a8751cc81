//! Account placement and deletion rules.
//!
//! These are pure functions: the repository queries the store for the
//! facts (existing codes, parent attributes, dependent row counts) and
//! the rules are evaluated here, where they can be tested without a
//! database.

use std::collections::HashSet;

use ledgerline_shared::types::BranchId;

use super::error::CoaError;
use super::types::AccountRef;

/// A (branch, code) pair for uniqueness checking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountCodeEntry {
    /// Branch the code lives in.
    pub branch_id: BranchId,
    /// Account code.
    pub code: String,
}

/// Rows that still reference an account, gathered before a delete.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependentRows {
    /// Direct child accounts.
    pub children: u64,
    /// Journal voucher lines posted to the account.
    pub journal_lines: u64,
    /// Stored balance snapshots.
    pub balances: u64,
}

/// Validates a new account's placement in the branch tree.
///
/// # Errors
///
/// Returns an error if the code already exists in the branch, the
/// parent belongs to a different branch, or the parent is not a group
/// account.
pub fn validate_new_account<S: std::hash::BuildHasher>(
    existing_codes: &HashSet<AccountCodeEntry, S>,
    branch_id: BranchId,
    code: &str,
    parent: Option<&AccountRef>,
) -> Result<(), CoaError> {
    let entry = AccountCodeEntry {
        branch_id,
        code: code.to_string(),
    };
    if existing_codes.contains(&entry) {
        return Err(CoaError::DuplicateCode(code.to_string()));
    }

    if let Some(parent) = parent {
        if parent.branch_id != branch_id {
            return Err(CoaError::ParentWrongBranch(parent.id));
        }
        if !parent.is_group {
            return Err(CoaError::ParentNotGroup(parent.id));
        }
    }

    Ok(())
}

/// Validates that an account can be deleted.
///
/// Protect-on-delete: ledger data never cascades. Any dependent row
/// vetoes the delete.
///
/// # Errors
///
/// Returns the first category of dependents found, with its count.
pub fn validate_delete_account(dependents: DependentRows) -> Result<(), CoaError> {
    if dependents.children > 0 {
        return Err(CoaError::HasChildren(dependents.children));
    }
    if dependents.journal_lines > 0 {
        return Err(CoaError::HasJournalLines(dependents.journal_lines));
    }
    if dependents.balances > 0 {
        return Err(CoaError::HasBalances(dependents.balances));
    }
    Ok(())
}
