//! Account classification types and normal-balance rules.

use ledgerline_shared::types::{AccountId, BranchId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger account category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountCategory {
    /// Resources owned (cash, receivables, inventory).
    Asset,
    /// Obligations owed (payables, loans).
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Revenue earned.
    Income,
    /// Costs incurred.
    Expense,
}

/// Whether an account's natural increase is a debit or a credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal.
    Dr,
    /// Credit-normal.
    Cr,
}

impl AccountCategory {
    /// Returns the conventional normal balance for this category.
    ///
    /// Asset and expense accounts increase with debits; liability,
    /// equity, and income accounts increase with credits.
    #[must_use]
    pub const fn conventional_normal_balance(&self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Dr,
            Self::Liability | Self::Equity | Self::Income => NormalBalance::Cr,
        }
    }

    /// Returns true if `normal_balance` follows the category convention.
    #[must_use]
    pub fn is_conventional(&self, normal_balance: NormalBalance) -> bool {
        self.conventional_normal_balance() == normal_balance
    }
}

/// Calculates the signed balance change of a (debit, credit) pair
/// against an account of the given category.
///
/// Debit-normal accounts grow by `debit - credit`; credit-normal
/// accounts grow by `credit - debit`.
#[must_use]
pub fn balance_change(category: AccountCategory, debit: Decimal, credit: Decimal) -> Decimal {
    match category.conventional_normal_balance() {
        NormalBalance::Dr => debit - credit,
        NormalBalance::Cr => credit - debit,
    }
}

/// Account attributes needed by validators, without the full record.
#[derive(Debug, Clone)]
pub struct AccountRef {
    /// The account ID.
    pub id: AccountId,
    /// The branch owning the account.
    pub branch_id: BranchId,
    /// Whether the account is a grouping node (no direct postings).
    pub is_group: bool,
    /// Whether the account is seeded system data.
    pub is_system: bool,
    /// Whether the account is active.
    pub active: bool,
}
