//! Line-level rules and the balance check.

use ledgerline_shared::types::AccountId;
use rust_decimal::Decimal;

use super::error::JournalError;
use super::line::JournalLineInput;
use crate::coa::AccountRef;
use crate::document::{ValidationReport, line_path, simple_total};

/// Validates per-line amount rules: amounts non-negative, and exactly
/// one side positive.
#[must_use]
pub fn validate_lines(lines: &[JournalLineInput]) -> ValidationReport {
    let mut report = ValidationReport::new();
    for (index, line) in lines.iter().enumerate() {
        let negative = line.dr_amount < Decimal::ZERO || line.cr_amount < Decimal::ZERO;
        if line.dr_amount < Decimal::ZERO {
            report.push(
                line_path(index, "dr_amount"),
                "NEGATIVE_AMOUNT",
                "Debit amount cannot be negative",
            );
        }
        if line.cr_amount < Decimal::ZERO {
            report.push(
                line_path(index, "cr_amount"),
                "NEGATIVE_AMOUNT",
                "Credit amount cannot be negative",
            );
        }
        let has_dr = line.dr_amount > Decimal::ZERO;
        let has_cr = line.cr_amount > Decimal::ZERO;
        if has_dr && has_cr {
            report.push(
                line_path(index, "dr_amount"),
                "BOTH_SIDES",
                "A line cannot carry both a debit and a credit",
            );
        } else if !has_dr && !has_cr && !negative {
            report.push(
                line_path(index, "dr_amount"),
                "NO_SIDE",
                "A line must carry either a debit or a credit",
            );
        }
    }
    report
}

/// The voucher total: the sum of its debit amounts.
///
/// For a balanced voucher this equals the sum of the credit amounts,
/// so either side represents the transaction magnitude.
#[must_use]
pub fn journal_total(lines: &[JournalLineInput]) -> Decimal {
    simple_total(lines.iter().map(|l| l.dr_amount))
}

/// Checks that total debits equal total credits.
pub fn validate_balanced(lines: &[JournalLineInput]) -> Result<(), JournalError> {
    let debits = simple_total(lines.iter().map(|l| l.dr_amount));
    let credits = simple_total(lines.iter().map(|l| l.cr_amount));
    if debits == credits {
        Ok(())
    } else {
        Err(JournalError::Unbalanced { debits, credits })
    }
}

/// Full posting check: non-empty, per-line rules, balance, and every
/// referenced account an active non-group leaf.
///
/// `resolve_account` lets the caller inject account lookup, keeping
/// this function free of database concerns.
pub fn validate_postable<F>(
    lines: &[JournalLineInput],
    mut resolve_account: F,
) -> Result<(), JournalError>
where
    F: FnMut(AccountId) -> Option<AccountRef>,
{
    if lines.is_empty() {
        return Err(JournalError::Empty);
    }

    let report = validate_lines(lines);
    if !report.is_empty() {
        return Err(JournalError::Invalid(report));
    }

    validate_balanced(lines)?;

    for line in lines {
        let account =
            resolve_account(line.account_id).ok_or(JournalError::AccountNotFound(line.account_id))?;
        if !account.active {
            return Err(JournalError::AccountInactive(line.account_id));
        }
        if account.is_group {
            return Err(JournalError::GroupAccount(line.account_id));
        }
    }

    Ok(())
}
