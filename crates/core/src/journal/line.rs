//! Journal voucher line input.

use ledgerline_shared::types::{AccountId, LineId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::document::DocumentLine;

/// A single voucher line as submitted by a caller.
///
/// Exactly one of `dr_amount` and `cr_amount` must be positive; the
/// other must be zero. Enforced by [`super::validate_lines`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLineInput {
    /// Line identity; generated when the caller supplies none.
    pub line_id: Option<LineId>,
    /// Ledger account the line posts against.
    pub account_id: AccountId,
    /// Debit amount, zero for credit lines.
    pub dr_amount: Decimal,
    /// Credit amount, zero for debit lines.
    pub cr_amount: Decimal,
    /// Free-form line note.
    pub note: Option<String>,
}

impl JournalLineInput {
    /// A debit line against `account_id`.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            line_id: None,
            account_id,
            dr_amount: amount,
            cr_amount: Decimal::ZERO,
            note: None,
        }
    }

    /// A credit line against `account_id`.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            line_id: None,
            account_id,
            dr_amount: Decimal::ZERO,
            cr_amount: amount,
            note: None,
        }
    }
}

impl DocumentLine for JournalLineInput {
    fn line_id(&self) -> Option<LineId> {
        self.line_id
    }

    fn set_line_id(&mut self, id: LineId) {
        self.line_id = Some(id);
    }
}
