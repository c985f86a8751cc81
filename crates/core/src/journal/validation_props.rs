//! Property-based tests for the double-entry validator.

use ledgerline_shared::types::{AccountId, BranchId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::JournalError;
use super::line::JournalLineInput;
use super::validation::{journal_total, validate_balanced, validate_lines, validate_postable};
use crate::coa::AccountRef;

fn amount() -> impl Strategy<Value = Decimal> {
    // cents in [1, 1_000_000]
    (1i64..=100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn leaf(id: AccountId) -> AccountRef {
    AccountRef {
        id,
        branch_id: BranchId::new(),
        is_group: false,
        is_system: false,
        active: true,
    }
}

proptest! {
    #[test]
    fn mirrored_pairs_always_balance(amounts in proptest::collection::vec(amount(), 1..10)) {
        let mut lines = Vec::new();
        for a in &amounts {
            lines.push(JournalLineInput::debit(AccountId::new(), *a));
            lines.push(JournalLineInput::credit(AccountId::new(), *a));
        }
        prop_assert!(validate_postable(&lines, |id| Some(leaf(id))).is_ok());
    }

    #[test]
    fn total_equals_debit_sum(amounts in proptest::collection::vec(amount(), 1..10)) {
        let mut lines = Vec::new();
        let mut expected = Decimal::ZERO;
        for a in &amounts {
            lines.push(JournalLineInput::debit(AccountId::new(), *a));
            lines.push(JournalLineInput::credit(AccountId::new(), *a));
            expected += *a;
        }
        prop_assert_eq!(journal_total(&lines), expected);
    }

    #[test]
    fn perturbed_credit_never_balances(a in amount(), delta in amount()) {
        let lines = vec![
            JournalLineInput::debit(AccountId::new(), a),
            JournalLineInput::credit(AccountId::new(), a + delta),
        ];
        let unbalanced = matches!(
            validate_balanced(&lines),
            Err(JournalError::Unbalanced { .. })
        );
        prop_assert!(unbalanced);
    }

    #[test]
    fn one_sided_lines_pass_line_rules(a in amount(), debit_side in any::<bool>()) {
        let line = if debit_side {
            JournalLineInput::debit(AccountId::new(), a)
        } else {
            JournalLineInput::credit(AccountId::new(), a)
        };
        prop_assert!(validate_lines(&[line]).is_empty());
    }

    #[test]
    fn two_sided_lines_fail_line_rules(dr in amount(), cr in amount()) {
        let line = JournalLineInput {
            line_id: None,
            account_id: AccountId::new(),
            dr_amount: dr,
            cr_amount: cr,
            note: None,
        };
        prop_assert!(!validate_lines(&[line]).is_empty());
    }
}
