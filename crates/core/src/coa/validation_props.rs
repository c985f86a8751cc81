//! Property tests for chart of accounts rules.

use std::collections::HashSet;

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use ledgerline_shared::types::BranchId;

use super::types::{AccountCategory, NormalBalance, balance_change};
use super::validation::{AccountCodeEntry, validate_new_account};

fn account_code_strategy() -> impl Strategy<Value = String> {
    "[A-Z0-9]{1,10}"
}

fn category_strategy() -> impl Strategy<Value = AccountCategory> {
    prop_oneof![
        Just(AccountCategory::Asset),
        Just(AccountCategory::Liability),
        Just(AccountCategory::Equity),
        Just(AccountCategory::Income),
        Just(AccountCategory::Expense),
    ]
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any existing code in a branch, creating another account
    /// with the same code in that branch is rejected.
    #[test]
    fn prop_duplicate_code_same_branch_rejected(
        branch_bits in any::<u128>(),
        code in account_code_strategy(),
    ) {
        let branch_id = BranchId::from_uuid(Uuid::from_u128(branch_bits));
        let mut existing = HashSet::new();
        existing.insert(AccountCodeEntry {
            branch_id,
            code: code.clone(),
        });

        prop_assert!(validate_new_account(&existing, branch_id, &code, None).is_err());
    }

    /// The same code can exist in different branches; uniqueness is
    /// per-branch, not global.
    #[test]
    fn prop_same_code_different_branch_allowed(
        branch1_bits in any::<u128>(),
        branch2_bits in any::<u128>(),
        code in account_code_strategy(),
    ) {
        prop_assume!(branch1_bits != branch2_bits);

        let branch1 = BranchId::from_uuid(Uuid::from_u128(branch1_bits));
        let branch2 = BranchId::from_uuid(Uuid::from_u128(branch2_bits));

        let mut existing = HashSet::new();
        existing.insert(AccountCodeEntry {
            branch_id: branch1,
            code: code.clone(),
        });

        prop_assert!(validate_new_account(&existing, branch2, &code, None).is_ok());
    }

    /// Every category's conventional normal balance is one of dr/cr,
    /// and exactly one of them is conventional.
    #[test]
    fn prop_normal_balance_convention_is_exclusive(category in category_strategy()) {
        let dr = category.is_conventional(NormalBalance::Dr);
        let cr = category.is_conventional(NormalBalance::Cr);
        prop_assert!(dr ^ cr);
    }

    /// Balance change is antisymmetric: swapping debit and credit
    /// negates the change, for every category.
    #[test]
    fn prop_balance_change_antisymmetric(
        category in category_strategy(),
        debit in amount_strategy(),
        credit in amount_strategy(),
    ) {
        let forward = balance_change(category, debit, credit);
        let swapped = balance_change(category, credit, debit);
        prop_assert_eq!(forward, -swapped);
    }

    /// A zero entry never moves a balance.
    #[test]
    fn prop_zero_entry_zero_change(category in category_strategy()) {
        prop_assert_eq!(
            balance_change(category, Decimal::ZERO, Decimal::ZERO),
            Decimal::ZERO
        );
    }
}
