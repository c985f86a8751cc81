//! Property-based tests for derived totals.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::totals::{PricedLine, PricedTotals, balance_due, round_money, settlement_status};
use crate::document::status::DocumentStatus;

fn money() -> impl Strategy<Value = Decimal> {
    // cents in [0, 10_000_00]
    (0i64..=1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn qty() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(Decimal::from)
}

fn tax_rate() -> impl Strategy<Value = Option<Decimal>> {
    proptest::option::of((0i64..=2500).prop_map(|bp| Decimal::new(bp, 2)))
}

prop_compose! {
    fn priced_line()(q in qty(), rate in money(), tax in tax_rate()) -> PricedLine {
        PricedLine {
            line_id: None,
            qty: q,
            rate,
            discount_amount: Decimal::ZERO,
            tax_rate_percent: tax,
        }
    }
}

proptest! {
    #[test]
    fn compute_is_deterministic(lines in proptest::collection::vec(priced_line(), 0..8)) {
        let a = PricedTotals::compute(&lines);
        let b = PricedTotals::compute(&lines);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn grand_total_is_subtotal_plus_tax(lines in proptest::collection::vec(priced_line(), 0..8)) {
        let totals = PricedTotals::compute(&lines);
        prop_assert_eq!(totals.grand_total, totals.subtotal + totals.tax_total);
    }

    #[test]
    fn totals_are_non_negative(lines in proptest::collection::vec(priced_line(), 0..8)) {
        let totals = PricedTotals::compute(&lines);
        prop_assert!(totals.subtotal >= Decimal::ZERO);
        prop_assert!(totals.tax_total >= Decimal::ZERO);
        prop_assert!(totals.grand_total >= Decimal::ZERO);
    }

    #[test]
    fn full_payment_settles(total in money()) {
        prop_assert_eq!(balance_due(total, total), Decimal::ZERO);
        if total > Decimal::ZERO {
            prop_assert_eq!(settlement_status(total, total), DocumentStatus::Paid);
        }
    }

    #[test]
    fn partial_payment_leaves_partially_paid(total in money(), paid in money()) {
        prop_assume!(total > Decimal::ZERO);
        prop_assume!(paid > Decimal::ZERO && paid < total);
        prop_assert_eq!(settlement_status(total, paid), DocumentStatus::PartiallyPaid);
        prop_assert_eq!(balance_due(total, paid), total - paid);
    }

    #[test]
    fn rounding_is_idempotent(amount in money()) {
        prop_assert_eq!(round_money(amount), round_money(round_money(amount)));
    }
}
