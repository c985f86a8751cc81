//! Header totals derived from document lines.
//!
//! Totals are derived, not authoritative: the current line set is the
//! sole source of truth and the header fields are recomputed from it on
//! every line mutation. Caller-supplied totals are never trusted for
//! document types that own lines.

use ledgerline_shared::types::LineId;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::lines::DocumentLine;
use super::status::DocumentStatus;
use super::validation::{ValidationReport, line_path};

/// Rounds a monetary amount to 2 decimal places, banker's rounding.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Sums line amounts for the simple-sum family (cash transfer,
/// payslip, journal voucher).
#[must_use]
pub fn simple_total<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().sum()
}

/// A priced line as carried by invoices, purchase bills, quotations,
/// sales, purchase orders, and POS orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    /// Line identity; generated when the caller supplies none.
    pub line_id: Option<LineId>,
    /// Quantity transacted.
    pub qty: Decimal,
    /// Unit rate.
    pub rate: Decimal,
    /// Flat discount applied to this line.
    pub discount_amount: Decimal,
    /// Tax rate percentage applied to the discounted line total.
    pub tax_rate_percent: Option<Decimal>,
}

impl DocumentLine for PricedLine {
    fn line_id(&self) -> Option<LineId> {
        self.line_id
    }

    fn set_line_id(&mut self, id: LineId) {
        self.line_id = Some(id);
    }
}

impl PricedLine {
    /// The line total before tax: `qty * rate - discount_amount`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        round_money(self.qty * self.rate - self.discount_amount)
    }

    /// The tax amount for this line.
    #[must_use]
    pub fn tax_amount(&self) -> Decimal {
        match self.tax_rate_percent {
            Some(percent) => round_money(self.line_total() * percent / Decimal::ONE_HUNDRED),
            None => Decimal::ZERO,
        }
    }

    /// Validates the line's amounts, recording issues under `items[index]`.
    pub fn validate_into(&self, index: usize, report: &mut ValidationReport) {
        if self.qty < Decimal::ZERO {
            report.push(
                line_path(index, "qty"),
                "NEGATIVE_QTY",
                "Quantity cannot be negative",
            );
        }
        if self.rate < Decimal::ZERO {
            report.push(
                line_path(index, "rate"),
                "NEGATIVE_RATE",
                "Rate cannot be negative",
            );
        }
        if self.discount_amount < Decimal::ZERO {
            report.push(
                line_path(index, "discount_amount"),
                "NEGATIVE_DISCOUNT",
                "Discount cannot be negative",
            );
        }
        if let Some(percent) = self.tax_rate_percent
            && percent < Decimal::ZERO
        {
            report.push(
                line_path(index, "tax_rate_percent"),
                "NEGATIVE_TAX_RATE",
                "Tax rate cannot be negative",
            );
        }
    }
}

/// Derived header totals for the priced-line family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedTotals {
    /// Sum of line totals (after per-line discounts).
    pub subtotal: Decimal,
    /// Sum of per-line discounts.
    pub discount_total: Decimal,
    /// Sum of per-line tax amounts.
    pub tax_total: Decimal,
    /// `subtotal + tax_total`.
    pub grand_total: Decimal,
}

impl PricedTotals {
    /// Zero totals for an empty line set.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            discount_total: Decimal::ZERO,
            tax_total: Decimal::ZERO,
            grand_total: Decimal::ZERO,
        }
    }

    /// Computes the header totals from the current line set.
    #[must_use]
    pub fn compute(lines: &[PricedLine]) -> Self {
        let subtotal: Decimal = lines.iter().map(PricedLine::line_total).sum();
        let discount_total: Decimal = lines.iter().map(|l| l.discount_amount).sum();
        let tax_total: Decimal = lines.iter().map(PricedLine::tax_amount).sum();

        Self {
            subtotal,
            discount_total,
            tax_total,
            grand_total: subtotal + tax_total,
        }
    }
}

/// Remaining amount owed after allocated payments.
#[must_use]
pub fn balance_due(grand_total: Decimal, paid: Decimal) -> Decimal {
    grand_total - paid
}

/// Settlement status for a posted, settleable document.
///
/// Fully settled documents are `Paid`; anything partially covered is
/// `PartiallyPaid`; untouched documents stay `Posted`.
#[must_use]
pub fn settlement_status(grand_total: Decimal, paid: Decimal) -> DocumentStatus {
    if paid >= grand_total && grand_total > Decimal::ZERO {
        DocumentStatus::Paid
    } else if paid > Decimal::ZERO {
        DocumentStatus::PartiallyPaid
    } else {
        DocumentStatus::Posted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(qty: Decimal, rate: Decimal, discount: Decimal, tax: Option<Decimal>) -> PricedLine {
        PricedLine {
            line_id: None,
            qty,
            rate,
            discount_amount: discount,
            tax_rate_percent: tax,
        }
    }

    #[test]
    fn test_invoice_scenario() {
        // qty 2 x rate 50, no discount, 10% tax
        let lines = vec![line(dec!(2), dec!(50), dec!(0), Some(dec!(10)))];
        let totals = PricedTotals::compute(&lines);

        assert_eq!(totals.subtotal, dec!(100));
        assert_eq!(totals.tax_total, dec!(10.00));
        assert_eq!(totals.grand_total, dec!(110.00));
        assert_eq!(balance_due(totals.grand_total, Decimal::ZERO), dec!(110.00));
    }

    #[test]
    fn test_discount_reduces_taxable_base() {
        let lines = vec![line(dec!(1), dec!(100), dec!(20), Some(dec!(10)))];
        let totals = PricedTotals::compute(&lines);

        assert_eq!(totals.subtotal, dec!(80.00));
        assert_eq!(totals.discount_total, dec!(20));
        assert_eq!(totals.tax_total, dec!(8.00));
        assert_eq!(totals.grand_total, dec!(88.00));
    }

    #[test]
    fn test_untaxed_line_has_zero_tax() {
        let lines = vec![line(dec!(3), dec!(9.99), dec!(0), None)];
        let totals = PricedTotals::compute(&lines);

        assert_eq!(totals.subtotal, dec!(29.97));
        assert_eq!(totals.tax_total, dec!(0));
        assert_eq!(totals.grand_total, dec!(29.97));
    }

    #[test]
    fn test_empty_lines_zero_totals() {
        assert_eq!(PricedTotals::compute(&[]), PricedTotals::zero());
    }

    #[test]
    fn test_simple_total() {
        assert_eq!(
            simple_total([dec!(10), dec!(20.5), dec!(0.5)]),
            dec!(31.0)
        );
        assert_eq!(simple_total(std::iter::empty::<Decimal>()), dec!(0));
    }

    #[test]
    fn test_rounding_is_bankers() {
        // 0.125 rounds to 0.12 (nearest even), not 0.13
        assert_eq!(round_money(dec!(0.125)), dec!(0.12));
        assert_eq!(round_money(dec!(0.135)), dec!(0.14));
    }

    #[test]
    fn test_validate_negative_amounts() {
        let bad = line(dec!(-1), dec!(-2), dec!(-3), Some(dec!(-4)));
        let mut report = ValidationReport::new();
        bad.validate_into(0, &mut report);

        let codes: Vec<_> = report.issues().iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![
                "NEGATIVE_QTY",
                "NEGATIVE_RATE",
                "NEGATIVE_DISCOUNT",
                "NEGATIVE_TAX_RATE"
            ]
        );
    }

    #[test]
    fn test_settlement_status_progression() {
        assert_eq!(
            settlement_status(dec!(110), dec!(0)),
            DocumentStatus::Posted
        );
        assert_eq!(
            settlement_status(dec!(110), dec!(40)),
            DocumentStatus::PartiallyPaid
        );
        assert_eq!(settlement_status(dec!(110), dec!(110)), DocumentStatus::Paid);
        assert_eq!(settlement_status(dec!(110), dec!(120)), DocumentStatus::Paid);
    }
}
