//! Generic transaction document protocol.
//!
//! Every financial document in the system is a header owning a set of
//! line items, scoped to a branch, carrying a lifecycle status, with
//! header totals derived from the lines. This module holds the shared
//! pieces each document family composes:
//!
//! - status lifecycle guards
//! - line identity assignment and wholesale line replacement
//! - totals derivation for the simple-sum and priced-line families
//! - aggregated validation reporting with field paths

pub mod error;
pub mod lines;
pub mod status;
pub mod totals;
pub mod validation;

#[cfg(test)]
mod totals_props;

pub use error::{DocumentError, ensure_editable, ensure_version};
pub use lines::{DocumentLine, LinesPatch, assign_line_ids};
pub use status::DocumentStatus;
pub use totals::{PricedLine, PricedTotals, balance_due, round_money, settlement_status, simple_total};
pub use validation::{ValidationIssue, ValidationReport, line_path};
