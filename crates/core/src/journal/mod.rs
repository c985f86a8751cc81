//! Journal voucher line rules and the double-entry validator.
//!
//! Vouchers carry dr/cr lines against ledger accounts. Every line is
//! one-sided, and a voucher only posts when total debits equal total
//! credits and every referenced account is an active, postable leaf.

mod error;
mod line;
mod validation;

#[cfg(test)]
mod validation_props;

pub use error::JournalError;
pub use line::JournalLineInput;
pub use validation::{journal_total, validate_balanced, validate_lines, validate_postable};
