//! Chart of accounts engine.
//!
//! Maintains the branch-scoped account hierarchy and its type
//! metadata:
//! - Account categories and normal-balance conventions
//! - Account creation rules (unique codes, parent placement)
//! - Protect-on-delete semantics for ledger data

pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::CoaError;
pub use types::{AccountCategory, AccountRef, NormalBalance, balance_change};
pub use validation::{AccountCodeEntry, DependentRows, validate_delete_account, validate_new_account};
