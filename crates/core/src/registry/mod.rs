//! Branch and counterparty registry rules.
//!
//! Branches are the organizational scoping unit: every transaction
//! document and every chart-of-accounts entry belongs to exactly one
//! branch. Contacts are the counterparties documents reference.

pub mod branch;
pub mod contact;
pub mod error;

pub use branch::{BranchProfile, validate_head_office};
pub use contact::ContactKind;
pub use error::RegistryError;
