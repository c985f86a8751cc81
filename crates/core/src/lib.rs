//! Core business logic for Ledgerline.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `registry` - Branch and counterparty scoping rules
//! - `coa` - Chart of accounts hierarchy and normal-balance rules
//! - `document` - Generic header+line transaction document protocol
//! - `journal` - Double-entry validation for ledger-posting documents
//! - `protection` - System-generated record write policy

pub mod coa;
pub mod document;
pub mod journal;
pub mod protection;
pub mod registry;
