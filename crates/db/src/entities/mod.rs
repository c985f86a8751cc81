//! `SeaORM` entity definitions.

pub mod account_types;
pub mod accounts;
pub mod branches;
pub mod contacts;
pub mod currencies;
pub mod invoice_lines;
pub mod invoice_payments;
pub mod invoices;
pub mod journal_voucher_lines;
pub mod journal_vouchers;
pub mod opening_balances;
pub mod sea_orm_active_enums;
pub mod tax_rates;
