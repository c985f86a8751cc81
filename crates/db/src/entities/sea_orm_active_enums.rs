//! Database-backed enums, stored as short strings.

use ledgerline_core::coa::{AccountCategory as CoreCategory, NormalBalance as CoreBalance};
use ledgerline_core::document::DocumentStatus as CoreStatus;
use ledgerline_core::registry::ContactKind as CoreKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Document lifecycle status column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Editable draft.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Approved and awaiting posting.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Posted to the ledger.
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Posted and partially settled.
    #[sea_orm(string_value = "partially_paid")]
    PartiallyPaid,
    /// Posted and fully settled.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Voided.
    #[sea_orm(string_value = "void")]
    Void,
}

impl From<CoreStatus> for DocumentStatus {
    fn from(status: CoreStatus) -> Self {
        match status {
            CoreStatus::Draft => Self::Draft,
            CoreStatus::Approved => Self::Approved,
            CoreStatus::Posted => Self::Posted,
            CoreStatus::PartiallyPaid => Self::PartiallyPaid,
            CoreStatus::Paid => Self::Paid,
            CoreStatus::Void => Self::Void,
        }
    }
}

impl From<DocumentStatus> for CoreStatus {
    fn from(status: DocumentStatus) -> Self {
        match status {
            DocumentStatus::Draft => Self::Draft,
            DocumentStatus::Approved => Self::Approved,
            DocumentStatus::Posted => Self::Posted,
            DocumentStatus::PartiallyPaid => Self::PartiallyPaid,
            DocumentStatus::Paid => Self::Paid,
            DocumentStatus::Void => Self::Void,
        }
    }
}

/// Account category column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    /// Resources owned.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Obligations owed.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Residual ownership.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Revenue streams.
    #[sea_orm(string_value = "income")]
    Income,
    /// Costs incurred.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<CoreCategory> for AccountCategory {
    fn from(category: CoreCategory) -> Self {
        match category {
            CoreCategory::Asset => Self::Asset,
            CoreCategory::Liability => Self::Liability,
            CoreCategory::Equity => Self::Equity,
            CoreCategory::Income => Self::Income,
            CoreCategory::Expense => Self::Expense,
        }
    }
}

impl From<AccountCategory> for CoreCategory {
    fn from(category: AccountCategory) -> Self {
        match category {
            AccountCategory::Asset => Self::Asset,
            AccountCategory::Liability => Self::Liability,
            AccountCategory::Equity => Self::Equity,
            AccountCategory::Income => Self::Income,
            AccountCategory::Expense => Self::Expense,
        }
    }
}

/// Normal balance side column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")]
#[serde(rename_all = "snake_case")]
pub enum NormalBalance {
    /// Debit-normal.
    #[sea_orm(string_value = "dr")]
    Dr,
    /// Credit-normal.
    #[sea_orm(string_value = "cr")]
    Cr,
}

impl From<CoreBalance> for NormalBalance {
    fn from(balance: CoreBalance) -> Self {
        match balance {
            CoreBalance::Dr => Self::Dr,
            CoreBalance::Cr => Self::Cr,
        }
    }
}

impl From<NormalBalance> for CoreBalance {
    fn from(balance: NormalBalance) -> Self {
        match balance {
            NormalBalance::Dr => Self::Dr,
            NormalBalance::Cr => Self::Cr,
        }
    }
}

/// Contact kind column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    /// Buys from us.
    #[sea_orm(string_value = "customer")]
    Customer,
    /// Sells to us.
    #[sea_orm(string_value = "supplier")]
    Supplier,
    /// Both directions.
    #[sea_orm(string_value = "both")]
    Both,
}

impl From<CoreKind> for ContactKind {
    fn from(kind: CoreKind) -> Self {
        match kind {
            CoreKind::Customer => Self::Customer,
            CoreKind::Supplier => Self::Supplier,
            CoreKind::Both => Self::Both,
        }
    }
}

impl From<ContactKind> for CoreKind {
    fn from(kind: ContactKind) -> Self {
        match kind {
            ContactKind::Customer => Self::Customer,
            ContactKind::Supplier => Self::Supplier,
            ContactKind::Both => Self::Both,
        }
    }
}
