//! Shared domain types.

pub mod id;
pub mod pagination;

pub use id::{
    AccountId, AccountTypeId, BranchId, ContactId, CurrencyId, DocumentId, LineId, PaymentId,
    TaxRateId, UserId,
};
pub use pagination::{Page, PageRequest};
