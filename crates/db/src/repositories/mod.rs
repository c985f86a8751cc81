//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Business rules stay in `ledgerline-core`; repositories
//! gather the facts, call the pure validators, and persist the result.

pub mod account;
mod app_error;
pub mod branch;
pub mod contact;
pub mod invoice;
pub mod journal;

pub use account::{
    AccountError, AccountFilter, AccountRepository, AccountWithBalance, CreateAccountInput,
    CreateAccountTypeInput, UpdateAccountInput,
};
pub use branch::{BranchError, BranchRepository, CreateBranchInput, UpdateBranchInput};
pub use contact::{
    ContactError, ContactFilter, ContactRepository, CreateContactInput, UpdateContactInput,
};
pub use invoice::{
    CreateInvoiceInput, InvoiceError, InvoiceFilter, InvoiceLineInput, InvoiceRepository,
    InvoiceWithLines, RecordPaymentInput, UpdateInvoiceInput,
};
pub use journal::{
    CreateVoucherInput, JournalRepository, UpdateVoucherInput, VoucherError, VoucherFilter,
    VoucherWithLines,
};
