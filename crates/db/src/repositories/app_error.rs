//! Boundary conversions into the application-wide error taxonomy.
//!
//! Each repository keeps its own precise error enum; callers that sit
//! above the repositories (request handlers, CLI commands) work in
//! terms of [`AppError`] and map through these impls with `?`.

use ledgerline_core::coa::CoaError;
use ledgerline_core::document::DocumentError;
use ledgerline_core::journal::JournalError;
use ledgerline_core::registry::RegistryError;
use ledgerline_shared::AppError;

use super::account::AccountError;
use super::branch::BranchError;
use super::contact::ContactError;
use super::invoice::InvoiceError;
use super::journal::VoucherError;

impl From<BranchError> for AppError {
    fn from(err: BranchError) -> Self {
        match err {
            BranchError::NotFound(_) | BranchError::CurrencyNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            BranchError::DuplicateCode(_) | BranchError::HeadOfficeExists(_) => {
                Self::Conflict(err.to_string())
            }
            BranchError::Protected(_) => Self::Permission(err.to_string()),
            BranchError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::NotFound(_)
            | ContactError::BranchNotFound(_)
            | ContactError::AccountNotFound(_) => Self::NotFound(err.to_string()),
            ContactError::InUse(_) => Self::ReferentialIntegrity(err.to_string()),
            ContactError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Rule(ref rule) => match rule {
                CoaError::DuplicateCode(_) => Self::Conflict(err.to_string()),
                CoaError::ParentNotFound(_) | CoaError::AccountNotFound(_) => {
                    Self::NotFound(err.to_string())
                }
                rule if rule.is_referential() => Self::ReferentialIntegrity(err.to_string()),
                _ => Self::Validation(err.to_string()),
            },
            AccountError::Protected(_) => Self::Permission(err.to_string()),
            AccountError::BranchNotFound(_) | AccountError::AccountTypeNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            AccountError::DuplicateTypeCode(_) => Self::Conflict(err.to_string()),
            AccountError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

impl From<VoucherError> for AppError {
    fn from(err: VoucherError) -> Self {
        match err {
            VoucherError::NotFound(_) | VoucherError::BranchNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            VoucherError::DuplicateNumber(_) => Self::Conflict(err.to_string()),
            VoucherError::Document(ref doc) => document_error(doc, &err),
            VoucherError::Journal(ref rule) => match rule {
                JournalError::AccountNotFound(_) => Self::NotFound(err.to_string()),
                _ => Self::Validation(err.to_string()),
            },
            VoucherError::Registry(ref rule) => registry_error(rule, &err),
            VoucherError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

impl From<InvoiceError> for AppError {
    fn from(err: InvoiceError) -> Self {
        match err {
            InvoiceError::NotFound(_)
            | InvoiceError::BranchNotFound(_)
            | InvoiceError::ContactNotFound(_) => Self::NotFound(err.to_string()),
            InvoiceError::DuplicateNumber(_) => Self::Conflict(err.to_string()),
            InvoiceError::Empty | InvoiceError::NonPositivePayment => {
                Self::Validation(err.to_string())
            }
            InvoiceError::Document(ref doc) => document_error(doc, &err),
            InvoiceError::Registry(ref rule) => registry_error(rule, &err),
            InvoiceError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

fn document_error(doc: &DocumentError, outer: &dyn std::error::Error) -> AppError {
    match doc {
        DocumentError::VersionMismatch { .. } => AppError::Conflict(outer.to_string()),
        _ => AppError::Validation(outer.to_string()),
    }
}

fn registry_error(rule: &RegistryError, outer: &dyn std::error::Error) -> AppError {
    match rule {
        RegistryError::BranchNotFound(_) => AppError::NotFound(outer.to_string()),
        RegistryError::DuplicateBranchCode(_) | RegistryError::HeadOfficeExists(_) => {
            AppError::Conflict(outer.to_string())
        }
        RegistryError::ContactInUse(_) => AppError::ReferentialIntegrity(outer.to_string()),
        RegistryError::BranchInactive(_) => AppError::Validation(outer.to_string()),
    }
}
