//! Branch domain rules.

use ledgerline_shared::types::{BranchId, CurrencyId};
use serde::{Deserialize, Serialize};

use super::error::RegistryError;

/// Branch attributes relevant to scoping decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchProfile {
    /// Unique identifier.
    pub id: BranchId,
    /// Branch code, unique across the installation.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Default currency for documents in this branch.
    pub currency_id: Option<CurrencyId>,
    /// Whether this branch is the head office.
    pub is_head_office: bool,
    /// Soft-delete flag; inactive branches reject new documents.
    pub active: bool,
}

impl BranchProfile {
    /// Returns an error if this branch cannot scope a new document.
    pub fn ensure_writable(&self) -> Result<(), RegistryError> {
        if !self.active {
            return Err(RegistryError::BranchInactive(self.id));
        }
        Ok(())
    }
}

/// Validates the single-head-office invariant for a branch write.
///
/// At most one active branch may be marked head office. `current_head`
/// is the id of the existing active head-office branch, if any;
/// `candidate` is the branch being created or updated.
///
/// # Errors
///
/// Returns `HeadOfficeExists` when marking `candidate` as head office
/// while a different branch already holds the flag.
pub fn validate_head_office(
    current_head: Option<BranchId>,
    candidate: BranchId,
    is_head_office: bool,
) -> Result<(), RegistryError> {
    if !is_head_office {
        return Ok(());
    }

    match current_head {
        Some(existing) if existing != candidate => Err(RegistryError::HeadOfficeExists(existing)),
        _ => Ok(()),
    }
}
