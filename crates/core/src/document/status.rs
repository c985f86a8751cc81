//! Document status lifecycle.

use serde::{Deserialize, Serialize};

/// Lifecycle status shared by transaction documents.
///
/// Not every document type uses every state: journal vouchers move
/// draft -> posted -> void, while settleable documents (invoices,
/// purchase bills) additionally pass through the paid states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Document is being drafted and can be modified.
    Draft,
    /// Document has been approved and is ready for posting.
    Approved,
    /// Document has been posted; lines affect ledger balances.
    Posted,
    /// Posted and partially settled by payments.
    PartiallyPaid,
    /// Posted and fully settled.
    Paid,
    /// Document has been voided; kept for history, ignored by the ledger.
    Void,
}

impl DocumentStatus {
    /// Returns true if header fields and lines can still be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the document has left draft for good.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(
            self,
            Self::Posted | Self::PartiallyPaid | Self::Paid | Self::Void
        )
    }

    /// Returns true if the document's lines affect ledger balances.
    #[must_use]
    pub fn affects_ledger(&self) -> bool {
        matches!(self, Self::Posted | Self::PartiallyPaid | Self::Paid)
    }

    /// Returns true if a payment can be allocated against the document.
    #[must_use]
    pub fn accepts_payments(&self) -> bool {
        matches!(self, Self::Posted | Self::PartiallyPaid)
    }

    /// Returns true if the document can transition to approved.
    #[must_use]
    pub fn can_approve(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the document can transition to posted.
    #[must_use]
    pub fn can_post(&self) -> bool {
        matches!(self, Self::Draft | Self::Approved)
    }

    /// Returns true if the document can be voided.
    #[must_use]
    pub fn can_void(&self) -> bool {
        !matches!(self, Self::Void)
    }

    /// Lowercase wire name, matching the serde representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
            Self::Posted => "posted",
            Self::PartiallyPaid => "partially_paid",
            Self::Paid => "paid",
            Self::Void => "void",
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_draft_is_editable() {
        assert!(DocumentStatus::Draft.is_editable());
        assert!(!DocumentStatus::Approved.is_editable());
        assert!(!DocumentStatus::Posted.is_editable());
        assert!(!DocumentStatus::PartiallyPaid.is_editable());
        assert!(!DocumentStatus::Paid.is_editable());
        assert!(!DocumentStatus::Void.is_editable());
    }

    #[test]
    fn test_immutable_states() {
        assert!(!DocumentStatus::Draft.is_immutable());
        assert!(!DocumentStatus::Approved.is_immutable());
        assert!(DocumentStatus::Posted.is_immutable());
        assert!(DocumentStatus::Void.is_immutable());
    }

    #[test]
    fn test_ledger_effect() {
        assert!(DocumentStatus::Posted.affects_ledger());
        assert!(DocumentStatus::PartiallyPaid.affects_ledger());
        assert!(DocumentStatus::Paid.affects_ledger());
        assert!(!DocumentStatus::Draft.affects_ledger());
        assert!(!DocumentStatus::Void.affects_ledger());
    }

    #[test]
    fn test_approval_transitions() {
        assert!(DocumentStatus::Draft.can_approve());
        assert!(!DocumentStatus::Approved.can_approve());
        assert!(!DocumentStatus::Posted.can_approve());
        assert!(!DocumentStatus::Void.can_approve());
    }

    #[test]
    fn test_posting_transitions() {
        assert!(DocumentStatus::Draft.can_post());
        assert!(DocumentStatus::Approved.can_post());
        assert!(!DocumentStatus::Posted.can_post());
        assert!(!DocumentStatus::Void.can_post());
    }

    #[test]
    fn test_payment_acceptance() {
        assert!(DocumentStatus::Posted.accepts_payments());
        assert!(DocumentStatus::PartiallyPaid.accepts_payments());
        assert!(!DocumentStatus::Paid.accepts_payments());
        assert!(!DocumentStatus::Draft.accepts_payments());
    }
}
