//! Counterparty domain types.

use serde::{Deserialize, Serialize};

/// Kind of counterparty a contact represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    /// Buys from us (invoices, quotations, POS orders).
    Customer,
    /// Sells to us (purchase orders, bills).
    Supplier,
    /// Acts as both customer and supplier.
    Both,
}

impl ContactKind {
    /// Returns true if the contact can appear on sales documents.
    #[must_use]
    pub fn is_customer(&self) -> bool {
        matches!(self, Self::Customer | Self::Both)
    }

    /// Returns true if the contact can appear on purchase documents.
    #[must_use]
    pub fn is_supplier(&self) -> bool {
        matches!(self, Self::Supplier | Self::Both)
    }
}
