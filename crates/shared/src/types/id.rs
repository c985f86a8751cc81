//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing an `AccountId` where a
//! `BranchId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(BranchId, "Unique identifier for a branch.");
typed_id!(CurrencyId, "Unique identifier for a currency.");
typed_id!(ContactId, "Unique identifier for a contact (counterparty).");
typed_id!(AccountTypeId, "Unique identifier for an account type.");
typed_id!(
    AccountId,
    "Unique identifier for a chart of accounts entry."
);
typed_id!(TaxRateId, "Unique identifier for a tax rate.");
typed_id!(DocumentId, "Unique identifier for a transaction document.");
typed_id!(LineId, "Unique identifier for a document line item.");
typed_id!(PaymentId, "Unique identifier for a payment allocation.");
typed_id!(UserId, "Unique identifier for an acting user.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(DocumentId::new(), DocumentId::new());
        assert_ne!(LineId::new(), LineId::new());
    }

    #[test]
    fn test_round_trip_through_string() {
        let id = AccountId::new();
        let parsed = AccountId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_from_uuid_preserves_value() {
        let raw = Uuid::new_v4();
        assert_eq!(BranchId::from_uuid(raw).into_inner(), raw);
    }
}
