//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `ReservationId` where a
//! `PropertyId` is expected.

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

typed_id!(PropertyId, "Unique identifier for a property.");
typed_id!(ReservationId, "Unique identifier for a reservation.");
typed_id!(TransactionId, "Unique identifier for a ledger transaction.");
typed_id!(ImportFileId, "Unique identifier for an imported report file.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ids_are_distinct_types() {
        let property = PropertyId::new();
        let reservation = ReservationId::new();
        assert_ne!(property.into_inner(), reservation.into_inner());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        let id = PropertyId::new();
        let parsed = PropertyId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_v7_ids_are_time_ordered() {
        let first = TransactionId::new();
        let second = TransactionId::new();
        assert!(first.into_inner() <= second.into_inner());
    }
}
