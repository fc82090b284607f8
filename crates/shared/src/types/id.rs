//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `VehicleId` where an
//! `OrganizationId` is expected when crossing from database rows into the
//! ledger core.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
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

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
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

typed_id!(OrganizationId, "Unique identifier for a vehicle supplier or government organization.");
typed_id!(CreditTransactionId, "Unique identifier for a credit ledger entry.");
typed_id!(CreditTransferId, "Unique identifier for a credit transfer between suppliers.");
typed_id!(SalesSubmissionId, "Unique identifier for a sales submission.");
typed_id!(ModelYearReportId, "Unique identifier for a model year report.");
typed_id!(CreditAgreementId, "Unique identifier for a credit agreement.");
typed_id!(VehicleId, "Unique identifier for a vehicle model.");
typed_id!(DeficitId, "Unique identifier for an organization deficit record.");
