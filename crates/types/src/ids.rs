//! Strongly-typed catalog identifiers.
//!
//! Every catalog entity is identified by a UUID. Wrapping each in its own newtype keeps a
//! policy id from being compared against a specialization id by accident.

use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Error returned when an identifier string is not a valid UUID.
#[derive(Debug, thiserror::Error)]
#[error("invalid {kind} identifier: {value}")]
pub struct IdError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            Debug,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Allocates a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parses an identifier from any textual UUID form accepted by the `uuid` crate.
            pub fn parse(input: &str) -> Result<Self, IdError> {
                Uuid::parse_str(input.trim()).map(Self).map_err(|_| IdError {
                    kind: $kind,
                    value: input.to_owned(),
                })
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

uuid_id!(
    /// Identifier of a doctor specialization catalog entry.
    SpecializationId,
    "specialization"
);
uuid_id!(
    /// Identifier of a priced service on a provider price list.
    PriceListEntryId,
    "price list entry"
);
uuid_id!(
    /// Identifier of an insurance policy.
    PolicyId,
    "policy"
);
uuid_id!(
    /// Identifier of a coverage rule owned by a policy.
    CoverageRuleId,
    "coverage rule"
);
