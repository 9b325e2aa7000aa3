//! Identifier value objects
//!
//! All identifiers are opaque strings supplied by collaborators (the account
//! system for members, the place-search provider for places). They are
//! totally ordered so that every map keyed by them iterates deterministically.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Identifier of a meal (one group decision session)
    MealId
);

string_id!(
    /// Identifier of a member within a meal
    MemberId
);

string_id!(
    /// Place identifier issued by the place-search provider
    ///
    /// Ordering is lexicographic and doubles as the consensus tie-break order.
    PlaceId
);
