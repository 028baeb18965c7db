//! Strongly-typed identifiers for family tree entities
//!
//! Records are keyed by database integers. Wrapping them in newtypes keeps a
//! tree id from being passed where an entity id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier from a raw database key
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw database key
            pub const fn value(&self) -> i64 {
                self.0
            }

            /// Returns true if the key is below zero
            pub const fn is_negative(&self) -> bool {
                self.0 < 0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(raw.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(TreeId, "TREE");
define_id!(EntityId, "ENT");

impl EntityId {
    /// Id carried by an entity that has not been stored yet
    pub const UNSAVED: EntityId = EntityId(-1);

    /// Returns true if this is the placeholder id of an unstored entity
    pub fn is_unsaved(&self) -> bool {
        *self == Self::UNSAVED
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::UNSAVED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_id_display() {
        let id = TreeId::new(7);
        assert_eq!(id.to_string(), "TREE-7");
    }

    #[test]
    fn test_id_parsing() {
        let original = EntityId::new(42);
        let parsed: EntityId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);

        let bare: EntityId = "42".parse().unwrap();
        assert_eq!(bare, original);
    }

    #[test]
    fn test_unsaved_default() {
        let id = EntityId::default();
        assert!(id.is_unsaved());
        assert!(id.is_negative());
    }
}
