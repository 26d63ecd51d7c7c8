//! Strongly-typed ID wrappers for all entity types
//!
//! Rows carry serial integer keys assigned by the row store. Wrapping them in
//! newtypes prevents accidentally mixing up IDs of different tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw row key
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the raw row key
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            /// Accepts both `12` and the display form `acc-12`
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(AccountId, "acc-");
define_id!(TransactionId, "txn-");
define_id!(CategoryId, "cat-");
define_id!(BudgetId, "bud-");
define_id!(GoalId, "goal-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(AccountId::new(7).to_string(), "acc-7");
        assert_eq!(GoalId::new(12).to_string(), "goal-12");
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("acc-3".parse::<AccountId>().unwrap(), AccountId::new(3));
        assert_eq!("3".parse::<AccountId>().unwrap(), AccountId::new(3));
        assert!("acc-x".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_id_serialization() {
        let id = CategoryId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let back: CategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
