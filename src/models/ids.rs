//! Strongly-typed ID wrappers for all entity types
//!
//! Ids are short strings: seed data uses `v1`, `c6`, `t5`, generated ids are
//! the entity prefix followed by a millisecond timestamp. Newtype wrappers
//! prevent mixing up ids from different entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used for generated ids of this type
            pub const PREFIX: &'static str = $prefix;

            /// Wrap an existing id string
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(UserId, "u");
define_id!(VendorId, "v");
define_id!(CategoryId, "c");
define_id!(TransactionId, "t");

/// Hands out `<prefix><millis>` ids that never repeat within a process
///
/// The numeric part is the current unix time in milliseconds, bumped past the
/// last value handed out so two records created in the same millisecond
/// still get distinct ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for `prefix`, skipping any value `taken` reports as in use
    pub fn next(&self, prefix: &str, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let now = chrono::Utc::now().timestamp_millis();
            let mut previous = self.last.load(Ordering::Relaxed);
            let value = loop {
                let candidate = now.max(previous + 1);
                match self.last.compare_exchange(
                    previous,
                    candidate,
                    Ordering::SeqCst,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => break candidate,
                    Err(actual) => previous = actual,
                }
            };

            let id = format!("{}{}", prefix, value);
            if !taken(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_display_and_serde() {
        let id = VendorId::new("v1");
        assert_eq!(id.to_string(), "v1");

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"v1\"");
        let back: VendorId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let generator = IdGenerator::new();
        let ids: HashSet<String> = (0..500)
            .map(|_| generator.next(TransactionId::PREFIX, |_| false))
            .collect();
        assert_eq!(ids.len(), 500);
        assert!(ids.iter().all(|id| id.starts_with('t')));
    }

    #[test]
    fn test_generator_skips_taken_ids() {
        let generator = IdGenerator::new();
        let first = generator.next("v", |_| false);
        let taken: HashSet<String> = [first.clone()].into_iter().collect();

        let second = generator.next("v", |id| taken.contains(id));
        assert_ne!(first, second);
    }
}
