//! Preference store trait for Tally.
//!
//! This module defines the `PrefStore` trait: a persistent string key →
//! string value map. Values are JSON documents, but the store itself is
//! format-agnostic.

use std::sync::Arc;

use crate::error::Result;

/// Trait for preference storage backends.
///
/// Implementations provide a persistent key → string map with last-write-wins
/// semantics. Writes to distinct keys are independent: a failed write to one
/// key does not roll back a prior successful write to another.
pub trait PrefStore: Send + Sync {
    /// Retrieve the value for a key.
    ///
    /// Returns `Ok(None)` if the key has never been set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set the value for a key, creating or replacing it.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key.
    ///
    /// Returns `Ok(())` even if the key doesn't exist.
    fn remove(&self, key: &str) -> Result<()>;

    /// Check if a key exists.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Blanket implementation of PrefStore for Arc-wrapped stores.
///
/// This allows using `Arc<T>` where `T: PrefStore` is expected, which is
/// useful for sharing a store between the engine and tests.
impl<T: PrefStore + ?Sized> PrefStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
