//! In-memory preference storage for Tally.
//!
//! Backs tests and any caller that wants engine semantics without touching
//! the filesystem.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Result;
use crate::storage::PrefStore;

/// In-memory preference storage.
#[derive(Debug, Default)]
pub struct MemoryPrefStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPrefStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.values.lock().expect("prefs mutex poisoned").len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PrefStore for MemoryPrefStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().expect("prefs mutex poisoned");
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().expect("prefs mutex poisoned");
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().expect("prefs mutex poisoned");
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::tests::test_pref_store_crud;
    use std::sync::Arc;

    #[test]
    fn test_memory_pref_store_crud() {
        let store = MemoryPrefStore::new();
        test_pref_store_crud(&store);
    }

    #[test]
    fn test_len_and_is_empty() {
        let store = MemoryPrefStore::new();
        assert!(store.is_empty());

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.len(), 2);

        store.remove("a").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_arc_blanket_impl() {
        let store = Arc::new(MemoryPrefStore::new());
        test_pref_store_crud(&store);
    }
}
