use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// A node's local cache state.
///
/// Reads take the shared side of the lock and writes take the exclusive
/// side. Every operation is a single map call under one guard, so no caller
/// can observe a half-applied mutation, and nothing here ever performs I/O
/// while the lock is held.
#[derive(Debug, Default)]
pub struct Store {
    inner: RwLock<HashMap<String, String>>,
}

impl Store {
    pub fn new() -> Self {
        Store {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the current value, or `None` when the key was never written
    /// or has been deleted. An empty string is a present value.
    pub fn get(&self, key: &str) -> Option<String> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(key).cloned()
    }

    pub fn set(&self, key: String, value: String) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(key, value);
    }

    /// Removes the key, reporting whether it existed.
    pub fn delete(&self, key: &str) -> bool {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
