#![forbid(unsafe_code)]

//! Binding tables: exact-match maps from a shortcut key to an action token.
//!
//! A [`Profile`] is the lowest layer of the binding model. It knows nothing
//! about events or grabbers; it stores at most one action per key and answers
//! lookups.
//!
//! # Invariants
//!
//! 1. Each key maps to at most one action. Binding an already-bound key
//!    replaces the previous action (last write wins).
//! 2. Lookup is exact: no modifier subsetting, no fallback to a lower click
//!    count.
//! 3. `unbind` of an absent key is a no-op and is idempotent.
//! 4. Distinct keys never affect each other.

use std::fmt;
use std::hash::Hash;

use ahash::AHashMap;

/// Exact-match table from a shortcut key `K` to an action `A`.
pub struct Profile<K, A> {
    bindings: AHashMap<K, A>,
}

impl<K, A> Default for Profile<K, A> {
    fn default() -> Self {
        Self {
            bindings: AHashMap::new(),
        }
    }
}

impl<K: Clone, A: Clone> Clone for Profile<K, A> {
    fn clone(&self) -> Self {
        Self {
            bindings: self.bindings.clone(),
        }
    }
}

impl<K: fmt::Debug, A: fmt::Debug> fmt::Debug for Profile<K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.bindings.iter()).finish()
    }
}

impl<K: Eq + Hash, A> Profile<K, A> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `action`, returning the action it replaced.
    pub fn bind(&mut self, key: K, action: A) -> Option<A> {
        self.bindings.insert(key, action)
    }

    /// Look up the action bound to `key`.
    #[must_use]
    pub fn lookup(&self, key: &K) -> Option<&A> {
        self.bindings.get(key)
    }

    /// Remove the binding for `key`, returning it if present.
    pub fn unbind(&mut self, key: &K) -> Option<A> {
        self.bindings.remove(key)
    }

    /// Whether `key` has a binding.
    #[must_use]
    pub fn has_binding(&self, key: &K) -> bool {
        self.bindings.contains_key(key)
    }

    /// Whether any key is bound to `action`. Linear scan.
    #[must_use]
    pub fn is_bound(&self, action: &A) -> bool
    where
        A: PartialEq,
    {
        self.bindings.values().any(|a| a == action)
    }

    /// Remove every binding.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate `(key, action)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &A)> {
        self.bindings.iter()
    }

    /// Iterate bound actions in unspecified order.
    pub fn actions(&self) -> impl Iterator<Item = &A> {
        self.bindings.values()
    }
}
