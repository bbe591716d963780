//! A trie handle that many threads can hold.
//!
//! The trie itself does no locking. `SharedTrie` serializes writers behind a
//! read-write lock so a concurrent host can keep one trie per handle instead
//! of a process-wide global.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::TrieConfig;
use crate::error::{DeleteError, InsertError};
use crate::observe::Observer;
use crate::trie::PatriciaTrie;

#[derive(Clone, Default)]
pub struct SharedTrie {
    inner: Arc<RwLock<PatriciaTrie>>,
}

impl SharedTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(PatriciaTrie::with_config(config))),
        }
    }

    pub fn insert(&self, key: &str) -> Result<(), InsertError> {
        self.inner.write().insert(key)
    }

    pub fn insert_with(&self, key: &str, observer: &mut dyn Observer) -> Result<(), InsertError> {
        self.inner.write().insert_with(key, observer)
    }

    pub fn delete(&self, key: &str) -> Result<(), DeleteError> {
        self.inner.write().delete(key)
    }

    pub fn delete_with(&self, key: &str, observer: &mut dyn Observer) -> Result<(), DeleteError> {
        self.inner.write().delete_with(key, observer)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().contains(key)
    }

    /// Reset to the empty state.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Run `f` against the trie under a shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&PatriciaTrie) -> R) -> R {
        f(&self.inner.read())
    }
}
