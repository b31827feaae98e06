//! Shared post text store
//!
//! Holds the identity-key to markdown-text map the loader fills in, plus the
//! latest fetch error and the in-flight counter the view uses to tell
//! "still loading" apart from "definitively not found".

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct StoreInner {
    texts: HashMap<String, String>,
    latest_error: Option<String>,
    pending: usize,
    started: bool,
}

/// Cheaply cloneable handle to the shared post text map
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `count` fetches as in flight
    pub fn begin(&self, count: usize) {
        let mut inner = self.inner.write().unwrap();
        inner.started = true;
        inner.pending += count;
    }

    /// Merge one fetched post into the map and settle its fetch.
    ///
    /// Keys only ever accumulate; a later insert for the same key replaces
    /// the text but never removes it.
    pub fn insert(&self, key: impl Into<String>, text: impl Into<String>) {
        let mut inner = self.inner.write().unwrap();
        inner.texts.insert(key.into(), text.into());
        inner.pending = inner.pending.saturating_sub(1);
    }

    /// Settle one failed fetch, keeping only the most recent error message
    pub fn record_error(&self, message: impl Into<String>) {
        let mut inner = self.inner.write().unwrap();
        inner.latest_error = Some(message.into());
        inner.pending = inner.pending.saturating_sub(1);
    }

    /// Text for an identity key, if its fetch has completed successfully
    pub fn text(&self, key: &str) -> Option<String> {
        self.inner.read().unwrap().texts.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().unwrap().texts.contains_key(key)
    }

    /// Whether any fetch is still in flight (or loading has not begun)
    pub fn is_loading(&self) -> bool {
        let inner = self.inner.read().unwrap();
        !inner.started || inner.pending > 0
    }

    /// The most recent fetch error, if not dismissed
    pub fn latest_error(&self) -> Option<String> {
        self.inner.read().unwrap().latest_error.clone()
    }

    /// Clear the error banner without retrying anything
    pub fn dismiss_error(&self) {
        self.inner.write().unwrap().latest_error = None;
    }

    /// All identity keys currently in the map
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().unwrap().texts.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_until_all_settled() {
        let store = PostStore::new();
        assert!(store.is_loading());

        store.begin(2);
        assert!(store.is_loading());

        store.insert("a", "# a");
        assert!(store.is_loading());

        store.record_error("read failed");
        assert!(!store.is_loading());
        assert_eq!(store.text("a").unwrap(), "# a");
        assert!(store.text("b").is_none());
    }

    #[test]
    fn test_latest_error_wins_and_dismisses() {
        let store = PostStore::new();
        store.begin(2);
        store.record_error("first failure");
        store.record_error("second failure");
        assert_eq!(store.latest_error().unwrap(), "second failure");

        store.dismiss_error();
        assert!(store.latest_error().is_none());
        // Dismissing does not resurrect the missing posts
        assert!(store.keys().is_empty());
    }
}
