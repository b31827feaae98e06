//! Post loader - fans out one asynchronous read per catalog entry
//!
//! Reads race freely and merge into the [`PostStore`] as they finish; a
//! failed read never blocks the others and leaves its post absent for the
//! rest of the session.

use std::path::PathBuf;
use tokio::task::JoinSet;

use super::PostStore;
use crate::catalog::PostDescriptor;

/// Loads post text for every descriptor in the catalog
#[derive(Clone)]
pub struct PostLoader {
    assets_dir: PathBuf,
    store: PostStore,
}

impl PostLoader {
    pub fn new(assets_dir: PathBuf, store: PostStore) -> Self {
        Self { assets_dir, store }
    }

    /// Fetch every post and wait for all fetches to settle.
    ///
    /// No retries, no rate limiting, no ordering between fetches.
    pub async fn load_all(&self, posts: &[PostDescriptor]) {
        self.store.begin(posts.len());

        let mut set = JoinSet::new();
        for post in posts {
            let path = self.assets_dir.join(&post.local_path);
            let key = post.identity().to_string();
            let store = self.store.clone();

            set.spawn(async move {
                match tokio::fs::read_to_string(&path).await {
                    Ok(text) => {
                        tracing::debug!("Loaded post {:?}", key);
                        store.insert(key, text);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?} from {:?}: {}", key, path, e);
                        store.record_error(format!("could not load {:?}: {}", key, e));
                    }
                }
            });
        }

        while set.join_next().await.is_some() {}
    }

    /// Kick off `load_all` in the background and return immediately
    pub fn spawn_load_all(&self, posts: Vec<PostDescriptor>) {
        let loader = self.clone();
        tokio::spawn(async move {
            loader.load_all(&posts).await;
            tracing::info!("All post fetches settled");
        });
    }
}
