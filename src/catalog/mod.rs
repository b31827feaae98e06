//! Asset catalog - the build-time list of post descriptors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading the catalog file
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One markdown post and its metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostDescriptor {
    /// Display name of the post
    pub name: String,

    /// Optional URL-safe alias
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_name: Option<String>,

    /// Markdown file path, relative to the assets directory
    pub local_path: String,

    /// Publication date
    pub date: NaiveDate,
}

impl PostDescriptor {
    /// The string used to address this post in the URL and in the text map
    pub fn identity(&self) -> &str {
        self.safe_name.as_deref().unwrap_or(&self.name)
    }

    /// Whether the post counts as "new" relative to `today`
    pub fn is_new(&self, today: NaiveDate, window_days: i64) -> bool {
        (today - self.date).num_days() < window_days
    }
}

/// The catalog of all posts, read-only after startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetCatalog {
    #[serde(rename = "blogPosts")]
    pub posts: Vec<PostDescriptor>,
}

impl AssetCatalog {
    /// Load the catalog from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog: AssetCatalog =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!("Loaded catalog with {} posts", catalog.posts.len());
        Ok(catalog)
    }

    /// Posts sorted by date descending (newest first).
    ///
    /// The sort is stable, so posts sharing a date keep their catalog order.
    pub fn ordered(&self) -> Vec<PostDescriptor> {
        let mut posts = self.posts.clone();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    /// Find the descriptor whose identity equals `identity` exactly
    pub fn find(&self, identity: &str) -> Option<&PostDescriptor> {
        self.posts
            .iter()
            .find(|p| p.safe_name.as_deref() == Some(identity) || p.name == identity)
    }

    /// Validate catalog entries against the assets directory.
    ///
    /// Returns a human-readable problem per bad entry; an empty list means
    /// the catalog is clean.
    pub fn validate<P: AsRef<Path>>(&self, assets_dir: P) -> Vec<String> {
        let assets_dir = assets_dir.as_ref();
        let mut problems = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for post in &self.posts {
            let identity = post.identity();
            if !seen.insert(identity.to_string()) {
                problems.push(format!("duplicate identity key: {:?}", identity));
            }

            if !assets_dir.join(&post.local_path).exists() {
                problems.push(format!(
                    "{:?}: missing asset file {:?}",
                    post.name, post.local_path
                ));
            }

            if let Some(safe_name) = &post.safe_name {
                if slug::slugify(safe_name) != *safe_name {
                    problems.push(format!(
                        "{:?}: safeName {:?} is not URL-safe (expected {:?})",
                        post.name,
                        safe_name,
                        slug::slugify(safe_name)
                    ));
                }
            }
        }

        problems
    }
}
