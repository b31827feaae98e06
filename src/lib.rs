//! bloglet: a small personal blog front-end
//!
//! Posts are static markdown assets described by a build-time JSON catalog.
//! The crate loads them asynchronously into a shared text map, matches URL
//! paths against the catalog (with a fuzzy fallback for near misses), and
//! renders markdown with syntax-highlighted code blocks.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod matcher;
pub mod server;
pub mod view;

use anyhow::Result;
use std::path::Path;

/// The main blog application handle
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding the catalog and the markdown assets
    pub assets_dir: std::path::PathBuf,
    /// The post catalog, read-only after startup
    pub catalog: catalog::AssetCatalog,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        let assets_dir = base_dir.join(&config.assets_dir);
        let catalog = catalog::AssetCatalog::load(assets_dir.join(&config.catalog))?;

        Ok(Self {
            config,
            base_dir,
            assets_dir,
            catalog,
        })
    }

    /// List posts to stdout
    pub fn list(&self) -> Result<()> {
        commands::list::run(self)
    }

    /// Validate the catalog against the assets directory
    pub fn check(&self) -> Result<()> {
        commands::check::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_new_loads_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");
        std::fs::create_dir(&assets).unwrap();
        std::fs::write(
            assets.join("index.json"),
            r#"{"blogPosts":[{"name":"a","localPath":"a.md","date":"2022-01-01"}]}"#,
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.catalog.posts.len(), 1);
        assert_eq!(blog.assets_dir, assets);
    }

    #[test]
    fn test_blog_new_missing_catalog_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Blog::new(dir.path()).is_err());
    }
}
