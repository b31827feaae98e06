//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Site
    pub title: String,
    pub author: String,
    pub email: String,
    pub repository: String,

    // Directory
    pub assets_dir: String,
    /// Catalog file name, relative to the assets directory
    pub catalog: String,

    // Rendering
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Search
    #[serde(default)]
    pub search: SearchConfig,

    /// Posts within this many days of today get a "new" badge in the listing
    pub new_post_window_days: i64,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "A blog".to_string(),
            author: "Anonymous".to_string(),
            email: String::new(),
            repository: String::new(),
            assets_dir: "assets".to_string(),
            catalog: "index.json".to_string(),
            highlight: HighlightConfig::default(),
            search: SearchConfig::default(),
            new_post_window_days: 7,
        }
    }
}

impl BlogConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: BlogConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "Solarized (light)".to_string(),
            line_number: true,
        }
    }
}

/// Fuzzy search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of similar-post suggestions to show
    pub max_suggestions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_suggestions: 5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BlogConfig::default();
        assert_eq!(config.assets_dir, "assets");
        assert_eq!(config.catalog, "index.json");
        assert!(config.highlight.line_number);
        assert_eq!(config.new_post_window_days, 7);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Elijah Passmore's blog
author: Elijah Passmore
email: eljpsm@eljpsm.com
search:
  max_suggestions: 3
"#;
        let config: BlogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Elijah Passmore's blog");
        assert_eq!(config.email, "eljpsm@eljpsm.com");
        assert_eq!(config.search.max_suggestions, 3);
        // Unspecified sections keep their defaults
        assert_eq!(config.highlight.theme, "Solarized (light)");
    }
}
