//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,

    // Content repository
    pub api: ApiConfig,

    // Pagination
    pub per_page: usize,
    pub pagination_dir: String,

    // Presentation
    pub date_format: String,
    pub words_per_minute: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "startrail".to_string(),
            description: String::new(),
            author: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),

            api: ApiConfig::default(),

            per_page: 5,
            pagination_dir: "page".to_string(),

            date_format: "%d %b %Y".to_string(),
            words_per_minute: 200,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Content repository connection settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the content repository API
    pub endpoint: String,

    /// Access token; `CONTENT_API_TOKEN` takes precedence when set
    pub token: Option<String>,
}

impl ApiConfig {
    /// Resolve the access token, preferring the environment variable
    pub fn token(&self) -> Option<String> {
        std::env::var("CONTENT_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.token.clone())
    }
}
