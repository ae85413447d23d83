//! startrail: a static blog generator backed by a headless CMS
//!
//! Content lives in a remote content repository. At build time the
//! generator queries it, maps raw documents into view models and writes
//! a paginated listing plus one page per post using embedded Tera
//! templates.

pub mod client;
pub mod commands;
pub mod config;
pub mod content;
pub mod detail;
pub mod generator;
pub mod helpers;
pub mod listing;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main application handle
#[derive(Clone)]
pub struct Startrail {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Startrail {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
