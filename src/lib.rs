//! lugsite: a static site generator for a Linux user group website
//!
//! Markdown content (events, people, projects, pages and news) is loaded into
//! a [`graph::SiteGraph`], rendered through Tera templates and written out as
//! plain HTML together with the site's static files and content resources.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod graph;
pub mod helpers;
pub mod i18n;
pub mod templates;

pub use error::Error;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A site on disk: its configuration and resolved directories
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown content, one subdirectory per content type
    pub content_dir: PathBuf,
    /// Template overrides
    pub template_dir: PathBuf,
    /// Generated site
    pub output_dir: PathBuf,
    /// Copied to `<output>/static`
    pub static_dir: PathBuf,
    /// Copied to `<output>/<resources_url>`
    pub resources_dir: PathBuf,
}

impl Site {
    /// Open a site directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Use an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        Self {
            content_dir: base_dir.join(&config.content_dir),
            template_dir: base_dir.join(&config.template_dir),
            output_dir: base_dir.join(&config.output_dir),
            static_dir: base_dir.join(&config.static_dir),
            resources_dir: base_dir.join(&config.resources_dir),
            config,
            base_dir,
        }
    }

    /// Path of the site's config file
    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join("_config.yml")
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Remove the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
