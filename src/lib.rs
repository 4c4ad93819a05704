//! folio-rs: markdown-backed posts and projects for a portfolio site
//!
//! Posts and projects are markdown files with a front-matter block. This
//! crate loads them into sorted collections, builds tag indexes, filters by
//! tag and looks up single records by slug. Nothing is cached: every call
//! reads the content directories again.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::ContentLoader;

/// A portfolio site rooted at a directory
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Blog post directory
    pub posts_dir: PathBuf,
    /// Project directory
    pub projects_dir: PathBuf,
    /// Static assets served next to the API
    pub static_dir: PathBuf,
}

impl Folio {
    /// Open a site, reading `folio.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = config::SiteConfig::load_or_default(&base_dir)?;
        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let posts_dir = base_dir.join(&config.posts_dir);
        let projects_dir = base_dir.join(&config.projects_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            posts_dir,
            projects_dir,
            static_dir,
        }
    }

    /// Loader over this site's content directories
    pub fn loader(&self) -> ContentLoader {
        ContentLoader::new(&self.posts_dir, &self.projects_dir)
    }
}
