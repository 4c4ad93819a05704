//! Site configuration (folio.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Name of the configuration file at the site root
pub const CONFIG_FILE: &str = "folio.yml";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub description: String,
    pub url: String,

    // Directories, relative to the site root
    pub posts_dir: String,
    pub projects_dir: String,
    pub static_dir: String,

    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            author: "John Doe".to_string(),
            description: String::new(),
            url: "http://example.com".to_string(),

            posts_dir: "posts".to_string(),
            projects_dir: "projects".to_string(),
            static_dir: "public".to_string(),

            server: ServerConfig::default(),
            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {:?}", path))?;
        Ok(config)
    }

    /// Load `folio.yml` from `base_dir`, falling back to defaults when absent
    pub fn load_or_default<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let path = base_dir.as_ref().join(CONFIG_FILE);
        if path.exists() {
            tracing::debug!("Loading configuration from {:?}", path);
            Self::load(&path)
        } else {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE);
            Ok(Self::default())
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}
