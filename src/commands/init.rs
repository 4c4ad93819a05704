//! Initialize a new portfolio site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Folio Configuration

# Site
title: Portfolio
author: John Doe
description: ''
url: http://example.com

# Directories
posts_dir: posts
projects_dir: projects
static_dir: public

# Server
server:
  ip: localhost
  port: 4000

# Code highlighting
highlight:
  theme: base16-ocean.dark
  line_number: true
"#;

const HELLO_POST: &str = r#"---
title: Hello World
date: 2024-01-01
tags: [meta]
excerpt: The first post on this site
---

Welcome! Posts live in `posts/`, projects in `projects/`.
"#;

/// Initialize a new site in the given directory.
///
/// Existing files are left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("projects"))?;
    fs::create_dir_all(target_dir.join("public"))?;

    write_if_missing(&target_dir.join(CONFIG_FILE), DEFAULT_CONFIG)?;
    write_if_missing(&target_dir.join("posts/hello-world.md"), HELLO_POST)?;

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::info!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Folio;
    use tempfile::TempDir;

    #[test]
    fn test_init_site() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        let folio = Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.config.server.port, 4000);

        let posts = folio.loader().load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "hello-world");
        assert!(folio.loader().load_projects().unwrap().is_empty());
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "title: Mine\n").unwrap();
        init_site(tmp.path()).unwrap();

        let folio = Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.config.title, "Mine");
    }
}
