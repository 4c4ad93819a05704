//! Content loader - loads posts and projects from their directories
//!
//! Every call re-reads the directory; nothing is cached between calls.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::{ContentError, ContentResult};
use super::frontmatter::{self, Metadata};
use super::record::{Post, Project, Record};
use super::slug::{file_name, slug_from_path, validate_slug};

/// Loads posts and projects from their content directories
#[derive(Debug, Clone)]
pub struct ContentLoader {
    posts_dir: PathBuf,
    projects_dir: PathBuf,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(posts_dir: P, projects_dir: Q) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            projects_dir: projects_dir.into(),
        }
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    pub fn projects_dir(&self) -> &Path {
        &self.projects_dir
    }

    /// All posts, newest first, without bodies
    pub fn load_posts(&self) -> ContentResult<Vec<Post>> {
        load_posts(&self.posts_dir)
    }

    /// All projects, newest first, bodies included
    pub fn load_projects(&self) -> ContentResult<Vec<Project>> {
        load_projects(&self.projects_dir)
    }

    pub fn get_post(&self, slug: &str) -> ContentResult<Option<Post>> {
        get_post(&self.posts_dir, slug)
    }

    pub fn get_project(&self, slug: &str) -> ContentResult<Option<Project>> {
        get_project(&self.projects_dir, slug)
    }
}

/// Load every post in `dir`. A missing directory yields an empty list.
pub fn load_posts(dir: &Path) -> ContentResult<Vec<Post>> {
    let posts = load_collection(dir, |slug, meta, _body| {
        Post::from_metadata(slug, meta, None)
    })?;
    tracing::debug!("Loaded {} posts from {:?}", posts.len(), dir);
    Ok(posts)
}

/// Load every project in `dir`. A missing directory yields an empty list.
pub fn load_projects(dir: &Path) -> ContentResult<Vec<Project>> {
    let projects = load_collection(dir, Project::from_metadata)?;
    tracing::debug!("Loaded {} projects from {:?}", projects.len(), dir);
    Ok(projects)
}

/// Look up one post by slug, body included
pub fn get_post(dir: &Path, slug: &str) -> ContentResult<Option<Post>> {
    load_one(dir, slug, |slug, meta, body| {
        Post::from_metadata(slug, meta, Some(body))
    })
}

/// Look up one project by slug
pub fn get_project(dir: &Path, slug: &str) -> ContentResult<Option<Project>> {
    load_one(dir, slug, Project::from_metadata)
}

/// Sort newest first. Undated records go last; ties keep their order.
pub fn sort_by_date_desc<R: Record>(records: &mut [R]) {
    records.sort_by_cached_key(|record| std::cmp::Reverse(record.sort_date()));
}

fn load_collection<R, F>(dir: &Path, build: F) -> ContentResult<Vec<R>>
where
    R: Record,
    F: Fn(&str, &Metadata, &str) -> R,
{
    if !dir.exists() {
        tracing::debug!("Content directory {:?} does not exist", dir);
        return Ok(Vec::new());
    }

    let mut records = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                // Broken entries only matter when they name a content file
                let skippable = e.depth() > 0
                    && e.path().is_some_and(|path| slug_from_path(path).is_none());
                if skippable {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
                return Err(e.into());
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(slug) = slug_from_path(path) else {
            continue;
        };

        let raw = read_file(path)?;
        let (meta, body) = frontmatter::parse(&raw);
        records.push(build(&slug, &meta, body));
    }

    sort_by_date_desc(&mut records);
    Ok(records)
}

fn load_one<R, F>(dir: &Path, slug: &str, build: F) -> ContentResult<Option<R>>
where
    F: FnOnce(&str, &Metadata, &str) -> R,
{
    validate_slug(slug)?;

    let path = dir.join(file_name(slug));
    if !path.is_file() {
        tracing::debug!("No content file at {:?}", path);
        return Ok(None);
    }

    let raw = read_file(&path)?;
    let (meta, body) = frontmatter::parse(&raw);
    Ok(Some(build(slug, &meta, body)))
}

fn read_file(path: &Path) -> ContentResult<String> {
    fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })
}
