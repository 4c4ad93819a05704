//! Create a new post or project

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use super::ContentKind;
use crate::content::slug::{file_name, slug_for_title, validate_slug};
use crate::content::{MetaValue, Metadata};
use crate::Folio;

/// Scaffold a content file and return its path. Existing files are never
/// overwritten.
pub fn create(
    folio: &Folio,
    kind: ContentKind,
    title: &str,
    slug: Option<&str>,
    tags: &[String],
) -> Result<PathBuf> {
    let slug = match slug {
        Some(slug) => slug.to_string(),
        None => slug_for_title(title),
    };
    validate_slug(&slug)?;

    let target_dir = match kind {
        ContentKind::Post => &folio.posts_dir,
        ContentKind::Project => &folio.projects_dir,
    };
    fs::create_dir_all(target_dir)?;

    let file_path = target_dir.join(file_name(&slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let mut meta = Metadata::new();
    meta.insert("title", MetaValue::Text(title.to_string()));
    meta.insert("date", MetaValue::Text(today));
    meta.insert("tags", MetaValue::List(tags.to_vec()));
    match kind {
        ContentKind::Post => meta.insert("excerpt", MetaValue::Text(String::new())),
        ContentKind::Project => meta.insert("description", MetaValue::Text(String::new())),
    }

    fs::write(&file_path, format!("{}\n", meta.to_front_matter()))?;
    tracing::info!("Created {} {:?}", kind.label(), file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_round_trips_through_loader() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        let path = create(
            &folio,
            ContentKind::Post,
            "Robots: Part 1",
            None,
            &["ai".to_string(), "robotics".to_string()],
        )
        .unwrap();
        assert_eq!(path, tmp.path().join("posts/robots-part-1.md"));

        let post = folio.loader().get_post("robots-part-1").unwrap().unwrap();
        assert_eq!(post.title, "Robots: Part 1");
        assert_eq!(post.tags, vec!["ai", "robotics"]);
        assert!(crate::content::parse_date(&post.date).is_some());
    }

    #[test]
    fn test_create_project_with_slug() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        create(&folio, ContentKind::Project, "Rover", Some("rover-v2"), &[]).unwrap();
        let project = folio.loader().get_project("rover-v2").unwrap().unwrap();
        assert_eq!(project.title, "Rover");
        assert!(project.tags.is_empty());

        assert!(create(&folio, ContentKind::Project, "Rover", Some("rover-v2"), &[]).is_err());
        assert!(create(&folio, ContentKind::Project, "Escape", Some("../x"), &[]).is_err());
    }
}
