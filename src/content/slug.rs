//! Slugs: filename-derived record identifiers

use std::path::Path;

use super::error::{ContentError, ContentResult};

/// Extension of content files
pub const MARKDOWN_EXT: &str = "md";

/// Slug for a content file: the file name minus `.md`.
///
/// Returns `None` for anything that is not a markdown file.
pub fn slug_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(".md")?;
    if stem.is_empty() {
        return None;
    }
    Some(stem.to_string())
}

/// Reject slugs that could not have come from a file name in the content
/// directory. Checked before any path is built from the slug.
pub fn validate_slug(slug: &str) -> ContentResult<()> {
    let is_valid = !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0']);

    if is_valid {
        Ok(())
    } else {
        Err(ContentError::InvalidSlug(slug.to_string()))
    }
}

/// File name of the record stored under `slug`
pub fn file_name(slug: &str) -> String {
    format!("{}.{}", slug, MARKDOWN_EXT)
}

/// URL-friendly slug for a new record title
pub fn slug_for_title(title: &str) -> String {
    ::slug::slugify(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_slug_from_filename() {
        assert_eq!(
            slug_from_path(&PathBuf::from("posts/my-post.md")),
            Some("my-post".to_string())
        );
        assert_eq!(
            slug_from_path(&PathBuf::from("v1.2-release.md")),
            Some("v1.2-release".to_string())
        );
        assert_eq!(slug_from_path(&PathBuf::from("notes.markdown")), None);
        assert_eq!(slug_from_path(&PathBuf::from("README")), None);
        assert_eq!(slug_from_path(&PathBuf::from(".md")), None);
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("my-post").is_ok());
        assert!(validate_slug("v1.2-release").is_ok());

        for bad in ["", ".", "..", "../secret", "a/b", "..\\win", "nul\0byte", "/etc/passwd"] {
            assert!(
                matches!(validate_slug(bad), Err(ContentError::InvalidSlug(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_slug_for_title() {
        assert_eq!(slug_for_title("Hello, World!"), "hello-world");
        assert_eq!(file_name("hello-world"), "hello-world.md");
    }
}
