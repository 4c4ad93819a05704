//! Post and Project records

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::date::parse_date;
use super::frontmatter::Metadata;

/// Fields shared by every kind of content record
pub trait Record {
    fn slug(&self) -> &str;
    fn title(&self) -> &str;
    fn date(&self) -> &str;
    fn tags(&self) -> &[String];

    /// Parsed `date`, `None` when empty or unrecognized
    fn sort_date(&self) -> Option<NaiveDateTime> {
        parse_date(self.date())
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// File name minus extension
    pub slug: String,

    /// Falls back to the slug
    pub title: String,

    pub date: String,

    pub tags: Vec<String>,

    pub excerpt: String,

    /// Markdown body; only present on single-post lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Post {
    /// Build a post from parsed front-matter. `content` is `None` for list
    /// entries.
    pub fn from_metadata(slug: &str, meta: &Metadata, content: Option<&str>) -> Self {
        // A legacy singular `category` stands in for missing `tags`
        let tags = match meta.list("tags") {
            Some(tags) => tags.to_vec(),
            None => meta
                .text("category")
                .filter(|c| !c.is_empty())
                .map(|c| vec![c.to_string()])
                .unwrap_or_default(),
        };

        Self {
            slug: slug.to_string(),
            title: text_or(meta, "title", slug),
            date: text_or(meta, "date", ""),
            tags,
            excerpt: text_or(meta, "excerpt", ""),
            content: content.map(str::to_string),
        }
    }
}

impl Record for Post {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// A portfolio project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub slug: String,
    pub title: String,
    pub description: String,

    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper: Option<String>,

    pub tags: Vec<String>,
    pub date: String,

    /// Highlighted on the home page
    #[serde(default)]
    pub featured: bool,

    /// Markdown body, always loaded for projects
    pub content: String,
}

impl Project {
    pub fn from_metadata(slug: &str, meta: &Metadata, content: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: text_or(meta, "title", slug),
            description: text_or(meta, "description", ""),
            image: optional_text(meta, "image"),
            github: optional_text(meta, "github"),
            website: optional_text(meta, "website"),
            paper: optional_text(meta, "paper"),
            tags: meta.list("tags").map(<[String]>::to_vec).unwrap_or_default(),
            date: text_or(meta, "date", ""),
            featured: meta.text("featured") == Some("true"),
            content: content.to_string(),
        }
    }
}

impl Record for Project {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Non-empty scalar for `key`, or `default`
fn text_or(meta: &Metadata, key: &str, default: &str) -> String {
    optional_text(meta, key).unwrap_or_else(|| default.to_string())
}

fn optional_text(meta: &Metadata, key: &str) -> Option<String> {
    meta.text(key)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
