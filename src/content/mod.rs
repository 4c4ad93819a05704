//! Content module - posts, projects and their front-matter

mod date;
mod error;
pub mod frontmatter;
pub mod loader;
mod markdown;
pub mod query;
mod record;
pub mod slug;

pub use date::parse_date;
pub use error::{ContentError, ContentResult};
pub use frontmatter::{MetaValue, Metadata};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use record::{Post, Project, Record};
