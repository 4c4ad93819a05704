//! Errors raised while reading content from disk

use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading posts or projects.
///
/// A missing directory or a missing file is not an error: loaders return an
/// empty collection or `None` for those.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The slug could escape the content directory or is not a file name
    #[error("invalid slug: {0:?}")]
    InvalidSlug(String),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list content directory: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type ContentResult<T> = std::result::Result<T, ContentError>;
