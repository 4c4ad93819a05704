//! CLI subcommands

pub mod init;
pub mod list;
pub mod new;
pub mod show;

use clap::ValueEnum;

/// Which collection a command works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContentKind {
    #[value(alias = "posts")]
    Post,
    #[value(alias = "projects")]
    Project,
}

impl ContentKind {
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Post => "post",
            ContentKind::Project => "project",
        }
    }
}
