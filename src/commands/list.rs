//! List posts, projects and tag indexes

use anyhow::Result;
use std::fmt::Write;

use super::ContentKind;
use crate::content::query::{self, ALL_TAGS};
use crate::content::{Post, Project};
use crate::Folio;

/// Print a collection, filtered by `tags`
pub fn run(folio: &Folio, kind: ContentKind, tags: &[String]) -> Result<()> {
    let loader = folio.loader();
    let output = match kind {
        ContentKind::Post => format_posts(&loader.load_posts()?, tags)?,
        ContentKind::Project => format_projects(&loader.load_projects()?, tags)?,
    };
    print!("{}", output);
    Ok(())
}

/// Print the tag index of a collection
pub fn run_tags(folio: &Folio, kind: ContentKind) -> Result<()> {
    let loader = folio.loader();
    let tags = match kind {
        ContentKind::Post => query::post_tags(&loader.load_posts()?),
        ContentKind::Project => query::project_tags(&loader.load_projects()?),
    };
    for tag in tags {
        println!("{}", tag);
    }
    Ok(())
}

/// The posts list takes a single tag filter
pub fn format_posts(posts: &[Post], tags: &[String]) -> Result<String> {
    let tag = match tags {
        [] => ALL_TAGS,
        [tag] => tag.as_str(),
        _ => anyhow::bail!("Posts can be filtered by one tag at a time"),
    };
    let posts = query::filter_by_tag(posts, tag);

    let mut out = String::new();
    if posts.is_empty() {
        writeln!(out, "No posts found for \"{}\"", tag)?;
        return Ok(out);
    }

    writeln!(out, "Posts ({}):", posts.len())?;
    for post in posts {
        writeln!(
            out,
            "  {:<10} {} [{}]{}",
            display_date(&post.date),
            post.title,
            post.slug,
            format_tags(&post.tags)
        )?;
    }
    Ok(out)
}

/// Projects must carry every tag in `tags`
pub fn format_projects(projects: &[Project], tags: &[String]) -> Result<String> {
    let projects = query::filter_by_tags(projects, tags);

    let mut out = String::new();
    if projects.is_empty() {
        writeln!(out, "No projects found with the selected filters.")?;
        return Ok(out);
    }

    writeln!(out, "Projects ({}):", projects.len())?;
    for project in projects {
        let star = if project.featured { " *" } else { "" };
        writeln!(
            out,
            "  {:<10} {}{} [{}]{}",
            display_date(&project.date),
            project.title,
            star,
            project.slug,
            format_tags(&project.tags)
        )?;
    }
    Ok(out)
}

fn display_date(date: &str) -> &str {
    if date.is_empty() {
        "-"
    } else {
        date
    }
}

fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        String::new()
    } else {
        format!(" #{}", tags.join(" #"))
    }
}
