//! Show a single post or project

use anyhow::Result;
use std::fmt::Write;

use super::ContentKind;
use crate::content::{MarkdownRenderer, Post, Project};
use crate::Folio;

/// Print one record; `html` renders the body instead of printing markdown
pub fn run(folio: &Folio, kind: ContentKind, slug: &str, html: bool) -> Result<()> {
    let loader = folio.loader();
    let renderer = html.then(|| MarkdownRenderer::from_config(&folio.config.highlight));

    let output = match kind {
        ContentKind::Post => loader
            .get_post(slug)?
            .map(|post| format_post(&post, renderer.as_ref()))
            .transpose()?,
        ContentKind::Project => loader
            .get_project(slug)?
            .map(|project| format_project(&project, renderer.as_ref()))
            .transpose()?,
    };

    match output {
        Some(output) => {
            print!("{}", output);
            Ok(())
        }
        None => anyhow::bail!("No {} found for slug {:?}", kind.label(), slug),
    }
}

pub fn format_post(post: &Post, renderer: Option<&MarkdownRenderer>) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", post.title)?;
    if !post.date.is_empty() {
        writeln!(out, "Date: {}", post.date)?;
    }
    if !post.tags.is_empty() {
        writeln!(out, "Tags: {}", post.tags.join(", "))?;
    }
    if !post.excerpt.is_empty() {
        writeln!(out, "{}", post.excerpt)?;
    }
    out.push('\n');
    push_body(&mut out, post.content.as_deref().unwrap_or_default(), renderer)?;
    Ok(out)
}

pub fn format_project(project: &Project, renderer: Option<&MarkdownRenderer>) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", project.title)?;
    if !project.date.is_empty() {
        writeln!(out, "Date: {}", project.date)?;
    }
    if !project.tags.is_empty() {
        writeln!(out, "Tags: {}", project.tags.join(", "))?;
    }
    if !project.description.is_empty() {
        writeln!(out, "{}", project.description)?;
    }
    let links = [
        ("GitHub", &project.github),
        ("Website", &project.website),
        ("Paper", &project.paper),
    ];
    for (label, url) in links {
        if let Some(url) = url {
            writeln!(out, "{}: {}", label, url)?;
        }
    }
    out.push('\n');
    push_body(&mut out, &project.content, renderer)?;
    Ok(out)
}

fn push_body(out: &mut String, body: &str, renderer: Option<&MarkdownRenderer>) -> Result<()> {
    match renderer {
        Some(renderer) => out.push_str(&renderer.render(body)?),
        None => out.push_str(body),
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(())
}
