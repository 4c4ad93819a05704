//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::config::HighlightConfig;

/// Renders record bodies to HTML for detail views
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::from_config(&HighlightConfig::default())
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.theme.clone(),
            line_numbers: config.line_number,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        // Front-matter is already stripped, so no metadata block option
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        // Some(lang) while inside a code block
        let mut code_block: Option<Option<String>> = None;
        let mut code = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some(lang);
                    code.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let lang = code_block.take().flatten();
                    let highlighted = self.highlight_code(&code, lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                }
                Event::Text(text) if code_block.is_some() => code.push_str(&text),
                Event::Start(Tag::Link {
                    dest_url, title, ..
                }) if is_external(&dest_url) => {
                    let mut anchor = format!(r#"<a href="{}""#, html_escape(&dest_url));
                    if !title.is_empty() {
                        anchor.push_str(&format!(r#" title="{}""#, html_escape(&title)));
                    }
                    anchor.push_str(r#" target="_blank" rel="noopener noreferrer">"#);
                    events.push(Event::Html(CowStr::from(anchor)));
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let lang = html_escape(lang);
        let lines = self
            .theme()
            .and_then(|theme| self.highlight_lines(code, syntax, theme));

        match lines {
            Some(lines) if self.line_numbers => add_line_numbers(&lines, &lang),
            Some(lines) => format!(
                r#"<figure class="highlight {}"><pre>{}</pre></figure>"#,
                lang,
                lines.join("\n")
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }

    /// One HTML fragment per source line, line endings stripped
    fn highlight_lines(
        &self,
        code: &str,
        syntax: &SyntaxReference,
        theme: &Theme,
    ) -> Option<Vec<String>> {
        let mut highlighter = HighlightLines::new(syntax, theme);
        LinesWithEndings::from(code)
            .map(|line| {
                let ranges = highlighter.highlight_line(line, &self.syntax_set).ok()?;
                let html = styled_line_to_highlighted_html(&ranges, IncludeBackground::No).ok()?;
                Some(html.replace(['\n', '\r'], ""))
            })
            .collect()
    }
}

/// Wrap highlighted lines in a table with a line-number gutter
fn add_line_numbers(lines: &[String], lang: &str) -> String {
    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
        lang,
        gutter,
        lines.join("\n")
    )
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
