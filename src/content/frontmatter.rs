//! Front-matter parsing

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;

/// Front-matter delimiter line
const DELIMITER: &str = "---";

/// A single front-matter value.
///
/// Everything is a string except sequences; numbers and booleans are kept
/// in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    List(Vec<String>),
}

/// Key/value pairs from a front-matter block, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: IndexMap<String, MetaValue>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, keeping `tags` a list whatever encoding it came in
    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        let key = key.into();
        let value = match value {
            MetaValue::Text(text) if key == "tags" => MetaValue::List(split_tag_list(&text)),
            other => other,
        };
        self.fields.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.fields.get(key)
    }

    /// Scalar value for `key`; `None` when absent or a list
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.fields.get(key)? {
            MetaValue::Text(text) => Some(text),
            MetaValue::List(_) => None,
        }
    }

    /// List value for `key`; `None` when absent or a scalar
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.fields.get(key)? {
            MetaValue::List(items) => Some(items),
            MetaValue::Text(_) => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize back into a delimited block, closing delimiter included.
    ///
    /// Feeding the result to [`parse`] yields the same pairs.
    pub fn to_front_matter(&self) -> String {
        if self.fields.is_empty() {
            return format!("{DELIMITER}\n{DELIMITER}\n");
        }
        // A map of strings and string lists always serializes
        let yaml = serde_yaml::to_string(&self.fields).unwrap_or_default();
        format!("{DELIMITER}\n{yaml}{DELIMITER}\n")
    }

    fn from_mapping(mapping: serde_yaml::Mapping) -> Self {
        let mut metadata = Metadata::new();

        for (key, value) in mapping {
            let Some(key) = scalar_to_string(&key) else {
                tracing::debug!("Skipping front-matter entry with non-scalar key");
                continue;
            };

            let value = match value {
                Value::Null => continue,
                Value::Sequence(items) => {
                    MetaValue::List(items.iter().filter_map(scalar_to_string).collect())
                }
                Value::Mapping(_) => {
                    tracing::debug!("Skipping nested front-matter mapping: {}", key);
                    continue;
                }
                other => match scalar_to_string(&other) {
                    Some(text) => MetaValue::Text(text),
                    None => continue,
                },
            };

            metadata.insert(key, value);
        }

        metadata
    }
}

/// Split `input` into its front-matter and body.
///
/// A missing, unterminated or unparsable block is not an error: the result
/// is empty metadata and the whole input as body.
pub fn parse(input: &str) -> (Metadata, &str) {
    let content = input.strip_prefix('\u{feff}').unwrap_or(input);

    let Some((block, body)) = split_block(content) else {
        return (Metadata::default(), input);
    };

    if block.trim().is_empty() {
        return (Metadata::default(), body);
    }

    match serde_yaml::from_str::<Value>(block) {
        Ok(Value::Mapping(mapping)) => (Metadata::from_mapping(mapping), body),
        Ok(_) => {
            tracing::warn!("Front-matter is not a key/value mapping, treating as content");
            (Metadata::default(), input)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse YAML front-matter, treating as content: {}",
                e
            );
            (Metadata::default(), input)
        }
    }
}

/// Locate the block between an opening `---` first line and the next `---` line
fn split_block(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let body_start = offset + line.len();
            return Some((&content[block_start..offset], &content[body_start..]));
        }
        offset += line.len();
    }

    None
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}

/// Accepts `[a, "b"]` as well as `a, b`
pub(crate) fn split_tag_list(text: &str) -> Vec<String> {
    let text = text.trim();
    let inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(text);

    inner
        .split(',')
        .map(|tag| tag.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
tags:
  - rust
  - robotics
excerpt: A first post
---

This is the content.
"#;

        let (meta, body) = parse(content);
        assert_eq!(meta.text("title"), Some("Hello World"));
        assert_eq!(meta.text("date"), Some("2024-01-15"));
        assert_eq!(meta.list("tags").unwrap(), ["rust", "robotics"]);
        assert_eq!(body, "\nThis is the content.\n");
    }

    #[test]
    fn test_inline_and_comma_tags() {
        let (meta, _) = parse("---\ntags: [ai, robotics]\n---\n");
        assert_eq!(meta.list("tags").unwrap(), ["ai", "robotics"]);

        let (meta, _) = parse("---\ntags: ai, robotics , ml\n---\n");
        assert_eq!(meta.list("tags").unwrap(), ["ai", "robotics", "ml"]);

        let (meta, _) = parse("---\ntags: '[\"ai\", \"ml\"]'\n---\n");
        assert_eq!(meta.list("tags").unwrap(), ["ai", "ml"]);
    }

    #[test]
    fn test_scalars_become_text() {
        let (meta, _) = parse("---\nyear: 2024\nfeatured: true\ntitle:\n---\nbody");
        assert_eq!(meta.text("year"), Some("2024"));
        assert_eq!(meta.text("featured"), Some("true"));
        // Null values count as absent
        assert!(!meta.contains_key("title"));
    }

    #[test]
    fn test_url_values_keep_colons() {
        let (meta, _) = parse("---\ngithub: https://github.com/someone/repo\n---\n");
        assert_eq!(meta.text("github"), Some("https://github.com/someone/repo"));
    }

    #[test]
    fn test_no_frontmatter_is_all_body() {
        let content = "# Just markdown\n\nNo metadata here.";
        let (meta, body) = parse(content);
        assert!(meta.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unterminated_block_is_all_body() {
        let content = "---\ntitle: Oops\n\nNever closed.";
        let (meta, body) = parse(content);
        assert!(meta.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_invalid_yaml_is_all_body() {
        let content = "---\ntitle: Broken: value\n  - nope\n---\nbody";
        let (meta, body) = parse(content);
        assert!(meta.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_non_mapping_block_is_all_body() {
        let content = "---\n- just\n- a list\n---\nbody";
        let (meta, body) = parse(content);
        assert!(meta.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_block() {
        let (meta, body) = parse("---\n---\nbody text");
        assert!(meta.is_empty());
        assert_eq!(body, "body text");
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\ntitle: Windows\r\n---\r\nLine one\r\n";
        let (meta, body) = parse(content);
        assert_eq!(meta.text("title"), Some("Windows"));
        assert_eq!(body, "Line one\r\n");
    }

    #[test]
    fn test_horizontal_rule_later_in_body() {
        let (meta, body) = parse("---\ntitle: Rules\n---\nabove\n\n---\n\nbelow\n");
        assert_eq!(meta.text("title"), Some("Rules"));
        assert_eq!(body, "above\n\n---\n\nbelow\n");
    }

    #[test]
    fn test_metadata_survives_reserialization() {
        let content = r#"---
title: "Robots: a love story"
date: 2024-06-01
tags: [ai, robotics]
github: https://github.com/someone/bot
featured: "true"
---
Body
"#;
        let (meta, _) = parse(content);
        let block = meta.to_front_matter();
        let (reparsed, body) = parse(&block);

        assert_eq!(reparsed, meta);
        assert_eq!(body, "");
        let keys: Vec<_> = reparsed.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["title", "date", "tags", "github", "featured"]);
    }

    #[test]
    fn test_insert_normalizes_text_tags() {
        let mut meta = Metadata::new();
        meta.insert("tags", MetaValue::Text("a, b".to_string()));
        assert_eq!(meta.list("tags").unwrap(), ["a", "b"]);
        assert_eq!(meta.text("tags"), None);
    }
}
