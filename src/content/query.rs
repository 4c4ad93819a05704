//! Tag indexes and tag filters over loaded collections

use std::collections::BTreeSet;

use super::record::{Post, Project, Record};

/// Tag-index entry meaning "no filter"; not a real tag
pub const ALL_TAGS: &str = "All";

/// Distinct tags across `records`, sorted by ordinal comparison
pub fn collect_tags<R: Record>(records: &[R]) -> Vec<String> {
    let tags: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.tags().iter().map(String::as_str))
        .collect();
    tags.into_iter().map(str::to_string).collect()
}

/// Tag index for the posts list, led by [`ALL_TAGS`]
pub fn post_tags(posts: &[Post]) -> Vec<String> {
    let mut tags = vec![ALL_TAGS.to_string()];
    tags.extend(collect_tags(posts).into_iter().filter(|tag| tag != ALL_TAGS));
    tags
}

/// Tag index for the projects list
pub fn project_tags(projects: &[Project]) -> Vec<String> {
    collect_tags(projects)
}

/// Records carrying `tag`. [`ALL_TAGS`] selects everything.
pub fn filter_by_tag<'a, R: Record>(records: &'a [R], tag: &str) -> Vec<&'a R> {
    if tag == ALL_TAGS {
        return records.iter().collect();
    }
    records.iter().filter(|record| record.has_tag(tag)).collect()
}

/// Records carrying every tag in `tags`. An empty filter selects everything.
pub fn filter_by_tags<'a, R, S>(records: &'a [R], tags: &[S]) -> Vec<&'a R>
where
    R: Record,
    S: AsRef<str>,
{
    records
        .iter()
        .filter(|record| tags.iter().all(|tag| record.has_tag(tag.as_ref())))
        .collect()
}

/// Projects flagged `featured`, in collection order
pub fn featured(projects: &[Project]) -> Vec<&Project> {
    projects.iter().filter(|project| project.featured).collect()
}
