//! Tag set queries over database items
//!
//! Both operations use the same matching rule. An item is dropped if it carries any
//! excluded tag, and kept if it carries any included tag. Exclusion always wins, and an
//! empty include set matches nothing.

use super::TagDatabase;
use super::types::Item;
use std::collections::{BTreeSet, HashMap};

/// The two operands of a tag query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagQuery {
    pub include: BTreeSet<String>,
    pub exclude: BTreeSet<String>,
}

impl TagQuery {
    #[must_use]
    pub const fn new(include: BTreeSet<String>, exclude: BTreeSet<String>) -> Self {
        Self { include, exclude }
    }

    /// Build a query from any iterables of tags
    pub fn from_tags<I, E, S, T>(include: I, exclude: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    /// Add tags to the exclude set
    pub fn exclude_all<'a>(&mut self, tags: impl IntoIterator<Item = &'a String>) {
        self.exclude.extend(tags.into_iter().cloned());
    }

    /// This query with the database's default-excluded tags added to the exclude set
    #[must_use]
    pub fn with_default_excludes(mut self, db: &TagDatabase) -> Self {
        self.exclude_all(db.get_default_excluded_tags());
        self
    }

    /// Whether `item` passes this query
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        !item.is_tagged_any(&self.exclude) && item.is_tagged_any(&self.include)
    }
}

/// Items matching `query`, sorted favorites first and then by path
#[must_use]
pub fn matching_items<'a>(items: &'a [Item], query: &TagQuery) -> Vec<&'a Item> {
    let mut matches: Vec<&Item> = items.iter().filter(|item| query.matches(item)).collect();
    matches.sort();
    matches
}

/// Rank the tags of all items matching `query` by how many of them carry each tag
///
/// Returns every distinct tag found paired with its count, most frequent first. Tags with
/// equal counts are ordered alphabetically.
#[must_use]
pub fn rank_tags(items: &[Item], query: &TagQuery) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for item in items.iter().filter(|item| query.matches(item)) {
        for tag in &item.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    ranked.sort_by(|(tag_a, count_a), (tag_b, count_b)| {
        count_b.cmp(count_a).then_with(|| tag_a.cmp(tag_b))
    });
    ranked
}
