//! Tag text handling for user input
//!
//! Tags typed by a user are trimmed before use. Blank input and input containing the
//! tag separator are refused as a single tag; command-line arguments may however list
//! several tags separated by commas.

use crate::db::format::TAG_SEPARATOR;
use std::collections::BTreeSet;

/// Normalize a single user-entered tag
///
/// Returns `None` for blank text or text containing a comma.
#[must_use]
pub fn normalize_tag(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains(TAG_SEPARATOR) || trimmed.contains(['\n', '\r']) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Collect tags from command-line arguments
///
/// Each argument may hold one tag or several comma-separated tags. Blank entries are
/// skipped.
///
/// # Examples
/// ```
/// use tagview::tags::parse_tag_args;
///
/// let tags = parse_tag_args(&["cat, cute".to_string(), "animal".to_string()]);
/// assert_eq!(tags.len(), 3);
/// ```
#[must_use]
pub fn parse_tag_args<S: AsRef<str>>(args: &[S]) -> BTreeSet<String> {
    args.iter()
        .flat_map(|arg| arg.as_ref().split(TAG_SEPARATOR))
        .filter_map(normalize_tag)
        .collect()
}

/// Whether `tag` completes `key` (case-insensitive substring match)
#[must_use]
pub fn completes(key: &str, tag: &str) -> bool {
    tag.to_lowercase().contains(&key.to_lowercase())
}

/// Tags completing `key`, in the order given
pub fn completions<'a, I>(key: &str, tags: I) -> Vec<&'a String>
where
    I: IntoIterator<Item = &'a String>,
{
    tags.into_iter().filter(|tag| completes(key, tag)).collect()
}
