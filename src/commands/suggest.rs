//! Suggest command - recommend tags related to a selection

use crate::db::TagDatabase;
use crate::tags::parse_tag_args;
use crate::{TagviewError, output};

type Result<T> = std::result::Result<T, TagviewError>;

/// Suggestions for `tags`, leaving out the selected tags and keeping at most `limit`
#[must_use]
pub fn top_suggestions(db: &TagDatabase, tags: &[String], limit: usize) -> Vec<String> {
    let selected = parse_tag_args(tags);
    db.suggestions(&selected)
        .into_iter()
        .filter(|tag| !selected.contains(tag))
        .take(limit)
        .collect()
}

/// Execute the suggest command
///
/// # Errors
/// Returns an error if JSON output fails
pub fn execute(
    db: &TagDatabase,
    tags: &[String],
    limit: usize,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let suggestions = top_suggestions(db, tags, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        if !quiet {
            output::warning("No suggestions for this selection");
        }
        return Ok(());
    }

    if !quiet {
        println!("Suggested tags:");
    }
    for tag in &suggestions {
        if quiet {
            println!("{tag}");
        } else {
            println!("  {tag}");
        }
    }
    Ok(())
}
