//! Tags command - list known tags

use crate::db::TagDatabase;
use crate::tags::completions;
use crate::{TagviewError, output};

type Result<T> = std::result::Result<T, TagviewError>;

/// Known tags with usage counts, optionally restricted to those completing `filter`
#[must_use]
pub fn list_tags(db: &TagDatabase, filter: Option<&str>) -> Vec<(String, usize)> {
    let counts = db.tag_counts();
    let Some(key) = filter else {
        return counts.into_iter().collect();
    };

    let matching = completions(key, counts.keys());
    matching
        .into_iter()
        .filter_map(|tag| counts.get(tag).map(|count| (tag.clone(), *count)))
        .collect()
}

/// Execute the tags command
///
/// # Errors
/// Returns an error if JSON output fails
pub fn execute(db: &TagDatabase, filter: Option<&str>, json: bool, quiet: bool) -> Result<()> {
    let tags = list_tags(db, filter);

    if json {
        let map: serde_json::Map<String, serde_json::Value> = tags
            .into_iter()
            .map(|(tag, count)| (tag, serde_json::Value::from(count)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    if tags.is_empty() {
        if !quiet {
            println!("No tags found in database.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Tags in database:");
    }
    for (tag, count) in &tags {
        println!("{}", output::tag_with_count(tag, *count, quiet));
    }
    Ok(())
}
