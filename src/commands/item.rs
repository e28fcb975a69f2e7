//! Item commands - add, edit, remove and show database entries

use super::item_path;
use crate::db::{Item, ItemType, TagDatabase};
use crate::tags::parse_tag_args;
use crate::{TagviewError, output};
use dialoguer::Confirm;
use std::collections::BTreeSet;
use std::path::Path;

type Result<T> = std::result::Result<T, TagviewError>;

/// Changes requested by the edit command
#[derive(Debug, Clone, Default)]
pub struct EditChanges {
    /// Replacement tag set
    pub tags: Option<BTreeSet<String>>,
    pub add_tags: BTreeSet<String>,
    pub remove_tags: BTreeSet<String>,
    pub favorite: Option<bool>,
    pub item_type: Option<ItemType>,
}

impl EditChanges {
    /// Build changes from raw command-line values
    #[must_use]
    pub fn from_args(
        tags: &[String],
        add_tags: &[String],
        remove_tags: &[String],
        favorite: bool,
        no_favorite: bool,
        item_type: Option<ItemType>,
    ) -> Self {
        let favorite = match (favorite, no_favorite) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        };

        Self {
            tags: (!tags.is_empty()).then(|| parse_tag_args(tags)),
            add_tags: parse_tag_args(add_tags),
            remove_tags: parse_tag_args(remove_tags),
            favorite,
            item_type,
        }
    }

    /// Apply the changes to a copy of `item`
    #[must_use]
    pub fn apply(&self, item: &Item) -> Item {
        let mut edited = item.clone();
        if let Some(tags) = &self.tags {
            edited.set_tags(tags.clone());
        }
        for tag in &self.add_tags {
            edited.add_tag(tag.clone());
        }
        for tag in &self.remove_tags {
            edited.remove_tag(tag);
        }
        if let Some(favorite) = self.favorite {
            edited.set_favorite(favorite);
        }
        if let Some(item_type) = self.item_type {
            edited.set_type(item_type);
        }
        edited
    }
}

/// Execute the add command - store a file with its tags
///
/// # Errors
/// Returns an error if the file does not exist, lies outside the database directory,
/// no tags are given, or the database cannot be written
pub fn add(
    db: &mut TagDatabase,
    file: &Path,
    tags: &[String],
    favorite: bool,
    item_type: Option<ItemType>,
    quiet: bool,
) -> Result<()> {
    if !file.exists() {
        return Err(TagviewError::InvalidInput(format!(
            "Cannot access path '{}'",
            file.display()
        )));
    }

    let tags = parse_tag_args(tags);
    if tags.is_empty() {
        return Err(TagviewError::InvalidInput("No tags provided".into()));
    }

    let path = item_path(db, file)?;
    let relative = db.relative_path(&path);
    let item_type = item_type.unwrap_or_else(|| ItemType::from_extension(file));

    let item = Item::with_tags(relative, item_type, tags, favorite);
    let summary = item.tags.iter().cloned().collect::<Vec<_>>().join(", ");
    db.add_item(item)?;

    output::success(&format!("Added {} with: {summary}", file.display()), quiet);
    Ok(())
}

/// Execute the edit command - change an existing entry
///
/// # Errors
/// Returns an error if the file is not in the database, the edit would leave it without
/// tags, or the database cannot be written
pub fn edit(db: &mut TagDatabase, file: &Path, changes: &EditChanges, quiet: bool) -> Result<()> {
    let path = item_path(db, file)?;
    let edited = changes.apply(db.get_item(&path)?);

    if edited.tags.is_empty() {
        return Err(TagviewError::InvalidInput(format!(
            "Editing '{}' would remove all of its tags; use 'rm' instead",
            file.display()
        )));
    }

    db.edit_item(&edited)?;
    output::success(&format!("Updated {}", file.display()), quiet);
    Ok(())
}

/// Execute the remove command - drop an entry and optionally the file
///
/// Deleting the file asks for confirmation unless `yes` or `quiet` is set.
///
/// # Errors
/// Returns an error if the file is not in the database, the prompt fails, or the
/// database cannot be written
pub fn remove(
    db: &mut TagDatabase,
    file: &Path,
    delete_file: bool,
    yes: bool,
    quiet: bool,
) -> Result<()> {
    let path = item_path(db, file)?;
    let absolute = db.absolute_path(db.get_item(&path)?);

    if delete_file && !yes && !quiet {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} from disk?", absolute.display()))
            .default(false)
            .interact()?;
        if !confirmed {
            output::success("Aborted", quiet);
            return Ok(());
        }
    }

    db.delete_item(&path, delete_file)?;
    output::success(&format!("Removed {} from the database", file.display()), quiet);

    if delete_file && absolute.exists() {
        output::warning(&format!("Could not delete {}", absolute.display()));
    }
    Ok(())
}

/// Execute the show command - print one entry
///
/// # Errors
/// Returns an error if the file is not in the database or JSON output fails
pub fn show(db: &TagDatabase, file: &Path, json: bool, quiet: bool) -> Result<()> {
    let path = item_path(db, file)?;
    let item = db.get_item(&path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", output::item_with_tags(&db.absolute_path(item), item, quiet));
    }
    Ok(())
}
