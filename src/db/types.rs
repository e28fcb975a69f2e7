//! Item types stored in the tag database
//!
//! An [`Item`] is one tagged file record. Its path is stored relative to the directory
//! that holds the database file (the database prefix), which keeps a database portable
//! together with the files it describes.
//!
//! # Ordering
//!
//! Items order favorites first and break ties by path, which is the order query results
//! are presented in. Storage order is independent of this ordering.
//!
//! # Examples
//!
//! ```
//! use tagview::db::{Item, ItemType};
//!
//! let mut item = Item::new("cats/tom.jpg", ItemType::Image);
//! item.add_tag("animal");
//! item.add_tag("cute");
//! assert!(item.is_tagged("cute"));
//! ```

use super::error::DbError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

/// File extensions recognized as video when guessing an item's type
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mkv", "mov", "avi", "m4v", "wmv", "flv"];

/// Kind of media an item refers to
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Image,
    Video,
}

impl ItemType {
    /// Keyword used for this type in the database file
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Guess the type of a file from its extension
    ///
    /// Known video extensions map to [`ItemType::Video`], anything else is treated as an
    /// image.
    #[must_use]
    pub fn from_extension(path: &Path) -> Self {
        let is_video = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                VIDEO_EXTENSIONS
                    .iter()
                    .any(|video| ext.eq_ignore_ascii_case(video))
            });

        if is_video { Self::Video } else { Self::Image }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(DbError::InvalidInput(format!("Unknown item type '{other}'"))),
        }
    }
}

/// One tagged file record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Path relative to the database prefix; unique within a database
    pub file_path: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub tags: BTreeSet<String>,
    pub favorite: bool,
}

impl Item {
    /// Create an untagged, non-favorite item
    pub fn new(file_path: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            file_path: file_path.into(),
            item_type,
            tags: BTreeSet::new(),
            favorite: false,
        }
    }

    /// Create an item with all fields given
    pub fn with_tags<I, S>(
        file_path: impl Into<String>,
        item_type: ItemType,
        tags: I,
        favorite: bool,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            file_path: file_path.into(),
            item_type,
            tags: tags.into_iter().map(Into::into).collect(),
            favorite,
        }
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.remove(tag);
    }

    pub fn set_tags(&mut self, tags: BTreeSet<String>) {
        self.tags = tags;
    }

    #[must_use]
    pub fn is_tagged(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// True if the item carries at least one of `tags`
    ///
    /// An empty `tags` set never matches.
    #[must_use]
    pub fn is_tagged_any(&self, tags: &BTreeSet<String>) -> bool {
        // iterate the smaller set
        if tags.len() < self.tags.len() {
            tags.iter().any(|tag| self.tags.contains(tag))
        } else {
            self.tags.iter().any(|tag| tags.contains(tag))
        }
    }

    pub fn set_favorite(&mut self, favorite: bool) {
        self.favorite = favorite;
    }

    pub fn set_type(&mut self, item_type: ItemType) {
        self.item_type = item_type;
    }

    /// Check that the item can be written to the line format without corrupting it
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` if the path is empty, spans lines, is absolute or
    /// climbs out of the database directory with `..`, or if a tag is blank, contains the
    /// tag separator, or spans lines.
    pub fn validate(&self) -> Result<(), DbError> {
        if self.file_path.is_empty() {
            return Err(DbError::InvalidInput("Item path is empty".into()));
        }
        if self.file_path.contains(['\n', '\r']) {
            return Err(DbError::InvalidInput(format!(
                "Item path '{}' contains a line break",
                self.file_path.escape_debug()
            )));
        }
        let path = Path::new(&self.file_path);
        if path.is_absolute() || path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(DbError::InvalidInput(format!(
                "Item path '{}' must be relative to the database directory",
                self.file_path
            )));
        }
        for tag in &self.tags {
            validate_tag(tag)?;
        }
        Ok(())
    }
}

/// Check that a single tag can be stored in a comma-separated tag list
///
/// # Errors
///
/// Returns `DbError::InvalidInput` for blank tags and tags containing `,` or a line break.
pub fn validate_tag(tag: &str) -> Result<(), DbError> {
    if tag.trim().is_empty() {
        return Err(DbError::InvalidInput("Tag is empty".into()));
    }
    if tag.contains([',', '\n', '\r']) {
        return Err(DbError::InvalidInput(format!(
            "Tag '{}' contains ',' or a line break",
            tag.escape_debug()
        )));
    }
    if tag.trim() != tag {
        return Err(DbError::InvalidInput(format!(
            "Tag '{tag}' has surrounding whitespace"
        )));
    }
    Ok(())
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .favorite
            .cmp(&self.favorite)
            .then_with(|| self.file_path.cmp(&other.file_path))
            .then_with(|| self.item_type.cmp(&other.item_type))
            .then_with(|| self.tags.cmp(&other.tags))
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
