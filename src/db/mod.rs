//! Tag database module for tagview
//!
//! Provides a clean API for storing and querying tagged image and video files
//! in a single flat text file.
//!
//! The whole database lives in memory:
//! - `items`: tagged file records, in file order
//! - `directories`: subdirectories of the database root that files may live in
//! - `default_excluded_tags`: tags a front-end excludes from queries unless asked not to
//!
//! Every mutation writes the complete database back to its file before returning.
//! Item paths are stored relative to the directory holding the database file (the
//! prefix); query results and lookups work with prefixed paths.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub mod error;
pub mod format;
pub mod query;
pub mod types;

pub use error::DbError;
pub use query::TagQuery;
pub use types::{Item, ItemType};

/// In-memory tag database backed by a flat file
#[derive(Debug, Default)]
pub struct TagDatabase {
    items: Vec<Item>,
    directories: BTreeSet<String>,
    default_excluded_tags: BTreeSet<String>,
    prefix: PathBuf,
    source_path: Option<PathBuf>,
}

impl TagDatabase {
    /// Create an empty database that is not backed by any file yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a database from an existing file
    ///
    /// # Examples
    /// ```no_run
    /// use tagview::db::TagDatabase;
    /// let db = TagDatabase::open("/home/me/Pictures/tags.tv").unwrap();
    /// println!("{} items", db.len());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError::FileAccess` if the file cannot be read and `DbError::Parse` if
    /// it is not a valid database file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let mut db = Self::new();
        db.load_from_file(path)?;
        Ok(db)
    }

    /// Write a new, empty database file at `path`
    ///
    /// The file is not loaded; call [`TagDatabase::load_from_file`] or
    /// [`TagDatabase::open`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns `DbError::FileAccess` if the file cannot be created or written.
    pub fn create_database<P: AsRef<Path>>(path: P) -> Result<(), DbError> {
        let path = path.as_ref();
        write_contents(path, &BTreeSet::new(), &BTreeSet::new(), &[])?;
        tracing::info!(path = %path.display(), "created database");
        Ok(())
    }

    /// Replace all in-memory state with the contents of the file at `path`
    ///
    /// The prefix becomes the directory containing the file. If loading fails, the
    /// previously loaded state is kept.
    ///
    /// # Errors
    ///
    /// Returns `DbError::FileAccess` if the file cannot be read and `DbError::Parse`
    /// carrying the offending line number if the file is malformed.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), DbError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| DbError::file_access(path, e))?;
        let contents = format::parse_bytes(&bytes)?;

        self.items = contents.items;
        self.directories = contents.directories;
        self.default_excluded_tags = contents.default_excluded_tags;
        self.prefix = path.parent().map(Path::to_path_buf).unwrap_or_default();
        self.source_path = Some(path.to_path_buf());

        tracing::debug!(path = %path.display(), items = self.items.len(), "loaded database");
        Ok(())
    }

    /// Write the complete database back to the file it was loaded from
    ///
    /// Items without tags are not written.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotLoaded` if no file was loaded and `DbError::FileAccess` if the
    /// file cannot be written.
    pub fn write_to_file(&self) -> Result<(), DbError> {
        let path = self.source_path.as_deref().ok_or(DbError::NotLoaded)?;
        write_contents(
            path,
            &self.directories,
            &self.default_excluded_tags,
            &self.items,
        )?;
        tracing::debug!(path = %path.display(), items = self.items.len(), "wrote database");
        Ok(())
    }

    /// Insert an item, replacing any item with the same path
    ///
    /// A replaced item moves to the end of the storage order. The referenced file is not
    /// checked for existence.
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` if the item cannot be stored in the file format,
    /// otherwise any error from [`TagDatabase::write_to_file`].
    pub fn add_item(&mut self, item: Item) -> Result<(), DbError> {
        item.validate()?;
        self.items.retain(|existing| existing.file_path != item.file_path);
        self.items.push(item);
        self.write_to_file()
    }

    /// Overwrite the type, tags and favorite flag of the item with the same path
    ///
    /// # Errors
    ///
    /// Returns `DbError::ItemNotFound` if no item has that path, `DbError::InvalidInput`
    /// for unstorable tags, otherwise any error from [`TagDatabase::write_to_file`].
    pub fn edit_item(&mut self, item: &Item) -> Result<(), DbError> {
        item.validate()?;
        let existing = self
            .items
            .iter_mut()
            .find(|existing| existing.file_path == item.file_path)
            .ok_or_else(|| DbError::ItemNotFound(item.file_path.clone()))?;

        existing.favorite = item.favorite;
        existing.tags.clone_from(&item.tags);
        existing.item_type = item.item_type;

        self.write_to_file()
    }

    /// Remove the item at the prefixed `file_path`
    ///
    /// With `delete_file`, the file itself is removed as well. Failing to remove the file
    /// is logged and otherwise ignored; the record stays deleted.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ItemNotFound` if no item has that path, otherwise any error from
    /// [`TagDatabase::write_to_file`].
    pub fn delete_item<P: AsRef<Path>>(
        &mut self,
        file_path: P,
        delete_file: bool,
    ) -> Result<(), DbError> {
        let relative = self.relative_path(file_path.as_ref());
        let idx = self
            .items
            .iter()
            .position(|item| item.file_path == relative)
            .ok_or_else(|| DbError::ItemNotFound(relative.clone()))?;

        let removed = self.items.remove(idx);
        self.write_to_file()?;

        if delete_file {
            let absolute = self.absolute_path(&removed);
            if let Err(e) = fs::remove_file(&absolute) {
                tracing::warn!(path = %absolute.display(), error = %e, "could not delete file");
            }
        }
        Ok(())
    }

    /// Replace the set of recognized directories
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` for empty directory names and names that span lines,
    /// otherwise any error from [`TagDatabase::write_to_file`].
    pub fn set_directories(&mut self, directories: BTreeSet<String>) -> Result<(), DbError> {
        if directories.contains("") {
            return Err(DbError::InvalidInput("Directory name is empty".into()));
        }
        if let Some(bad) = directories.iter().find(|dir| dir.contains(['\n', '\r'])) {
            return Err(DbError::InvalidInput(format!(
                "Directory '{}' contains a line break",
                bad.escape_debug()
            )));
        }
        self.directories = directories;
        self.write_to_file()
    }

    /// Replace the set of tags excluded from queries by default
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` for unstorable tags, otherwise any error from
    /// [`TagDatabase::write_to_file`].
    pub fn set_default_excluded_tags(&mut self, tags: BTreeSet<String>) -> Result<(), DbError> {
        for tag in &tags {
            types::validate_tag(tag)?;
        }
        self.default_excluded_tags = tags;
        self.write_to_file()
    }

    /// All tags used by any item, sorted
    #[must_use]
    pub fn get_all_tags(&self) -> BTreeSet<String> {
        self.items
            .iter()
            .flat_map(|item| item.tags.iter().cloned())
            .collect()
    }

    /// Number of items carrying each tag
    #[must_use]
    pub fn tag_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for tag in self.items.iter().flat_map(|item| &item.tags) {
            *counts.entry(tag.clone()).or_default() += 1;
        }
        counts
    }

    #[must_use]
    pub const fn get_directories(&self) -> &BTreeSet<String> {
        &self.directories
    }

    #[must_use]
    pub const fn get_default_excluded_tags(&self) -> &BTreeSet<String> {
        &self.default_excluded_tags
    }

    /// Directory containing the database file
    #[must_use]
    pub fn get_prefix(&self) -> &Path {
        &self.prefix
    }

    /// Path of the file the database was loaded from
    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Tags of the item at the prefixed `file_path`
    ///
    /// # Errors
    ///
    /// Returns `DbError::ItemNotFound` if no item has that path.
    pub fn get_tags_for_item<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> Result<&BTreeSet<String>, DbError> {
        self.get_item(file_path).map(|item| &item.tags)
    }

    /// The item at the prefixed `file_path`
    ///
    /// # Errors
    ///
    /// Returns `DbError::ItemNotFound` if no item has that path.
    pub fn get_item<P: AsRef<Path>>(&self, file_path: P) -> Result<&Item, DbError> {
        let relative = self.relative_path(file_path.as_ref());
        self.items
            .iter()
            .find(|item| item.file_path == relative)
            .ok_or(DbError::ItemNotFound(relative))
    }

    /// Prefixed paths of items tagged with any of `tags_include` and none of `tags_exclude`
    ///
    /// Favorites come first, then paths in ascending order. An empty include set
    /// matches nothing.
    #[must_use]
    pub fn query(
        &self,
        tags_include: &BTreeSet<String>,
        tags_exclude: &BTreeSet<String>,
    ) -> Vec<PathBuf> {
        let query = TagQuery::new(tags_include.clone(), tags_exclude.clone());
        self.run_query(&query)
    }

    /// Same as [`TagDatabase::query`], taking both operands as one value
    #[must_use]
    pub fn run_query(&self, query: &TagQuery) -> Vec<PathBuf> {
        query::matching_items(&self.items, query)
            .into_iter()
            .map(|item| self.absolute_path(item))
            .collect()
    }

    /// Tags found on items matching `tags_include`, most frequent first
    ///
    /// Items carrying a default-excluded tag are ignored. Equally frequent tags are
    /// ordered alphabetically.
    #[must_use]
    pub fn suggestions(&self, tags_include: &BTreeSet<String>) -> Vec<String> {
        let query =
            TagQuery::new(tags_include.clone(), BTreeSet::new()).with_default_excludes(self);
        query::rank_tags(&self.items, &query)
            .into_iter()
            .map(|(tag, _)| tag)
            .collect()
    }

    /// Items in storage order
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Prefixed path of an item
    #[must_use]
    pub fn absolute_path(&self, item: &Item) -> PathBuf {
        self.prefix.join(&item.file_path)
    }

    /// Strip the database prefix from `path`; paths outside the prefix are kept as given
    #[must_use]
    pub fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.prefix)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}

/// Serialize a database to `path`, replacing its contents
fn write_contents(
    path: &Path,
    directories: &BTreeSet<String>,
    default_excluded_tags: &BTreeSet<String>,
    items: &[Item],
) -> Result<(), DbError> {
    let file = fs::File::create(path).map_err(|e| DbError::file_access(path, e))?;
    let mut out = BufWriter::new(file);
    format::write(&mut out, directories, default_excluded_tags, items)
        .and_then(|()| out.flush())
        .map_err(|e| DbError::file_access(path, e))
}
