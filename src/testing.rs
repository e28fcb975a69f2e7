//! Testing utilities for tagview
//!
//! This module provides helper types for writing tests, most importantly a `TestDb`
//! wrapper that owns a freshly created database inside a temporary directory.
//!
//! Only available when compiled with `cfg(test)`.

use crate::db::TagDatabase;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// File name used for test databases inside their temporary directory
pub const TEST_DB_NAME: &str = "tags.tv";

/// A database created in its own temporary directory
///
/// The directory, the database file and anything written next to it are removed when
/// the wrapper goes out of scope.
pub struct TestDb {
    dir: TempDir,
    path: PathBuf,
    db: TagDatabase,
}

impl TestDb {
    /// Create and load an empty database
    ///
    /// # Panics
    /// Panics if the temporary directory or the database file cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join(TEST_DB_NAME);
        TagDatabase::create_database(&path).expect("Failed to create test database");
        let db = TagDatabase::open(&path).expect("Failed to open test database");

        Self { dir, path, db }
    }

    /// Create a database file from raw text without loading it
    ///
    /// # Panics
    /// Panics if the temporary directory or the file cannot be written.
    #[must_use]
    pub fn raw(text: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join(TEST_DB_NAME);
        fs::write(&path, text).expect("Failed to write database text");
        (dir, path)
    }

    #[must_use]
    pub const fn db(&self) -> &TagDatabase {
        &self.db
    }

    pub const fn db_mut(&mut self) -> &mut TagDatabase {
        &mut self.db
    }

    /// Path of the database file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the database file (the database prefix)
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file relative to the database directory and return its absolute path
    ///
    /// # Panics
    /// Panics if the file or its parent directories cannot be created.
    pub fn touch(&self, relative: &str) -> PathBuf {
        let path = self.dir().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&path, b"test content").expect("Failed to write test file");
        path
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_basic() {
        let test_db = TestDb::new();
        assert!(test_db.db().is_empty());
        assert!(test_db.path().exists());
        assert_eq!(test_db.path().parent(), Some(test_db.dir()));
    }

    #[test]
    fn test_db_cleanup() {
        let dir;
        {
            let test_db = TestDb::new();
            dir = test_db.dir().to_path_buf();
            assert!(dir.exists());
        }
        assert!(!dir.exists());
    }

    #[test]
    fn test_touch_creates_nested_file() {
        let test_db = TestDb::new();
        let path = test_db.touch("nested/dir/file.jpg");
        assert!(path.exists());
        assert_eq!(fs::read_to_string(path).unwrap(), "test content");
    }

    #[test]
    fn test_raw_writes_text() {
        let (_dir, path) = TestDb::raw("hello\n");
        assert_eq!(fs::read_to_string(path).unwrap(), "hello\n");
    }
}
