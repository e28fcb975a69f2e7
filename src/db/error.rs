//! Database-specific error types
//!
//! This module defines all error types that can occur while loading, querying and
//! persisting a tag database.
//!
//! # Error Types
//!
//! - **`FileAccess`**: The database file could not be opened for reading or writing
//! - **`Parse`**: The database file violates the line format; carries the 1-based line
//! - **`ItemNotFound`**: A lookup, edit or delete referenced an unknown path
//! - **`NotLoaded`**: A write was attempted before any database file was loaded
//! - **`InvalidInput`**: A path or tag cannot be represented in the file format
//!
//! All errors implement `std::error::Error` via the `thiserror` crate.

use std::path::PathBuf;
use thiserror::Error;

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DbError {
    /// The database file could not be opened for the requested read or write
    #[error("Cannot access database file: {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The database file does not follow the expected line format
    #[error("Error while parsing database file at line {line}")]
    Parse { line: usize },

    /// No item with the given path exists in the database
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// No database file has been loaded or created yet
    #[error("No database file loaded")]
    NotLoaded,

    /// Invalid input provided (e.g., a tag containing the list separator)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DbError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Line number of a parse error, if this is one
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
