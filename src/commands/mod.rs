//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and executes the operation against the database.

pub mod init;
pub mod item;
pub mod query;
pub mod settings;
pub mod suggest;
pub mod tags;

// Re-export execute functions for convenience
pub use init::execute as init;
pub use query::execute as query;
pub use suggest::execute as suggest;
pub use tags::execute as tags;

use crate::TagviewError;
use crate::db::TagDatabase;
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, TagviewError>;

/// Canonical directory the database's relative paths are resolved against
fn database_root(db: &TagDatabase) -> Result<PathBuf> {
    let prefix = db.get_prefix();
    let prefix = if prefix.as_os_str().is_empty() { Path::new(".") } else { prefix };
    prefix.canonicalize().map_err(|e| {
        TagviewError::InvalidInput(format!(
            "Cannot access database directory '{}': {e}",
            prefix.display()
        ))
    })
}

/// Make a user-supplied path absolute, resolving symlinks when the file exists
fn absolutize(file: &Path) -> Result<PathBuf> {
    if let Ok(canonical) = file.canonicalize() {
        return Ok(canonical);
    }
    if file.is_absolute() {
        Ok(file.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(file))
    }
}

/// Translate a user-supplied path into the prefixed form the database expects
///
/// # Errors
/// Returns `TagviewError::InvalidInput` if the file lies outside the database directory.
pub fn item_path(db: &TagDatabase, file: &Path) -> Result<PathBuf> {
    let root = database_root(db)?;
    let absolute = absolutize(file)?;
    let relative = absolute.strip_prefix(&root).map_err(|_| {
        TagviewError::InvalidInput(format!(
            "'{}' is not inside the database directory '{}'",
            file.display(),
            root.display()
        ))
    })?;
    Ok(db.get_prefix().join(relative))
}
