//! Init command - create a new database file

use crate::config::TagviewConfig;
use crate::db::TagDatabase;
use crate::{TagviewError, output};
use std::path::Path;

type Result<T> = std::result::Result<T, TagviewError>;

/// Execute the init command
///
/// Refuses to overwrite an existing file. With `set_default`, the new database is
/// recorded as the default one in `config` (the caller persists the config).
///
/// # Errors
/// Returns an error if the file exists or cannot be created
pub fn execute(
    file: &Path,
    set_default: bool,
    config: &mut TagviewConfig,
    quiet: bool,
) -> Result<()> {
    if file.exists() {
        return Err(TagviewError::InvalidInput(format!(
            "'{}' already exists",
            file.display()
        )));
    }

    TagDatabase::create_database(file)?;
    output::success(&format!("Created database {}", file.display()), quiet);

    if set_default {
        let absolute = file.canonicalize()?;
        config.set_default_database(absolute);
        output::success("Set as default database", quiet);
    }

    Ok(())
}
