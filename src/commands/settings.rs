//! Database settings commands - recognized directories and default-excluded tags

use crate::cli::{DirsCommands, ExcludeCommands};
use crate::db::TagDatabase;
use crate::tags::parse_tag_args;
use crate::{TagviewError, output};
use std::collections::BTreeSet;

type Result<T> = std::result::Result<T, TagviewError>;

fn print_set(
    values: &BTreeSet<String>,
    empty_message: &str,
    json: bool,
    quiet: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(values)?);
    } else if values.is_empty() {
        if !quiet {
            println!("{empty_message}");
        }
    } else {
        for value in values {
            println!("{value}");
        }
    }
    Ok(())
}

/// Normalize a directory argument: no surrounding whitespace or slashes
fn normalize_dir(dir: &str) -> Option<String> {
    let trimmed = dir.trim().trim_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Execute a `dirs` subcommand
///
/// # Errors
/// Returns an error if the database cannot be written or JSON output fails
pub fn dirs(db: &mut TagDatabase, command: &DirsCommands, json: bool, quiet: bool) -> Result<()> {
    let mut directories = db.get_directories().clone();

    match command {
        DirsCommands::List => {
            return print_set(&directories, "No directories configured.", json, quiet);
        }
        DirsCommands::Set { dirs } => {
            directories = dirs.iter().filter_map(|d| normalize_dir(d)).collect();
        }
        DirsCommands::Add { dir } => {
            let dir = normalize_dir(dir)
                .ok_or_else(|| TagviewError::InvalidInput("Directory name is empty".into()))?;
            directories.insert(dir);
        }
        DirsCommands::Remove { dir } => {
            let dir = normalize_dir(dir).unwrap_or_default();
            if !directories.remove(&dir) {
                return Err(TagviewError::InvalidInput(format!(
                    "Directory '{dir}' is not configured"
                )));
            }
        }
    }

    db.set_directories(directories)?;
    output::success("Directories updated", quiet);
    Ok(())
}

/// Execute an `exclude` subcommand
///
/// # Errors
/// Returns an error if the database cannot be written or JSON output fails
pub fn exclude(
    db: &mut TagDatabase,
    command: &ExcludeCommands,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let mut excluded = db.get_default_excluded_tags().clone();

    match command {
        ExcludeCommands::List => {
            return print_set(&excluded, "No tags are excluded by default.", json, quiet);
        }
        ExcludeCommands::Set { tags } => {
            excluded = parse_tag_args(tags);
        }
        ExcludeCommands::Add { tags } => {
            excluded.extend(parse_tag_args(tags));
        }
        ExcludeCommands::Remove { tags } => {
            for tag in parse_tag_args(tags) {
                excluded.remove(&tag);
            }
        }
    }

    db.set_default_excluded_tags(excluded)?;
    output::success("Default-excluded tags updated", quiet);
    Ok(())
}
