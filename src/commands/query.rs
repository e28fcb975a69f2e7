//! Query command - list files by tag

use crate::db::{TagDatabase, TagQuery};
use crate::tags::parse_tag_args;
use crate::{TagviewError, output};

type Result<T> = std::result::Result<T, TagviewError>;

/// Options of the query command
#[derive(Debug, Clone, Default)]
pub struct QueryArgs {
    pub tags: Vec<String>,
    pub exclude: Vec<String>,
    /// Use every known tag as the include set
    pub all: bool,
    /// Skip merging the database's default-excluded tags into the exclude set
    pub no_default_excludes: bool,
}

/// Build the tag query described by `args`
///
/// Default-excluded tags are added to the exclude set unless disabled.
#[must_use]
pub fn build_query(db: &TagDatabase, args: &QueryArgs) -> TagQuery {
    let include = if args.all {
        db.get_all_tags()
    } else {
        parse_tag_args(&args.tags)
    };

    let query = TagQuery::new(include, parse_tag_args(&args.exclude));
    if args.no_default_excludes {
        query
    } else {
        query.with_default_excludes(db)
    }
}

/// Execute the query command
///
/// # Errors
/// Returns an error if JSON output fails
pub fn execute(db: &TagDatabase, args: &QueryArgs, json: bool, quiet: bool) -> Result<()> {
    let query = build_query(db, args);

    if query.include.is_empty() && !quiet {
        output::warning("No tags to include given; use -t TAG or --all");
    }

    let files = db.run_query(&query);

    if json {
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }

    if files.is_empty() {
        if !quiet {
            println!("No files found matching the criteria");
        }
        return Ok(());
    }

    for file in &files {
        if quiet {
            println!("{}", file.display());
        } else {
            println!("{}", output::colorize_path(file));
        }
    }
    Ok(())
}
