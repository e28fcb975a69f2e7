//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for tagview using the `clap` crate.
//!
//! # Commands
//!
//! - **init**: Create a new database file
//! - **add** / **edit** / **rm** / **show**: Manage tagged items
//! - **query**: List files matching included tags and not matching excluded ones
//! - **suggest**: Recommend tags related to a tag selection
//! - **tags**: List known tags with usage counts
//! - **dirs** / **exclude**: Manage database settings
//! - **config**: Manage user configuration
//!
//! # Examples
//!
//! ```bash
//! tagview init ~/Pictures/tags.tv --set-default
//! tagview add ~/Pictures/cat.jpg -t animal,cute --fave
//! tagview query -t animal -e private
//! tagview suggest -t animal
//! ```

use crate::config::{PreviewSize, TagviewConfig};
use crate::db::ItemType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "tagview")]
#[command(about = "Tag and browse local image collections", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database file to use (overrides the configured default)
    #[arg(long = "db", value_name = "FILE", global = true)]
    pub db: Option<PathBuf>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a new, empty database file
    Init {
        /// Where to create the database
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Make the new database the default one
        #[arg(long = "set-default")]
        set_default: bool,
    },

    /// Add a file to the database, replacing any existing entry
    #[command(visible_alias = "a")]
    Add {
        /// File to add (must be inside the database directory)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Tags to apply (repeat the flag or separate with commas)
        #[arg(short = 't', long = "tag", value_name = "TAG", num_args = 1.., required = true)]
        tags: Vec<String>,

        /// Mark the file as a favorite
        #[arg(long = "fave")]
        favorite: bool,

        /// Media type (guessed from the extension when omitted)
        #[arg(long = "type", value_enum)]
        item_type: Option<ItemType>,
    },

    /// Change tags, favorite flag or type of a file in the database
    #[command(visible_alias = "e")]
    Edit {
        /// File to edit
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Replace all tags with these
        #[arg(short = 't', long = "tag", value_name = "TAG", num_args = 1..)]
        tags: Vec<String>,

        /// Tags to add
        #[arg(long = "add-tag", value_name = "TAG", num_args = 1..)]
        add_tags: Vec<String>,

        /// Tags to remove
        #[arg(long = "remove-tag", value_name = "TAG", num_args = 1..)]
        remove_tags: Vec<String>,

        /// Mark the file as a favorite
        #[arg(long = "fave", conflicts_with = "no_favorite")]
        favorite: bool,

        /// Clear the favorite flag
        #[arg(long = "no-fave")]
        no_favorite: bool,

        /// Change the media type
        #[arg(long = "type", value_enum)]
        item_type: Option<ItemType>,
    },

    /// Remove a file from the database
    #[command(visible_alias = "rm")]
    Remove {
        /// File to remove
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Also delete the file from disk
        #[arg(long = "delete-file")]
        delete_file: bool,

        /// Do not ask for confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Show the database entry of a file
    Show {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List files tagged with any of the given tags
    #[command(visible_alias = "q")]
    Query {
        /// Tags to include (a file needs at least one of them)
        #[arg(short = 't', long = "tag", value_name = "TAG", num_args = 1..)]
        tags: Vec<String>,

        /// Tags to exclude (a file with any of them is never listed)
        #[arg(short = 'e', long = "exclude", value_name = "TAG", num_args = 1..)]
        exclude: Vec<String>,

        /// Include every tag in the database
        #[arg(short = 'a', long = "all", conflicts_with = "tags")]
        all: bool,

        /// Do not exclude the database's default-excluded tags
        #[arg(long = "no-default-excludes")]
        no_default_excludes: bool,
    },

    /// Suggest tags that often appear together with the given ones
    #[command(visible_alias = "s")]
    Suggest {
        /// Currently selected tags
        #[arg(short = 't', long = "tag", value_name = "TAG", num_args = 1..)]
        tags: Vec<String>,

        /// Maximum number of suggestions
        #[arg(short = 'n', long = "limit", default_value_t = 5)]
        limit: usize,
    },

    /// List all tags with their usage counts
    Tags {
        /// Only show tags containing this text (case-insensitive)
        #[arg(short = 'f', long = "filter", value_name = "TEXT")]
        filter: Option<String>,
    },

    /// Manage the directories recognized in the database
    Dirs {
        #[command(subcommand)]
        command: DirsCommands,
    },

    /// Manage the tags excluded from queries by default
    Exclude {
        #[command(subcommand)]
        command: ExcludeCommands,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum DirsCommands {
    /// List recognized directories
    List,
    /// Replace the directory list
    Set {
        #[arg(value_name = "DIR")]
        dirs: Vec<String>,
    },
    /// Add a directory
    Add {
        #[arg(value_name = "DIR")]
        dir: String,
    },
    /// Remove a directory
    Remove {
        #[arg(value_name = "DIR")]
        dir: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ExcludeCommands {
    /// List default-excluded tags
    List,
    /// Replace the default-excluded tags
    Set {
        #[arg(value_name = "TAG")]
        tags: Vec<String>,
    },
    /// Add default-excluded tags
    Add {
        #[arg(value_name = "TAG", required = true)]
        tags: Vec<String>,
    },
    /// Stop excluding tags by default
    Remove {
        #[arg(value_name = "TAG", required = true)]
        tags: Vec<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set the database opened by default
    SetDb {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Set the thumbnail preview size
    SetPreviewSize {
        #[arg(value_enum)]
        size: PreviewSize,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Database file to open: `--db` if given, otherwise the configured default
    #[must_use]
    pub fn database_path(&self, config: &TagviewConfig) -> Option<PathBuf> {
        self.db
            .clone()
            .or_else(|| config.get_default_database().map(PathBuf::from))
    }
}
