//! Tagview CLI application entry point
//!
//! This is the main executable for the tagview tag database. It provides a command-line
//! interface for creating databases, tagging files and querying them by tag.
//!
//! # Usage
//!
//! ```bash
//! # Create a database next to your pictures and make it the default
//! tagview init ~/Pictures/tags.tv --set-default
//!
//! # Tag a file
//! tagview add ~/Pictures/cat.jpg -t animal,cute
//!
//! # Find files tagged "animal" but not "private"
//! tagview query -t animal -e private
//!
//! # Tags that often appear with "animal"
//! tagview suggest -t animal
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/tagview/config.toml` on Linux). Set `RUST_LOG=debug` for diagnostics.

use tagview::{
    TagviewError,
    cli::{Cli, Commands, ConfigCommands},
    commands::{self, item::EditChanges, query::QueryArgs},
    config::TagviewConfig,
    db::TagDatabase,
    output,
};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, TagviewError>;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn handle_config_command(
    mut config: TagviewConfig,
    command: &ConfigCommands,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let path = TagviewConfig::config_path()?;
            if !quiet {
                println!("Config file: {}", path.display());
            }
            match config.get_default_database() {
                Some(db) => println!("default_database = {}", db.display()),
                None => println!("default_database = (not set)"),
            }
            let size = config.preview_size;
            println!("preview_size = {size} ({}px)", size.pixels());
            println!("quiet = {}", config.quiet);
        }
        ConfigCommands::SetDb { file } => {
            TagDatabase::open(file)?;
            config.set_default_database(file.canonicalize()?);
            config.save()?;
            output::success(&format!("Default database set to {}", file.display()), quiet);
        }
        ConfigCommands::SetPreviewSize { size } => {
            config.set_preview_size(*size);
            config.save()?;
            output::success(&format!("Preview size set to {size}"), quiet);
        }
    }
    Ok(())
}

/// Open the database named by `--db` or the configured default
fn open_database(cli: &Cli, config: &TagviewConfig) -> Result<TagDatabase> {
    let db_path = cli.database_path(config).ok_or_else(|| {
        TagviewError::InvalidInput(
            "No database given. Use --db <FILE> or 'tagview config set-db <FILE>'.".into(),
        )
    })?;
    Ok(TagDatabase::open(&db_path)?)
}

fn run(cli: &Cli, mut config: TagviewConfig) -> Result<()> {
    let quiet = cli.quiet || config.quiet;
    let json = cli.json;

    match &cli.command {
        Commands::Init { file, set_default } => {
            commands::init(file, *set_default, &mut config, quiet)?;
            if *set_default {
                config.save()?;
            }
        }
        Commands::Config { command } => {
            handle_config_command(config, command, quiet)?;
        }
        Commands::Add { file, tags, favorite, item_type } => {
            let mut db = open_database(cli, &config)?;
            commands::item::add(&mut db, file, tags, *favorite, *item_type, quiet)?;
        }
        Commands::Edit { file, tags, add_tags, remove_tags, favorite, no_favorite, item_type } => {
            let mut db = open_database(cli, &config)?;
            let changes = EditChanges::from_args(
                tags,
                add_tags,
                remove_tags,
                *favorite,
                *no_favorite,
                *item_type,
            );
            commands::item::edit(&mut db, file, &changes, quiet)?;
        }
        Commands::Remove { file, delete_file, yes } => {
            let mut db = open_database(cli, &config)?;
            commands::item::remove(&mut db, file, *delete_file, *yes, quiet)?;
        }
        Commands::Show { file } => {
            let db = open_database(cli, &config)?;
            commands::item::show(&db, file, json, quiet)?;
        }
        Commands::Query { tags, exclude, all, no_default_excludes } => {
            let db = open_database(cli, &config)?;
            let args = QueryArgs {
                tags: tags.clone(),
                exclude: exclude.clone(),
                all: *all,
                no_default_excludes: *no_default_excludes,
            };
            commands::query(&db, &args, json, quiet)?;
        }
        Commands::Suggest { tags, limit } => {
            let db = open_database(cli, &config)?;
            commands::suggest(&db, tags, *limit, json, quiet)?;
        }
        Commands::Tags { filter } => {
            let db = open_database(cli, &config)?;
            commands::tags(&db, filter.as_deref(), json, quiet)?;
        }
        Commands::Dirs { command } => {
            let mut db = open_database(cli, &config)?;
            commands::settings::dirs(&mut db, command, json, quiet)?;
        }
        Commands::Exclude { command } => {
            let mut db = open_database(cli, &config)?;
            commands::settings::exclude(&mut db, command, json, quiet)?;
        }
    }

    Ok(())
}

fn main() {
    init_logging();

    let cli = Cli::parse_args();
    let result = TagviewConfig::load()
        .map_err(TagviewError::from)
        .and_then(|config| run(&cli, config));

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
