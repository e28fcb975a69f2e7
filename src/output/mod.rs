//! Output formatting for CLI display
//!
//! This module provides utilities for formatting output in the CLI,
//! including item, path and tag formatting and colored status messages.

use crate::db::{Item, ItemType};
use colored::Colorize;
use std::path::Path;

/// Format an item with its tags for display
#[must_use]
pub fn item_with_tags(path: &Path, item: &Item, quiet: bool) -> String {
    let path_str = path.display().to_string();

    if quiet {
        return path_str;
    }

    let marker = if item.favorite { "★ ".yellow().to_string() } else { "  ".to_string() };
    let kind = match item.item_type {
        ItemType::Image => String::new(),
        ItemType::Video => format!(" {}", "(video)".dimmed()),
    };
    let tags: Vec<&str> = item.tags.iter().map(String::as_str).collect();

    format!("{marker}{path_str}{kind} [{}]", tags.join(", "))
}

/// Format a tag with usage count
#[must_use]
pub fn tag_with_count(tag: &str, count: usize, quiet: bool) -> String {
    if quiet {
        tag.to_string()
    } else {
        format!("  {tag} (used by {count} file(s))")
    }
}

/// Color a path based on file existence (green if exists, red if missing)
#[must_use]
pub fn colorize_path(path: &Path) -> String {
    let formatted = path.display().to_string();
    if path.exists() {
        formatted.green().to_string()
    } else {
        formatted.red().to_string()
    }
}

/// Print a success message unless quiet
pub fn success(message: &str, quiet: bool) {
    if !quiet {
        println!("{} {}", "✓".green(), message);
    }
}

/// Print a warning to stderr
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠️".yellow(), message);
}

/// Print an error to stderr
pub fn error(message: &str) {
    eprintln!("{} {}", "❌".red(), message);
}
