//! Line-oriented database file format
//!
//! A database file is UTF-8 text. The first line is a fixed header, followed by the
//! directory list, the default-excluded tags and one block per item:
//!
//! ```text
//! [TagView database file]
//!
//! [dir]holidays
//! [exclude]private,nsfw
//!
//! [item]
//! [path]holidays/beach.jpg
//! [type]image
//! [tags]sea,summer
//! [fave]yes
//! ```
//!
//! Lines starting with `#` are comments and empty lines are ignored. Any other line must
//! start with one of the bracketed keys above; anything else is a parse error reported
//! with its 1-based line number.
//!
//! Item fields are buffered until the next `[item]` marker or the end of input. A buffered
//! record is only kept if it has both a path and at least one tag; incomplete records are
//! dropped without an error.

use super::error::DbError;
use super::types::{Item, ItemType};
use std::collections::BTreeSet;
use std::io::{self, Write};

/// First line of every database file
pub const HEADER: &str = "[TagView database file]";

/// Separator between tags in `[tags]` and `[exclude]` lines
pub const TAG_SEPARATOR: char = ',';

const ITEM: &str = "[item]";
const PATH: &str = "[path]";
const TYPE: &str = "[type]";
const TAGS: &str = "[tags]";
const FAVE: &str = "[fave]";
const DIR: &str = "[dir]";
const EXCLUDE: &str = "[exclude]";

/// Everything a database file holds
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Contents {
    /// Items in file order
    pub items: Vec<Item>,
    pub directories: BTreeSet<String>,
    pub default_excluded_tags: BTreeSet<String>,
}

/// Item fields collected while walking an `[item]` block
#[derive(Debug, Default)]
struct RecordBuffer {
    file_path: String,
    item_type: ItemType,
    tags: BTreeSet<String>,
    favorite: bool,
}

impl RecordBuffer {
    /// Move a complete record into `items` and reset the buffer
    fn flush_into(&mut self, items: &mut Vec<Item>) {
        let record = std::mem::take(self);
        if record.file_path.is_empty() || record.tags.is_empty() {
            if !record.file_path.is_empty() {
                tracing::debug!(path = %record.file_path, "skipping untagged item");
            }
            return;
        }
        items.push(Item {
            file_path: record.file_path,
            item_type: record.item_type,
            tags: record.tags,
            favorite: record.favorite,
        });
    }
}

/// Split a comma-separated tag list, trimming each tag and dropping empty entries
#[must_use]
pub fn parse_tag_list(list: &str) -> BTreeSet<String> {
    list.split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

fn parse_favorite(value: &str, line: usize) -> Result<bool, DbError> {
    match value {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err(DbError::Parse { line }),
    }
}

/// Parse the raw bytes of a database file
///
/// # Errors
///
/// Returns `DbError::Parse` for the first line that is not valid UTF-8, otherwise any
/// error from [`parse`].
pub fn parse_bytes(bytes: &[u8]) -> Result<Contents, DbError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        DbError::Parse { line }
    })?;
    parse(text)
}

/// Parse the text of a database file
///
/// # Errors
///
/// Returns `DbError::Parse` with the offending line number if the header is missing or a
/// line does not follow the format.
pub fn parse(text: &str) -> Result<Contents, DbError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.lines();

    if lines.next() != Some(HEADER) {
        return Err(DbError::Parse { line: 1 });
    }

    let mut contents = Contents::default();
    let mut buffer = RecordBuffer::default();

    for (idx, line) in lines.enumerate() {
        let line_number = idx + 2;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !line.starts_with('[') {
            return Err(DbError::Parse { line: line_number });
        }

        if line == ITEM {
            buffer.flush_into(&mut contents.items);
        } else if let Some(path) = line.strip_prefix(PATH) {
            buffer.file_path = path.to_string();
        } else if let Some(kind) = line.strip_prefix(TYPE) {
            buffer.item_type = kind
                .parse()
                .map_err(|_| DbError::Parse { line: line_number })?;
        } else if let Some(tags) = line.strip_prefix(TAGS) {
            buffer.tags = parse_tag_list(tags);
        } else if let Some(fave) = line.strip_prefix(FAVE) {
            buffer.favorite = parse_favorite(fave, line_number)?;
        } else if let Some(dir) = line.strip_prefix(DIR) {
            if !dir.is_empty() {
                contents.directories.insert(dir.to_string());
            }
        } else if let Some(tags) = line.strip_prefix(EXCLUDE) {
            contents.default_excluded_tags.extend(parse_tag_list(tags));
        } else {
            return Err(DbError::Parse { line: line_number });
        }
    }

    buffer.flush_into(&mut contents.items);
    Ok(contents)
}

fn write_tag_list<'a, W, I>(out: &mut W, tags: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a String>,
{
    for (idx, tag) in tags.into_iter().enumerate() {
        if idx > 0 {
            write!(out, "{TAG_SEPARATOR}")?;
        }
        out.write_all(tag.as_bytes())?;
    }
    writeln!(out)
}

/// Write a database in file format to `out`
///
/// Items without tags are left out.
///
/// # Errors
///
/// Returns any I/O error raised by the writer.
pub fn write<W: Write>(
    out: &mut W,
    directories: &BTreeSet<String>,
    default_excluded_tags: &BTreeSet<String>,
    items: &[Item],
) -> io::Result<()> {
    writeln!(out, "{HEADER}")?;
    writeln!(out)?;

    for dir in directories {
        writeln!(out, "{DIR}{dir}")?;
    }

    write!(out, "{EXCLUDE}")?;
    write_tag_list(out, default_excluded_tags)?;
    writeln!(out)?;

    for item in items.iter().filter(|item| !item.tags.is_empty()) {
        writeln!(out, "{ITEM}")?;
        writeln!(out, "{PATH}{}", item.file_path)?;
        writeln!(out, "{TYPE}{}", item.item_type)?;
        write!(out, "{TAGS}")?;
        write_tag_list(out, &item.tags)?;
        writeln!(out, "{FAVE}{}", if item.favorite { "yes" } else { "no" })?;
        writeln!(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_set(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| (*t).to_string()).collect()
    }

    fn render(contents: &Contents) -> String {
        let mut out = Vec::new();
        write(
            &mut out,
            &contents.directories,
            &contents.default_excluded_tags,
            &contents.items,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_empty_database() {
        let contents = parse("[TagView database file]\n\n[exclude]\n").unwrap();
        assert_eq!(contents, Contents::default());
    }

    #[test]
    fn test_parse_full_database() {
        let text = "\
[TagView database file]

[dir]docs
[dir]holidays
[exclude]private, nsfw

[item]
[path]cat.jpg
[type]image
[tags]animal,cute
[fave]no

[item]
[path]holidays/clip.mp4
[type]video
[tags]sea
[fave]yes
";
        let contents = parse(text).unwrap();

        assert_eq!(contents.directories, tag_set(&["docs", "holidays"]));
        assert_eq!(contents.default_excluded_tags, tag_set(&["nsfw", "private"]));
        assert_eq!(
            contents.items,
            vec![
                Item::with_tags("cat.jpg", ItemType::Image, ["animal", "cute"], false),
                Item::with_tags("holidays/clip.mp4", ItemType::Video, ["sea"], true),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_missing_header() {
        let err = parse("[dir]docs\n").unwrap_err();
        assert_eq!(err.line(), Some(1));

        let err = parse("").unwrap_err();
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_parse_error_line_numbers() {
        let err = parse("[TagView database file]\n\nnot a record\n").unwrap_err();
        assert_eq!(err.line(), Some(3));

        let err = parse("[TagView database file]\n[item]\n[type]gif\n").unwrap_err();
        assert_eq!(err.line(), Some(3));

        let err = parse("[TagView database file]\n[item]\n[path]a\n[fave]maybe\n").unwrap_err();
        assert_eq!(err.line(), Some(4));

        let err = parse("[TagView database file]\n[unknown]value\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_parse_skips_comments() {
        let text =
            "[TagView database file]\n# a note\n[item]\n# [path]ignored\n[path]a.jpg\n[tags]x\n";
        let contents = parse(text).unwrap();
        assert_eq!(contents.items.len(), 1);
        assert_eq!(contents.items[0].file_path, "a.jpg");
    }

    #[test]
    fn test_parse_drops_untagged_records() {
        let text = "\
[TagView database file]
[item]
[path]empty.jpg
[type]image
[tags]
[fave]yes
[item]
[path]kept.jpg
[tags]x
";
        let contents = parse(text).unwrap();
        assert_eq!(contents.items.len(), 1);
        assert_eq!(contents.items[0].file_path, "kept.jpg");
        assert!(!contents.items[0].favorite);
    }

    #[test]
    fn test_parse_drops_pathless_records() {
        let text = "[TagView database file]\n[item]\n[tags]x\n[item]\n[path]b.jpg\n[tags]y\n";
        let contents = parse(text).unwrap();
        assert_eq!(contents.items.len(), 1);
        assert_eq!(contents.items[0].tags, tag_set(&["y"]));
    }

    #[test]
    fn test_parse_accepts_crlf() {
        let text =
            "[TagView database file]\r\n\r\n[item]\r\n[path]a.jpg\r\n[tags]x,y\r\n[fave]yes\r\n";
        let contents = parse(text).unwrap();
        assert_eq!(contents.items[0].tags, tag_set(&["x", "y"]));
        assert!(contents.items[0].favorite);
    }

    #[test]
    fn test_parse_tag_list() {
        assert_eq!(parse_tag_list("a, b ,,c"), tag_set(&["a", "b", "c"]));
        assert!(parse_tag_list("").is_empty());
        assert!(parse_tag_list(" , ").is_empty());
    }

    #[test]
    fn test_write_layout() {
        let contents = Contents {
            items: vec![
                Item::with_tags("cat.jpg", ItemType::Image, ["cute", "animal"], false),
                Item::new("untagged.jpg", ItemType::Image),
            ],
            directories: tag_set(&["docs"]),
            default_excluded_tags: tag_set(&["private"]),
        };

        let expected = "\
[TagView database file]

[dir]docs
[exclude]private

[item]
[path]cat.jpg
[type]image
[tags]animal,cute
[fave]no

";
        assert_eq!(render(&contents), expected);
    }

    #[test]
    fn test_parse_bytes_reports_invalid_utf8_line() {
        let bytes = b"[TagView database file]\n[item]\n[path]caf\xE9.jpg\n[tags]x\n";
        assert!(matches!(parse_bytes(bytes), Err(DbError::Parse { line: 3 })));
    }

    #[test]
    fn test_parse_bytes_valid_text() {
        let bytes = b"[TagView database file]\n[item]\n[path]caf\xC3\xA9.jpg\n[tags]x\n";
        let contents = parse_bytes(bytes).unwrap();
        assert_eq!(contents.items[0].file_path, "caf\u{e9}.jpg");
    }

    #[test]
    fn test_write_then_parse() {
        let contents = Contents {
            items: vec![
                Item::with_tags("b.mp4", ItemType::Video, ["x", "with space"], true),
                Item::with_tags("a.jpg", ItemType::Image, ["y"], false),
            ],
            directories: tag_set(&["one", "two"]),
            default_excluded_tags: tag_set(&["p", "q"]),
        };

        assert_eq!(parse(&render(&contents)).unwrap(), contents);
    }
}
