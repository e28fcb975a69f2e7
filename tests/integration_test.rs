//! Integration tests for tagview
//!
//! These tests exercise the public database API against real files in temporary
//! directories, covering complete create/modify/reload workflows.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tagview::db::{DbError, Item, ItemType, TagDatabase};
use tempfile::TempDir;

/// Helper function to create an empty database in a fresh temporary directory
fn setup_test_db() -> (TempDir, PathBuf, TagDatabase) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tags.tv");
    TagDatabase::create_database(&path).unwrap();
    let db = TagDatabase::open(&path).unwrap();
    (dir, path, db)
}

/// Helper function to write a raw database file
fn write_db_file(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("tags.tv");
    fs::write(&path, text).unwrap();
    path
}

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn item(path: &str, tags: &[&str], favorite: bool) -> Item {
    Item::with_tags(path, ItemType::Image, tags.iter().copied(), favorite)
}

#[test]
fn test_round_trip_after_mutations() {
    let (dir, path, mut db) = setup_test_db();

    db.add_item(item("a.jpg", &["x", "y"], true)).unwrap();
    db.add_item(Item::with_tags("clips/b.mp4", ItemType::Video, ["y"], false)).unwrap();
    db.add_item(item("c.jpg", &["z"], false)).unwrap();
    db.edit_item(&item("c.jpg", &["z", "w"], true)).unwrap();
    db.delete_item(dir.path().join("a.jpg"), false).unwrap();
    db.set_directories(set(&["clips", "docs"])).unwrap();
    db.set_default_excluded_tags(set(&["private"])).unwrap();

    let reloaded = TagDatabase::open(&path).unwrap();

    let mut expected: Vec<Item> = db.items().to_vec();
    let mut actual: Vec<Item> = reloaded.items().to_vec();
    expected.sort();
    actual.sort();
    assert_eq!(actual, expected);
    assert_eq!(reloaded.get_directories(), &set(&["clips", "docs"]));
    assert_eq!(reloaded.get_default_excluded_tags(), &set(&["private"]));
    assert_eq!(reloaded.get_prefix(), dir.path());
}

#[test]
fn test_tagless_item_is_dropped_on_load() {
    let dir = TempDir::new().unwrap();
    let path = write_db_file(
        dir.path(),
        "[TagView database file]\n\
         [item]\n[path]empty.jpg\n[type]image\n[tags]\n[fave]no\n\
         [item]\n[path]ok.jpg\n[type]image\n[tags]sky\n[fave]no\n",
    );

    let db = TagDatabase::open(&path).unwrap();
    assert_eq!(db.len(), 1);
    assert_eq!(db.get_all_tags(), set(&["sky"]));
    assert!(matches!(
        db.get_item(dir.path().join("empty.jpg")),
        Err(DbError::ItemNotFound(_))
    ));
}

#[test]
fn test_tagless_item_is_not_written() {
    let (dir, path, mut db) = setup_test_db();
    db.add_item(item("a.jpg", &["x"], false)).unwrap();
    db.add_item(Item::new("bare.jpg", ItemType::Image)).unwrap();
    assert_eq!(db.len(), 2);

    let reloaded = TagDatabase::open(&path).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded.get_item(dir.path().join("bare.jpg")).is_err());
}

#[test]
fn test_exclude_takes_precedence() {
    let (dir, _path, mut db) = setup_test_db();
    db.add_item(item("both.jpg", &["x", "y"], false)).unwrap();
    db.add_item(item("only.jpg", &["x"], false)).unwrap();

    let include_x = db.query(&set(&["x"]), &set(&["y"]));
    assert_eq!(include_x, vec![dir.path().join("only.jpg")]);

    // Same tag on both sides
    assert!(db.query(&set(&["x"]), &set(&["x"])).is_empty());
    assert!(db.query(&set(&["y"]), &set(&["y"])).is_empty());
}

#[test]
fn test_favorites_come_first() {
    let (dir, _path, mut db) = setup_test_db();
    db.add_item(item("aaa.jpg", &["x"], false)).unwrap();
    db.add_item(item("zzz.jpg", &["x"], true)).unwrap();
    db.add_item(item("mmm.jpg", &["x"], false)).unwrap();

    let result = db.query(&set(&["x"]), &BTreeSet::new());
    assert_eq!(
        result,
        vec![
            dir.path().join("zzz.jpg"),
            dir.path().join("aaa.jpg"),
            dir.path().join("mmm.jpg"),
        ]
    );
}

#[test]
fn test_suggestion_ranking() {
    let (_dir, _path, mut db) = setup_test_db();
    db.add_item(item("A.jpg", &["x", "y"], false)).unwrap();
    db.add_item(item("B.jpg", &["x"], false)).unwrap();
    db.add_item(item("C.jpg", &["x", "z"], false)).unwrap();

    assert_eq!(db.suggestions(&set(&["x"])), vec!["x", "y", "z"]);
}

#[test]
fn test_suggestions_skip_default_excluded_items() {
    let (_dir, _path, mut db) = setup_test_db();
    db.add_item(item("A.jpg", &["x", "y"], false)).unwrap();
    db.add_item(item("B.jpg", &["x", "private"], false)).unwrap();
    db.set_default_excluded_tags(set(&["private"])).unwrap();

    assert_eq!(db.suggestions(&set(&["x"])), vec!["x", "y"]);
}

#[test]
fn test_add_item_replaces_same_path() {
    let (dir, path, mut db) = setup_test_db();
    db.add_item(item("cat.jpg", &["old"], false)).unwrap();
    db.add_item(item("cat.jpg", &["new", "tags"], true)).unwrap();

    assert_eq!(db.len(), 1);
    assert_eq!(db.get_tags_for_item(dir.path().join("cat.jpg")).unwrap(), &set(&["new", "tags"]));

    let reloaded = TagDatabase::open(&path).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded.get_item(dir.path().join("cat.jpg")).unwrap().favorite);
}

#[test]
fn test_parse_error_reports_line_number() {
    let dir = TempDir::new().unwrap();
    let path = write_db_file(
        dir.path(),
        "[TagView database file]\n[dir]docs\nthis line is garbage\n",
    );

    let err = TagDatabase::open(&path).unwrap_err();
    assert!(matches!(err, DbError::Parse { line: 3 }));
}

#[test]
fn test_failed_load_keeps_previous_state() {
    let (dir, _path, mut db) = setup_test_db();
    db.add_item(item("a.jpg", &["x"], false)).unwrap();

    let bad = dir.path().join("bad.tv");
    fs::write(&bad, "not a database\n").unwrap();

    assert!(db.load_from_file(&bad).is_err());
    assert!(db.load_from_file(dir.path().join("missing.tv")).is_err());
    assert_eq!(db.len(), 1);
    assert_eq!(db.source_path(), Some(dir.path().join("tags.tv").as_path()));
}

#[test]
fn test_scenario_cat_with_dir_and_exclude() {
    let dir = TempDir::new().unwrap();
    let path = write_db_file(
        dir.path(),
        "[TagView database file]\n\
         [dir]docs\n\
         [exclude]private\n\
         [item]\n\
         [path]cat.jpg\n\
         [type]image\n\
         [tags]animal,cute\n\
         [fave]no\n",
    );

    let db = TagDatabase::open(&path).unwrap();
    assert_eq!(db.get_directories(), &set(&["docs"]));
    assert_eq!(db.get_default_excluded_tags(), &set(&["private"]));

    let found = db.query(&set(&["animal"]), &BTreeSet::new());
    assert_eq!(found, vec![dir.path().join("cat.jpg")]);
    assert!(db.query(&set(&["animal"]), &set(&["cute"])).is_empty());
}

#[test]
fn test_delete_item_with_file() {
    let (dir, path, mut db) = setup_test_db();
    let file = dir.path().join("gone.jpg");
    fs::write(&file, b"jpeg").unwrap();
    db.add_item(item("gone.jpg", &["x"], false)).unwrap();

    db.delete_item(&file, true).unwrap();
    assert!(!file.exists());
    assert!(TagDatabase::open(&path).unwrap().is_empty());
}

#[test]
fn test_delete_missing_file_still_removes_record() {
    let (dir, _path, mut db) = setup_test_db();
    db.add_item(item("ghost.jpg", &["x"], false)).unwrap();

    db.delete_item(dir.path().join("ghost.jpg"), true).unwrap();
    assert!(db.is_empty());
}

#[test]
fn test_missing_items_are_reported() {
    let (dir, _path, mut db) = setup_test_db();

    assert!(matches!(
        db.edit_item(&item("nope.jpg", &["x"], false)),
        Err(DbError::ItemNotFound(_))
    ));
    assert!(matches!(
        db.delete_item(dir.path().join("nope.jpg"), false),
        Err(DbError::ItemNotFound(_))
    ));
}

#[test]
fn test_unloaded_database_cannot_write() {
    let mut db = TagDatabase::new();
    assert!(matches!(db.add_item(item("a.jpg", &["x"], false)), Err(DbError::NotLoaded)));
}
