//! Anchored-insert behavior, pure and through the file adapter.

use camino::Utf8PathBuf;
use pretty_assertions::assert_eq;
use vintf_bump_edit::{insert_above, insert_above_in_file, EditError};

const ANCHOR: &str = "        Level::UNSPECIFIED,";

fn level_h() -> String {
    [
        "enum class Level : size_t {",
        "    V = 202404,",
        "    UNSPECIFIED = 0,",
        "};",
        "",
        "inline const std::vector<Level> kLevels = {",
        "        Level::V,",
        "        Level::UNSPECIFIED,",
        "};",
        "",
    ]
    .join("\n")
}

#[test]
fn inserts_block_directly_above_unique_anchor() {
    let out = insert_above(&level_h(), ANCHOR, "        Level::W,").unwrap();

    let expected = level_h().replace(
        "        Level::V,\n        Level::UNSPECIFIED,",
        "        Level::V,\n        Level::W,\n        Level::UNSPECIFIED,",
    );
    assert_eq!(out, expected);
}

#[test]
fn anchor_line_itself_is_unchanged() {
    let out = insert_above(&level_h(), ANCHOR, "        Level::W,").unwrap();
    assert_eq!(out.lines().filter(|l| *l == ANCHOR).count(), 1);
}

#[test]
fn multi_line_block_keeps_line_structure() {
    let contents = "one\ntarget\nthree\n";
    let out = insert_above(contents, "target", "a\nb").unwrap();
    assert_eq!(out, "one\na\nb\ntarget\nthree\n");
}

#[test]
fn block_with_trailing_newline_is_not_doubled() {
    let contents = "one\ntarget\n";
    let out = insert_above(contents, "target", "a\n").unwrap();
    assert_eq!(out, "one\na\ntarget\n");
}

#[test]
fn missing_anchor_is_an_error() {
    let err = insert_above(&level_h(), "    // nonexistent marker", "x").unwrap_err();
    assert_eq!(
        err,
        EditError::AnchorNotFoundOrAmbiguous {
            anchor: "    // nonexistent marker".to_string(),
            matches: 0,
        }
    );
}

#[test]
fn duplicate_anchor_is_an_error() {
    let contents = "target\nmiddle\ntarget\n";
    let err = insert_above(contents, "target", "x").unwrap_err();
    assert_eq!(
        err,
        EditError::AnchorNotFoundOrAmbiguous {
            anchor: "target".to_string(),
            matches: 2,
        }
    );
}

#[test]
fn anchor_must_match_whole_line_not_substring() {
    // "UNSPECIFIED" appears inside two longer lines but never alone.
    let err = insert_above(&level_h(), "UNSPECIFIED", "x").unwrap_err();
    assert!(matches!(
        err,
        EditError::AnchorNotFoundOrAmbiguous { matches: 0, .. }
    ));
}

#[test]
fn file_adapter_rewrites_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("Level.h")).unwrap();
    std::fs::write(&path, level_h()).unwrap();

    insert_above_in_file(&path, ANCHOR, "        Level::W,").unwrap();

    let got = std::fs::read_to_string(&path).unwrap();
    assert!(got.contains("        Level::W,\n        Level::UNSPECIFIED,"));
}

#[test]
fn file_adapter_leaves_file_untouched_on_anchor_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("Level.h")).unwrap();
    std::fs::write(&path, level_h()).unwrap();

    let err = insert_above_in_file(&path, "    // nonexistent marker", "x").unwrap_err();
    assert!(err.to_string().contains("splice"));

    let got = std::fs::read_to_string(&path).unwrap();
    assert_eq!(got, level_h());
}
