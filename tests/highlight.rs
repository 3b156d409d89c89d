//! Integration tests for the highlighter through the document model
//!
//! These drive whole-document scenarios: classification of a small C file,
//! cross-line block comment propagation under edits, and a golden snapshot
//! pinning the full derived state as JSON.

use sumi::core::{Document, Snapshot};
use sumi::syntax::{detect, Tag};

fn c_document(lines: &[&str]) -> Document {
    let mut doc = Document::new();
    for (i, line) in lines.iter().enumerate() {
        doc.insert_line(i, line);
    }
    doc.set_profile(detect("test.c"));
    doc
}

fn tags_string(doc: &Document, row: usize) -> String {
    doc.line(row)
        .unwrap()
        .tags()
        .iter()
        .map(|t| t.code())
        .collect()
}

#[test]
fn test_c_file_classification() {
    let doc = c_document(&["int main() {", "  // hi", "}"]);

    // "int" is a type, "main" and the punctuation stay normal
    assert_eq!(tags_string(&doc, 0), "ttt.........");
    // the comment spans to end of line
    assert_eq!(tags_string(&doc, 1), "..ccccc");
    assert_eq!(tags_string(&doc, 2), ".");
}

#[test]
fn test_block_comment_open_propagates_on_insert() {
    let mut doc = c_document(&["int x;", "int y;", "*/ int z;"]);
    assert_eq!(tags_string(&doc, 0), "ttt...");

    doc.insert_line(0, "/*");

    // everything up to the closing token is now comment
    assert!(doc.line(0).unwrap().open_comment());
    assert!(doc.line(1).unwrap().open_comment());
    assert!(doc.line(2).unwrap().open_comment());
    assert!(!doc.line(3).unwrap().open_comment());

    assert!(doc
        .line(1)
        .unwrap()
        .tags()
        .iter()
        .all(|&t| t == Tag::BlockComment));
    // after "*/" the rest of the line highlights normally again
    assert_eq!(tags_string(&doc, 3), "CC.ttt...");
}

#[test]
fn test_block_comment_close_deletion_recolors() {
    let mut doc = c_document(&["/* a */", "int x;"]);
    assert!(!doc.line(0).unwrap().open_comment());
    assert_eq!(tags_string(&doc, 1), "ttt...");

    // removing the closing "*/" swallows the next line
    doc.delete_char(0, 6);
    doc.delete_char(0, 5);
    assert!(doc.line(0).unwrap().open_comment());
    assert!(doc
        .line(1)
        .unwrap()
        .tags()
        .iter()
        .all(|&t| t == Tag::BlockComment));
}

#[test]
fn test_highlight_is_idempotent() {
    let mut doc = c_document(&["/* open", "int x; // inner", "*/ done"]);
    let before = Snapshot::from_document(&doc);

    // re-deriving every line must not change anything
    let profile = doc.profile();
    doc.set_profile(profile);
    let after = Snapshot::from_document(&doc);

    assert_eq!(before, after);
}

#[test]
fn test_structural_roundtrip_restores_tags() {
    let mut doc = c_document(&["int x;", "char c;"]);
    let before = Snapshot::from_document(&doc);

    doc.insert_line(1, "/* comment");
    doc.delete_line(1);

    let after = Snapshot::from_document(&doc);
    assert_eq!(before.lines, after.lines);
}

#[test]
fn test_golden_snapshot_json() {
    let doc = c_document(&["\tint x = 10;"]);
    let snapshot = Snapshot::from_document(&doc);
    let value = serde_json::to_value(&snapshot).unwrap();

    let expected = serde_json::json!({
        "lines": [{
            "raw": "\tint x = 10;",
            "rendered": "    int x = 10;",
            "tags": "....ttt.....nn.",
            "open_comment": false,
        }],
        "dirty": true,
    });
    assert_eq!(value, expected);
}
