//! Integration tests for the editor state machine
//!
//! Everything here goes through `Editor::handle_key`, which is pure state
//! transition, so no tty is needed.

use sumi::core::Document;
use sumi::editor::{Editor, KeyOutcome};
use sumi::input::Key;
use sumi::ui::Search;

fn type_text(ed: &mut Editor, text: &str) {
    for c in text.chars() {
        match c {
            '\n' => ed.handle_key(Key::Enter),
            _ => ed.handle_key(Key::Char(c)),
        };
    }
}

#[test]
fn test_typing_builds_lines() {
    let mut ed = Editor::new(80, 24);
    type_text(&mut ed, "hello\nworld");

    assert_eq!(ed.document().line_count(), 2);
    assert_eq!(ed.document().line(0).unwrap().raw(), "hello");
    assert_eq!(ed.document().line(1).unwrap().raw(), "world");
    assert_eq!(ed.cursor(), (1, 5));
    assert!(ed.document().is_dirty());
}

#[test]
fn test_quit_confirmation_double_press() {
    let mut ed = Editor::new(80, 24);
    type_text(&mut ed, "x");

    assert_eq!(ed.handle_key(Key::Ctrl('q')), KeyOutcome::Continue);
    assert!(ed.status_text().is_some_and(|t| t.contains("WARNING")));
    assert_eq!(ed.handle_key(Key::Ctrl('q')), KeyOutcome::Quit);
}

#[test]
fn test_quit_counter_resets_on_any_other_key() {
    let mut ed = Editor::new(80, 24);
    type_text(&mut ed, "x");

    assert_eq!(ed.handle_key(Key::Ctrl('q')), KeyOutcome::Continue);
    assert_eq!(ed.handle_key(Key::Left), KeyOutcome::Continue);

    // a full confirmation round is needed again
    assert_eq!(ed.handle_key(Key::Ctrl('q')), KeyOutcome::Continue);
    assert_eq!(ed.handle_key(Key::Ctrl('q')), KeyOutcome::Quit);
}

#[test]
fn test_backspace_joins_then_typing_continues() {
    let mut ed = Editor::new(80, 24);
    type_text(&mut ed, "ab\ncd");

    // cursor to start of line 1, then join
    ed.handle_key(Key::Home);
    ed.handle_key(Key::Backspace);
    assert_eq!(ed.document().line(0).unwrap().raw(), "abcd");
    assert_eq!(ed.cursor(), (0, 2));

    type_text(&mut ed, "X");
    assert_eq!(ed.document().line(0).unwrap().raw(), "abXcd");
}

#[test]
fn test_search_wraps_around_document() {
    let mut doc = Document::new();
    for (i, text) in ["foo", "bar", "foo"].iter().enumerate() {
        doc.insert_line(i, text);
    }

    let mut search = Search::new();
    assert_eq!(search.on_key(&Key::Char('o'), "foo", &doc), Some((0, 0)));
    assert_eq!(search.on_key(&Key::Right, "foo", &doc), Some((2, 0)));
    // wraps back to the first hit
    assert_eq!(search.on_key(&Key::Right, "foo", &doc), Some((0, 0)));
    // and backward from there wraps to the end again
    assert_eq!(search.on_key(&Key::Left, "foo", &doc), Some((2, 0)));
}

#[test]
fn test_save_and_reload_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.txt");

    let mut ed = Editor::new(80, 24);
    type_text(&mut ed, "first\nsecond\n");
    sumi::fileio::save(&path, &ed.document().to_text()).unwrap();

    let mut reopened = Editor::new(80, 24);
    reopened.open(&path).unwrap();
    assert_eq!(reopened.document().line_count(), 3);
    assert_eq!(reopened.document().line(1).unwrap().raw(), "second");
    assert!(!reopened.document().is_dirty());
}

#[test]
fn test_open_detects_profile_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prog.c");
    std::fs::write(&path, "int main() { return 0; }\n").unwrap();

    let mut ed = Editor::new(80, 24);
    ed.open(&path).unwrap();
    assert_eq!(ed.document().profile().map(|p| p.name), Some("c"));
    assert_eq!(ed.document().line(0).unwrap().tags()[0].code(), 't');
}
