//! The editor context and key dispatch
//!
//! One owned `Editor` value holds the document, cursor, viewport, and all
//! session state; everything is threaded through it explicitly. Key
//! handling is split from terminal I/O: [`Editor::handle_key`] is pure
//! state transition and returns what the main loop should do next, so the
//! whole dispatch table is testable without a tty.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::core::{Document, TAB_STOP};
use crate::error::Result;
use crate::fileio;
use crate::input::Key;
use crate::syntax::detect;
use crate::term::Terminal;
use crate::ui::{gutter_width, Frame, MatchOverlay, Search, StatusInfo, Viewport};

/// Ctrl-Q presses required to abandon unsaved changes
const QUIT_CONFIRM: u32 = 2;

/// How long a status message stays visible
const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

const GREETINGS: [&str; 6] = [
    "Welcome friend :)",
    "Be kind!",
    "Since 1993!",
    "Try ed!",
    "As seen on TV!",
    "Almost never crashes!",
];

/// Mode label shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Edit,
    Command,
}

impl Mode {
    fn label(self) -> &'static str {
        match self {
            Mode::Edit => "EDIT",
            Mode::Command => "CMND",
        }
    }
}

/// What the main loop should do after a keypress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
    Save,
    Find,
}

#[derive(Debug)]
struct StatusMessage {
    text: String,
    at: Instant,
    error: bool,
}

/// The whole editing session
pub struct Editor {
    doc: Document,
    /// Cursor position: logical column and row
    cx: usize,
    cy: usize,
    /// Rendered cursor column, derived each frame
    rx: usize,
    view: Viewport,
    filename: Option<PathBuf>,
    status: Option<StatusMessage>,
    mode: Mode,
    quit_times: u32,
    show_line_numbers: bool,
    hard_tabs: bool,
    overlay: Option<MatchOverlay>,
}

impl Editor {
    /// Create an editor for a window of the given size. Two rows are
    /// reserved for the status and message bars.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            doc: Document::new(),
            cx: 0,
            cy: 0,
            rx: 0,
            view: Viewport::new(columns, rows.saturating_sub(2)),
            filename: None,
            status: None,
            mode: Mode::Edit,
            quit_times: QUIT_CONFIRM,
            show_line_numbers: true,
            hard_tabs: false,
            overlay: None,
        }
    }

    /// Load a file into the buffer. A missing file starts a fresh buffer
    /// under that name.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        self.filename = Some(path.to_path_buf());
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        self.doc
            .set_profile(name.as_deref().and_then(detect));

        match fileio::load(path) {
            Ok(lines) => {
                for (i, line) in lines.iter().enumerate() {
                    self.doc.insert_line(i, line);
                }
                self.doc.mark_saved();
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.doc.insert_line(0, "");
                self.doc.mark_saved();
                self.set_message("New file");
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Cursor as `(row, column)`
    pub fn cursor(&self) -> (usize, usize) {
        (self.cy, self.cx)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current message bar text, if a message is showing
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|m| m.text.as_str())
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            at: Instant::now(),
            error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        warn!(message = %text, "error status");
        self.status = Some(StatusMessage {
            text,
            at: Instant::now(),
            error: true,
        });
    }

    /// Pick a startup message, seeded from the clock.
    pub fn set_greeting(&mut self) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.subsec_nanos());
        self.set_message(GREETINGS[nanos as usize % GREETINGS.len()]);
    }

    /// Apply one keypress to the editor state.
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Ctrl('q') => {
                if self.doc.is_dirty() && self.quit_times > 1 {
                    self.quit_times -= 1;
                    self.set_error(format!(
                        "WARNING! Unsaved changes. Press Ctrl-Q {} more time to quit.",
                        self.quit_times
                    ));
                    // the counter must survive until the next keypress
                    return KeyOutcome::Continue;
                }
                return KeyOutcome::Quit;
            }
            Key::Ctrl('b') => return KeyOutcome::Quit,
            Key::Ctrl('s') => {
                self.quit_times = QUIT_CONFIRM;
                return KeyOutcome::Save;
            }
            Key::Ctrl('f') => {
                self.quit_times = QUIT_CONFIRM;
                return KeyOutcome::Find;
            }
            Key::Escape => {
                self.mode = match self.mode {
                    Mode::Edit => Mode::Command,
                    Mode::Command => Mode::Edit,
                };
            }
            Key::Enter => self.insert_newline(),
            Key::Tab => self.insert_tab(),
            Key::Backspace | Key::Ctrl('h') => self.delete_back(),
            Key::Delete => {
                self.move_cursor(Key::Right);
                self.delete_back();
            }
            Key::Home => self.cx = 0,
            Key::End => self.cx = self.line_len(self.cy),
            Key::PageUp | Key::PageDown => self.page(key),
            Key::Up | Key::Down | Key::Left | Key::Right => self.move_cursor(key),
            Key::Char(c) if !c.is_control() => self.insert_char(c),
            _ => {}
        }

        self.quit_times = QUIT_CONFIRM;
        KeyOutcome::Continue
    }

    /// The event loop: render, read, dispatch. A read timeout falls
    /// through to the next render so stale messages expire.
    pub fn run(&mut self, term: &mut Terminal) -> Result<()> {
        loop {
            self.refresh(term)?;
            let Some(key) = term.read_key()? else {
                continue;
            };
            match self.handle_key(key) {
                KeyOutcome::Continue => {}
                KeyOutcome::Quit => return Ok(()),
                KeyOutcome::Save => self.save(term)?,
                KeyOutcome::Find => self.find(term)?,
            }
        }
    }

    fn line_len(&self, row: usize) -> usize {
        self.doc.line(row).map_or(0, |l| l.len())
    }

    fn insert_char(&mut self, c: char) {
        if self.cy == self.doc.line_count() {
            self.doc.insert_line(self.cy, "");
        }
        self.doc.insert_char(self.cy, self.cx, c);
        self.cx += 1;
    }

    fn insert_newline(&mut self) {
        if self.cy == self.doc.line_count() {
            self.doc.insert_line(self.cy, "");
        } else {
            self.doc.split_line(self.cy, self.cx);
        }
        self.cy += 1;
        self.cx = 0;
    }

    /// Makefiles need real tabs; everyone else gets spaces unless the
    /// hard-tab option is on.
    fn insert_tab(&mut self) {
        let makefile = self
            .filename
            .as_deref()
            .and_then(Path::file_name)
            .is_some_and(|n| n == "Makefile" || n == "makefile");
        if self.hard_tabs || makefile {
            self.insert_char('\t');
        } else {
            for _ in 0..TAB_STOP {
                self.insert_char(' ');
            }
        }
    }

    fn delete_back(&mut self) {
        if self.cy == self.doc.line_count() {
            return;
        }
        if self.cx == 0 && self.cy == 0 {
            return;
        }
        if self.cx > 0 {
            self.doc.delete_char(self.cy, self.cx - 1);
            self.cx -= 1;
        } else {
            self.cx = self.line_len(self.cy - 1);
            self.doc.join_with_previous(self.cy);
            self.cy -= 1;
        }
    }

    fn move_cursor(&mut self, key: Key) {
        match key {
            Key::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = self.line_len(self.cy);
                }
            }
            Key::Right => {
                if self.cy < self.doc.line_count() {
                    if self.cx < self.line_len(self.cy) {
                        self.cx += 1;
                    } else {
                        self.cy += 1;
                        self.cx = 0;
                    }
                }
            }
            Key::Up => self.cy = self.cy.saturating_sub(1),
            Key::Down => {
                if self.cy < self.doc.line_count() {
                    self.cy += 1;
                }
            }
            _ => {}
        }

        // the destination line may be shorter
        let len = self.line_len(self.cy);
        if self.cx > len {
            self.cx = len;
        }
    }

    fn page(&mut self, key: Key) {
        let step = match key {
            Key::PageUp => {
                self.cy = self.view.y_offset;
                Key::Up
            }
            _ => {
                self.cy = (self.view.y_offset + self.view.height - 1)
                    .min(self.doc.line_count());
                Key::Down
            }
        };
        for _ in 0..self.view.height {
            self.move_cursor(step);
        }
    }

    fn expire_message(&mut self) {
        if self
            .status
            .as_ref()
            .is_some_and(|m| m.at.elapsed() > MESSAGE_TIMEOUT)
        {
            self.status = None;
        }
    }

    /// Render one frame: derive the rendered cursor column, pull the
    /// viewport to the cursor, compose, write.
    fn refresh(&mut self, term: &Terminal) -> Result<()> {
        self.expire_message();

        self.rx = self
            .doc
            .line(self.cy)
            .map_or(0, |l| l.render_col(self.cx, self.doc.tab_stop()));

        let gutter = gutter_width(&self.doc, self.show_line_numbers);
        self.view
            .scroll(self.cy, self.rx, self.view.width.saturating_sub(gutter));

        let filename = self
            .filename
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned());
        let status = StatusInfo {
            mode: self.mode.label(),
            filename: filename.as_deref(),
            dirty: self.doc.is_dirty(),
            profile: self.doc.profile().map(|p| p.name),
            line: self.cy,
            column: self.cx,
            line_count: self.doc.line_count(),
        };
        let message = self.status.as_ref().map(|m| (m.text.as_str(), m.error));

        let frame = Frame::new(&self.doc, &self.view, self.overlay, gutter)
            .compose(&status, message, self.cy, self.rx);
        term.write_frame(&frame)
    }

    /// Single-line prompt on the message bar. `callback` observes every
    /// keystroke with the buffer as it stands; Escape cancels, Enter
    /// accepts non-empty input.
    fn prompt<F>(&mut self, term: &mut Terminal, label: &str, mut callback: F) -> Result<Option<String>>
    where
        F: FnMut(&mut Self, &str, &Key),
    {
        let mut buf = String::new();
        loop {
            self.set_message(format!("{}{}", label, buf));
            self.refresh(term)?;
            let Some(key) = term.read_key()? else {
                continue;
            };

            match key {
                Key::Escape => {
                    callback(self, &buf, &key);
                    self.status = None;
                    return Ok(None);
                }
                Key::Enter => {
                    if !buf.is_empty() {
                        callback(self, &buf, &key);
                        self.status = None;
                        return Ok(Some(buf));
                    }
                }
                Key::Backspace | Key::Ctrl('h') => {
                    buf.pop();
                    callback(self, &buf, &key);
                }
                Key::Char(c) if !c.is_control() => {
                    buf.push(c);
                    callback(self, &buf, &key);
                }
                _ => callback(self, &buf, &key),
            }
        }
    }

    /// Write the buffer to disk, prompting for a name the first time.
    fn save(&mut self, term: &mut Terminal) -> Result<()> {
        if self.filename.is_none() {
            match self.prompt(term, "Write as: ", |_, _, _| {})? {
                Some(name) => {
                    self.doc.set_profile(detect(&name));
                    self.filename = Some(PathBuf::from(name));
                }
                None => {
                    self.set_message("Write aborted");
                    return Ok(());
                }
            }
        }
        let Some(path) = self.filename.clone() else {
            return Ok(());
        };

        match fileio::save(&path, &self.doc.to_text()) {
            Ok(bytes) => {
                self.doc.mark_saved();
                self.set_message(format!("{} bytes written to disk", bytes));
            }
            Err(e) => self.set_error(format!("Can't save! I/O error: {}", e)),
        }
        Ok(())
    }

    /// Incremental search. The cursor and scroll position are restored if
    /// the prompt is cancelled; Enter keeps the last match position.
    fn find(&mut self, term: &mut Terminal) -> Result<()> {
        let saved = (self.cx, self.cy, self.view.x_offset, self.view.y_offset);
        let mut search = Search::new();

        let accepted = self.prompt(term, "Search: ", |ed, query, key| {
            if let Some((row, column)) = search.on_key(key, query, &ed.doc) {
                debug!(row, column, "search hit");
                ed.cy = row;
                ed.cx = column;
                // force the next scroll to bring the match into view from
                // the top
                ed.view.y_offset = ed.doc.line_count();
            }
            ed.overlay = search.overlay;
        })?;

        self.overlay = None;
        if accepted.is_none() {
            (self.cx, self.cy, self.view.x_offset, self.view.y_offset) = saved;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(lines: &[&str]) -> Editor {
        let mut ed = Editor::new(80, 24);
        for (i, line) in lines.iter().enumerate() {
            ed.doc.insert_line(i, line);
        }
        ed
    }

    #[test]
    fn test_insert_on_virtual_line_appends() {
        let mut ed = Editor::new(80, 24);
        assert_eq!(ed.handle_key(Key::Char('a')), KeyOutcome::Continue);
        assert_eq!(ed.document().line_count(), 1);
        assert_eq!(ed.document().line(0).unwrap().raw(), "a");
        assert_eq!(ed.cursor(), (0, 1));
    }

    #[test]
    fn test_enter_splits_and_moves_cursor() {
        let mut ed = editor_with(&["hello"]);
        ed.cx = 2;
        ed.handle_key(Key::Enter);
        assert_eq!(ed.document().line(0).unwrap().raw(), "he");
        assert_eq!(ed.document().line(1).unwrap().raw(), "llo");
        assert_eq!(ed.cursor(), (1, 0));
    }

    #[test]
    fn test_backspace_at_column_zero_joins() {
        let mut ed = editor_with(&["ab", "cd"]);
        ed.cy = 1;
        ed.handle_key(Key::Backspace);
        assert_eq!(ed.document().line_count(), 1);
        assert_eq!(ed.document().line(0).unwrap().raw(), "abcd");
        assert_eq!(ed.cursor(), (0, 2));
    }

    #[test]
    fn test_delete_forward() {
        let mut ed = editor_with(&["abc"]);
        ed.cx = 1;
        ed.handle_key(Key::Delete);
        assert_eq!(ed.document().line(0).unwrap().raw(), "ac");
        assert_eq!(ed.cursor(), (0, 1));
    }

    #[test]
    fn test_arrow_clamps_to_shorter_line() {
        let mut ed = editor_with(&["long line", "x"]);
        ed.cx = 8;
        ed.handle_key(Key::Down);
        assert_eq!(ed.cursor(), (1, 1));
    }

    #[test]
    fn test_left_at_line_start_wraps_up() {
        let mut ed = editor_with(&["ab", "cd"]);
        ed.cy = 1;
        ed.handle_key(Key::Left);
        assert_eq!(ed.cursor(), (0, 2));
    }

    #[test]
    fn test_right_at_line_end_wraps_down() {
        let mut ed = editor_with(&["ab", "cd"]);
        ed.cx = 2;
        ed.handle_key(Key::Right);
        assert_eq!(ed.cursor(), (1, 0));
    }

    #[test]
    fn test_quit_requires_confirmation_when_dirty() {
        let mut ed = editor_with(&["x"]);
        assert!(ed.document().is_dirty());

        // first press warns
        assert_eq!(ed.handle_key(Key::Ctrl('q')), KeyOutcome::Continue);
        assert!(ed.status_text().is_some_and(|t| t.contains("WARNING")));
        // second press quits
        assert_eq!(ed.handle_key(Key::Ctrl('q')), KeyOutcome::Quit);
    }

    #[test]
    fn test_other_key_resets_quit_counter() {
        let mut ed = editor_with(&["x"]);
        assert_eq!(ed.handle_key(Key::Ctrl('q')), KeyOutcome::Continue);
        ed.handle_key(Key::Down);
        // the counter is back at the start, so this warns again
        assert_eq!(ed.handle_key(Key::Ctrl('q')), KeyOutcome::Continue);
        assert_eq!(ed.handle_key(Key::Ctrl('q')), KeyOutcome::Quit);
    }

    #[test]
    fn test_quit_immediate_when_clean() {
        let mut ed = editor_with(&["x"]);
        ed.doc.mark_saved();
        assert_eq!(ed.handle_key(Key::Ctrl('q')), KeyOutcome::Quit);
    }

    #[test]
    fn test_ctrl_b_quits_unconditionally() {
        let mut ed = editor_with(&["x"]);
        assert!(ed.document().is_dirty());
        assert_eq!(ed.handle_key(Key::Ctrl('b')), KeyOutcome::Quit);
    }

    #[test]
    fn test_escape_toggles_mode() {
        let mut ed = Editor::new(80, 24);
        assert_eq!(ed.mode(), Mode::Edit);
        ed.handle_key(Key::Escape);
        assert_eq!(ed.mode(), Mode::Command);
        ed.handle_key(Key::Escape);
        assert_eq!(ed.mode(), Mode::Edit);
    }

    #[test]
    fn test_tab_inserts_spaces_by_default() {
        let mut ed = editor_with(&[""]);
        ed.handle_key(Key::Tab);
        assert_eq!(ed.document().line(0).unwrap().raw(), "    ");
    }

    #[test]
    fn test_tab_in_makefile_is_hard() {
        let mut ed = editor_with(&[""]);
        ed.filename = Some(PathBuf::from("src/Makefile"));
        ed.handle_key(Key::Tab);
        assert_eq!(ed.document().line(0).unwrap().raw(), "\t");
    }

    #[test]
    fn test_home_and_end() {
        let mut ed = editor_with(&["hello"]);
        ed.handle_key(Key::End);
        assert_eq!(ed.cursor(), (0, 5));
        ed.handle_key(Key::Home);
        assert_eq!(ed.cursor(), (0, 0));
    }

    #[test]
    fn test_page_down_stops_at_end() {
        let mut ed = editor_with(&["a", "b", "c"]);
        ed.handle_key(Key::PageDown);
        assert_eq!(ed.cursor().0, 3); // virtual line after the last row
    }

    #[test]
    fn test_control_chars_ignored() {
        let mut ed = editor_with(&["x"]);
        ed.handle_key(Key::Ctrl('z'));
        assert_eq!(ed.document().line(0).unwrap().raw(), "x");
    }

    #[test]
    fn test_open_missing_file_starts_fresh() {
        let mut ed = Editor::new(80, 24);
        let dir = tempfile::tempdir().unwrap();
        ed.open(&dir.path().join("new.c")).unwrap();

        assert_eq!(ed.document().line_count(), 1);
        assert!(!ed.document().is_dirty());
        assert_eq!(ed.status_text(), Some("New file"));
        assert_eq!(ed.document().profile().map(|p| p.name), Some("c"));
    }

    #[test]
    fn test_open_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "one\ntwo\n").unwrap();

        let mut ed = Editor::new(80, 24);
        ed.open(&path).unwrap();
        assert_eq!(ed.document().line_count(), 2);
        assert!(!ed.document().is_dirty());
        assert!(ed.document().profile().is_none());
    }
}
