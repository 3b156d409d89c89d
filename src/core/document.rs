//! The line buffer
//!
//! An ordered sequence of lines addressed by index; the position in the
//! vector is the line number, so structural edits renumber implicitly.
//! Every mutation re-derives the affected line's rendered form and tags,
//! then cascades the highlight forward while the open-comment flag keeps
//! changing. Out-of-range operations are silent no-ops; callers rely on
//! cursor clamping, not error codes.

use tracing::debug;

use crate::core::line::Line;
use crate::core::TAB_STOP;
use crate::syntax::Profile;

/// The in-memory document: all line data, the dirty counter, and the
/// active syntax profile
#[derive(Debug, Default)]
pub struct Document {
    lines: Vec<Line>,
    dirty: u64,
    profile: Option<&'static Profile>,
    tab_stop: usize,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            dirty: 0,
            profile: None,
            tab_stop: TAB_STOP,
        }
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Borrow a line by index
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// All lines in order
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// True if the document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    /// Mark the current state as written to disk
    pub fn mark_saved(&mut self) {
        self.dirty = 0;
    }

    /// Tab stop width used for rendering
    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    /// Active syntax profile, if any
    pub fn profile(&self) -> Option<&'static Profile> {
        self.profile
    }

    /// Switch syntax profile and re-derive every line's tags
    pub fn set_profile(&mut self, profile: Option<&'static Profile>) {
        self.profile = profile;
        for index in 0..self.lines.len() {
            let prev_open = index > 0 && self.lines[index - 1].open_comment();
            self.lines[index].update_tags(self.profile, prev_open);
        }
    }

    /// Insert a new line at `index`; out of range is a no-op
    pub fn insert_line(&mut self, index: usize, text: &str) {
        if index > self.lines.len() {
            return;
        }
        debug!(index, len = text.len(), "insert line");
        self.lines.insert(index, Line::new(text, self.tab_stop));
        self.rehighlight_from(index);
        self.dirty += 1;
    }

    /// Remove the line at `index`; out of range is a no-op
    pub fn delete_line(&mut self, index: usize) {
        if index >= self.lines.len() {
            return;
        }
        debug!(index, "delete line");
        self.lines.remove(index);
        // the line now at `index` has a new predecessor
        self.rehighlight_from(index);
        self.dirty += 1;
    }

    /// Split a line at a column: column 0 inserts an empty line before it,
    /// anything else moves the suffix onto a new following line. The caller
    /// is expected to move its cursor to the start of the next row.
    pub fn split_line(&mut self, row: usize, column: usize) {
        if column == 0 {
            self.insert_line(row, "");
            return;
        }
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let suffix = line.split_off(column, self.tab_stop);
        self.insert_line(row + 1, &suffix);
        self.rehighlight_from(row);
        self.dirty += 1;
    }

    /// Append line `row`'s content to the line above and remove it;
    /// `row == 0` is a no-op
    pub fn join_with_previous(&mut self, row: usize) {
        if row == 0 || row >= self.lines.len() {
            return;
        }
        let text = self.lines[row].raw().to_string();
        self.lines[row - 1].append(&text, self.tab_stop);
        self.rehighlight_from(row - 1);
        self.delete_line(row);
        self.dirty += 1;
    }

    /// Insert a character into a line; the column clamps to the line end
    pub fn insert_char(&mut self, row: usize, column: usize, ch: char) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        line.insert_char(column, ch, self.tab_stop);
        self.rehighlight_from(row);
        self.dirty += 1;
    }

    /// Delete the character at a column; out of range is a no-op
    pub fn delete_char(&mut self, row: usize, column: usize) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        if column >= line.len() {
            return;
        }
        line.delete_char(column, self.tab_stop);
        self.rehighlight_from(row);
        self.dirty += 1;
    }

    /// Full document content for saving: every line terminated by a newline
    pub fn to_text(&self) -> String {
        let total: usize = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut text = String::with_capacity(total);
        for line in &self.lines {
            text.push_str(line.raw());
            text.push('\n');
        }
        text
    }

    /// Re-derive tags starting at `index`, walking forward while the
    /// open-comment flag keeps changing. A single inserted `/*` or `*/`
    /// re-colors the whole following region this way, without recursion.
    fn rehighlight_from(&mut self, mut index: usize) {
        while index < self.lines.len() {
            let prev_open = index > 0 && self.lines[index - 1].open_comment();
            let changed = self.lines[index].update_tags(self.profile, prev_open);
            if !changed {
                break;
            }
            index += 1;
        }
    }
}
