//! One line of the document
//!
//! A line owns three views of the same text: the raw characters as typed,
//! the rendered form with tabs expanded, and one highlight tag per rendered
//! character. `tags.len() == rendered.len()` holds at all times; the
//! open-comment flag records whether a block comment begun on or before this
//! line is still open when it ends.

use crate::core::column::{expand_tabs, to_logical, to_rendered};
use crate::syntax::{self, Profile, Tag};

/// A single row of text and its derived render/highlight state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    raw: String,
    rendered: String,
    tags: Vec<Tag>,
    open_comment: bool,
}

impl Line {
    /// Create a line from raw text, deriving its rendered form. Tags start
    /// out Normal until the owning document runs the highlighter.
    pub fn new(text: &str, tab_stop: usize) -> Self {
        let rendered = expand_tabs(text, tab_stop);
        let tags = vec![Tag::Normal; rendered.len()];
        Self {
            raw: text.to_string(),
            rendered,
            tags,
            open_comment: false,
        }
    }

    /// The text as typed, tabs included
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The tab-expanded text shown on screen
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// One tag per rendered character
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// True if a block comment is still open at the end of this line
    pub fn open_comment(&self) -> bool {
        self.open_comment
    }

    /// Logical length in characters
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Rendered width in columns
    pub fn rendered_len(&self) -> usize {
        self.rendered.len()
    }

    /// Rendered column of the given logical offset
    pub fn render_col(&self, column: usize, tab_stop: usize) -> usize {
        to_rendered(&self.raw, column, tab_stop)
    }

    /// Logical offset covering the given rendered column
    pub fn logical_col(&self, rendered_column: usize, tab_stop: usize) -> usize {
        to_logical(&self.raw, rendered_column, tab_stop)
    }

    /// Insert a character, clamping an out-of-range offset to the end
    pub fn insert_char(&mut self, at: usize, ch: char, tab_stop: usize) {
        let at = if at > self.raw.len() || !self.raw.is_char_boundary(at) {
            self.raw.len()
        } else {
            at
        };
        self.raw.insert(at, ch);
        self.rebuild(tab_stop);
    }

    /// Delete the character at `at`; out of range is a no-op
    pub fn delete_char(&mut self, at: usize, tab_stop: usize) {
        if at >= self.raw.len() || !self.raw.is_char_boundary(at) {
            return;
        }
        self.raw.remove(at);
        self.rebuild(tab_stop);
    }

    /// Append raw text to the end of the line
    pub fn append(&mut self, text: &str, tab_stop: usize) {
        self.raw.push_str(text);
        self.rebuild(tab_stop);
    }

    /// Split the line at `at`, keeping the prefix and returning the suffix
    pub fn split_off(&mut self, at: usize, tab_stop: usize) -> String {
        let at = at.min(self.raw.len());
        let suffix = self.raw.split_off(at);
        self.rebuild(tab_stop);
        suffix
    }

    /// Re-run the highlighter against this line. Returns whether the
    /// open-comment flag changed, which tells the document to keep walking
    /// forward.
    pub fn update_tags(&mut self, profile: Option<&Profile>, prev_open: bool) -> bool {
        let (tags, open) = syntax::highlight(profile, &self.raw, &self.rendered, prev_open);
        self.tags = tags;
        let changed = open != self.open_comment;
        self.open_comment = open;
        changed
    }

    fn rebuild(&mut self, tab_stop: usize) {
        self.rendered = expand_tabs(&self.raw, tab_stop);
        // keep the length invariant until the next highlight pass
        self.tags = vec![Tag::Normal; self.rendered.len()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_new_expands_tabs() {
        let line = Line::new("\tx", 4);
        assert_eq!(line.raw(), "\tx");
        assert_eq!(line.rendered(), "    x");
        assert_eq!(line.tags().len(), line.rendered_len());
        assert!(!line.open_comment());
    }

    #[test]
    fn test_insert_char_clamps() {
        let mut line = Line::new("ab", 4);
        line.insert_char(99, 'c', 4);
        assert_eq!(line.raw(), "abc");
        line.insert_char(0, 'z', 4);
        assert_eq!(line.raw(), "zabc");
    }

    #[test]
    fn test_delete_char_out_of_range_is_noop() {
        let mut line = Line::new("ab", 4);
        line.delete_char(5, 4);
        assert_eq!(line.raw(), "ab");
        line.delete_char(1, 4);
        assert_eq!(line.raw(), "a");
    }

    #[test]
    fn test_split_off() {
        let mut line = Line::new("hello world", 4);
        let suffix = line.split_off(5, 4);
        assert_eq!(line.raw(), "hello");
        assert_eq!(suffix, " world");
    }

    #[test]
    fn test_append_rebuilds_rendered() {
        let mut line = Line::new("a", 4);
        line.append("\tb", 4);
        assert_eq!(line.rendered(), "a   b");
        assert_eq!(line.tags().len(), 5);
    }

    #[test]
    fn test_tags_track_rendered_length() {
        let mut line = Line::new("", 4);
        line.insert_char(0, '\t', 4);
        assert_eq!(line.rendered_len(), 4);
        assert_eq!(line.tags().len(), 4);
    }
}
