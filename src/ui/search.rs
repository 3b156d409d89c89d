//! Incremental search over the document
//!
//! Driven one keystroke at a time from the search prompt: arrows choose the
//! direction and continue from the last hit, editing the query restarts
//! from the top, Enter/Escape end the session. The current hit is exposed
//! as a transient overlay consumed by the renderer; the highlighter's own
//! tags are never touched.

use crate::core::{to_logical, Document};
use crate::input::Key;

/// The current search hit, in rendered coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOverlay {
    pub row: usize,
    /// Rendered column where the match starts
    pub offset: usize,
    /// Match length in rendered characters
    pub len: usize,
}

/// Incremental search state
#[derive(Debug, Default)]
pub struct Search {
    last_match: Option<usize>,
    backward: bool,
    /// Overlay for the current hit, if any
    pub overlay: Option<MatchOverlay>,
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one prompt keystroke and re-run the search. Returns the new
    /// cursor position `(row, column)` on a hit.
    ///
    /// The overlay is always cleared first; a hit installs a fresh one, so
    /// a query with no match leaves no stale highlight behind.
    pub fn on_key(&mut self, key: &Key, query: &str, doc: &Document) -> Option<(usize, usize)> {
        self.overlay = None;

        match key {
            Key::Enter | Key::Escape => {
                self.last_match = None;
                self.backward = false;
                return None;
            }
            Key::Right | Key::Down => self.backward = false,
            Key::Left | Key::Up => self.backward = true,
            _ => {
                // the query changed: restart from the top, forward
                self.last_match = None;
                self.backward = false;
            }
        }

        if self.last_match.is_none() {
            self.backward = false;
        }

        self.step(query, doc)
    }

    /// Scan the document circularly from one past the last match, at most
    /// one full revolution.
    fn step(&mut self, query: &str, doc: &Document) -> Option<(usize, usize)> {
        if query.is_empty() || doc.line_count() == 0 {
            return None;
        }

        let count = doc.line_count();
        let mut current = self.last_match;

        for _ in 0..count {
            let row = match (current, self.backward) {
                (None, false) => 0,
                (None, true) => count - 1,
                (Some(0), true) => count - 1,
                (Some(prev), true) => prev - 1,
                (Some(prev), false) => (prev + 1) % count,
            };
            current = Some(row);

            let Some(line) = doc.line(row) else { continue };
            if let Some(offset) = line.rendered().find(query) {
                self.last_match = Some(row);
                self.overlay = Some(MatchOverlay {
                    row,
                    offset,
                    len: query.len(),
                });
                let column = to_logical(line.raw(), offset, doc.tab_stop());
                return Some((row, column));
            }
        }

        None
    }
}
