//! Deterministic snapshot generation
//!
//! Snapshots capture the document and its derived highlight state in a
//! serializable form for testing and debugging. Given the same edits, the
//! document must produce identical snapshots. Tags are encoded one
//! character per rendered column (see [`Tag::code`]).
//!
//! [`Tag::code`]: crate::syntax::Tag::code

use serde::{Deserialize, Serialize};

use super::document::Document;
use super::line::Line;

/// A complete snapshot of the document state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All lines in order
    pub lines: Vec<LineSnapshot>,
    /// Whether unsaved changes exist
    pub dirty: bool,
}

/// Snapshot of a single line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSnapshot {
    /// Raw text as typed
    pub raw: String,
    /// Tab-expanded text
    pub rendered: String,
    /// One classification code per rendered character
    pub tags: String,
    /// Block comment still open at end of line
    pub open_comment: bool,
}

impl From<&Line> for LineSnapshot {
    fn from(line: &Line) -> Self {
        LineSnapshot {
            raw: line.raw().to_string(),
            rendered: line.rendered().to_string(),
            tags: line.tags().iter().map(|t| t.code()).collect(),
            open_comment: line.open_comment(),
        }
    }
}

impl Snapshot {
    /// Capture the current document state
    pub fn from_document(doc: &Document) -> Self {
        Snapshot {
            lines: doc.lines().iter().map(LineSnapshot::from).collect(),
            dirty: doc.is_dirty(),
        }
    }

    /// Convert snapshot to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse snapshot from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
