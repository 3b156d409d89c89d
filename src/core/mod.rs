//! Document model
//!
//! - `line`: one row of text with its rendered (tab-expanded) form and
//!   per-character highlight tags
//! - `column`: pure logical-offset / rendered-column conversions
//! - `document`: the ordered line buffer and every editing operation
//! - `snapshot`: serializable state capture for tests

pub mod column;
pub mod document;
pub mod line;
pub mod snapshot;

pub use column::{expand_tabs, to_logical, to_rendered};
pub use document::Document;
pub use line::Line;
pub use snapshot::Snapshot;

/// Default tab stop width in rendered columns.
pub const TAB_STOP: usize = 4;
