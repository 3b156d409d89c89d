//! Viewport, frame rendering, and incremental search

pub mod frame;
pub mod search;
pub mod viewport;

pub use frame::{gutter_width, Frame, StatusInfo};
pub use search::{MatchOverlay, Search};
pub use viewport::Viewport;
