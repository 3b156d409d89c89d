//! sumi: a small terminal text editor
//!
//! A line-buffer editor with incremental syntax highlighting, tab-aware
//! column mapping, and incremental search, drawn directly on the tty with
//! batched escape-sequence frames.
//!
//! The `core` module holds the document model and is free of terminal
//! concerns; `syntax` derives highlight tags; `ui` turns document state
//! into frames; `term` and `input` are the raw-mode platform layer; the
//! `editor` module ties it all together around one owned [`Editor`] value.
//!
//! [`Editor`]: editor::Editor

pub mod core;
pub mod editor;
pub mod error;
pub mod fileio;
pub mod input;
pub mod syntax;
pub mod term;
pub mod ui;

pub use error::{Error, Result};
