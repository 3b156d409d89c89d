//! Error types for the editor

use std::io;
use thiserror::Error;

/// Editor error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Low-level system call failure
    #[error("system error: {0}")]
    Nix(#[from] nix::Error),

    /// The terminal dimensions could not be determined
    #[error("cannot determine terminal size")]
    WindowSize,
}

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, Error>;
