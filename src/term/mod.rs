//! Raw-mode terminal handling
//!
//! Owns the tty for the duration of a session: switches to raw mode and the
//! alternate screen on construction and restores everything on drop, so a
//! panic or early return still leaves the shell usable. Reads are
//! byte-at-a-time with a 100ms timeout (VMIN=0, VTIME=1) so escape
//! sequences can be distinguished from a lone ESC keypress.

use std::io;

use nix::libc::{self, STDIN_FILENO, STDOUT_FILENO};
use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices,
    Termios,
};
use nix::unistd::read;
use tracing::debug;

use crate::error::{Error, Result};
use crate::input::{self, Key};

/// The terminal in raw mode; restores the original state on drop
pub struct Terminal {
    original: Termios,
}

impl Terminal {
    /// Switch the tty to raw mode and the alternate screen.
    pub fn new() -> Result<Self> {
        let original = termios::tcgetattr(io::stdin())?;

        let mut raw = original.clone();
        raw.input_flags &= !(InputFlags::BRKINT
            | InputFlags::ICRNL
            | InputFlags::INPCK
            | InputFlags::ISTRIP
            | InputFlags::IXON);
        raw.output_flags &= !OutputFlags::OPOST;
        raw.control_flags |= ControlFlags::CS8;
        raw.local_flags &=
            !(LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG);
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 1;
        termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, &raw)?;

        let term = Self { original };
        term.write_frame(b"\x1b[?47h")?;
        Ok(term)
    }

    /// Window size as `(columns, rows)`. Asks the kernel first, then falls
    /// back to parking the cursor at the far corner and reading its
    /// position back.
    pub fn size(&self) -> Result<(usize, usize)> {
        let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
        // SAFETY: TIOCGWINSZ reads into a zeroed winsize
        let result = unsafe { libc::ioctl(STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };
        if result != -1 && ws.ws_col != 0 {
            return Ok((ws.ws_col as usize, ws.ws_row as usize));
        }

        debug!("TIOCGWINSZ failed, falling back to cursor report");
        self.write_frame(b"\x1b[999C\x1b[999B\x1b[6n")?;

        let mut report = Vec::new();
        loop {
            let mut byte = [0u8; 1];
            match read(STDIN_FILENO, &mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    if byte[0] == b'R' {
                        break;
                    }
                    report.push(byte[0]);
                }
                Err(nix::errno::Errno::EINTR) => continue,
                Err(e) => return Err(Error::Nix(e)),
            }
        }

        parse_cursor_report(&report).ok_or(Error::WindowSize)
    }

    /// Read one keypress. `Ok(None)` means the read timed out.
    pub fn read_key(&self) -> Result<Option<Key>> {
        let Some(byte) = self.read_byte()? else {
            return Ok(None);
        };

        if byte != 0x1b {
            return Ok(Some(input::from_byte(byte)));
        }

        // collect the rest of the escape sequence; a timeout at any point
        // means the user pressed a bare ESC
        let mut seq = Vec::with_capacity(3);
        for _ in 0..2 {
            match self.read_byte()? {
                Some(b) => seq.push(b),
                None => return Ok(Some(Key::Escape)),
            }
        }
        if seq[0] == b'[' && seq[1].is_ascii_digit() {
            match self.read_byte()? {
                Some(b) => seq.push(b),
                None => return Ok(Some(Key::Escape)),
            }
        }

        Ok(Some(input::parse_escape(&seq)))
    }

    fn read_byte(&self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match read(STDIN_FILENO, &mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(nix::errno::Errno::EAGAIN) | Err(nix::errno::Errno::EINTR) => continue,
                Err(e) => return Err(Error::Nix(e)),
            }
        }
    }

    /// Write a complete frame to the tty in one burst.
    pub fn write_frame(&self, mut data: &[u8]) -> Result<()> {
        while !data.is_empty() {
            match nix::unistd::write(io::stdout(), data) {
                Ok(n) => data = &data[n..],
                Err(nix::errno::Errno::EINTR) => continue,
                Err(e) => return Err(Error::Nix(e)),
            }
        }
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // best effort: leave the alternate screen, then restore termios
        let _ = self.write_frame(b"\x1b[2J\x1b[H\x1b[?47l");
        let _ = termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, &self.original);
    }
}

/// Parse a `\x1b[{row};{col}` cursor position report (the trailing `R`
/// already stripped) into `(columns, rows)`.
pub fn parse_cursor_report(report: &[u8]) -> Option<(usize, usize)> {
    let text = std::str::from_utf8(report).ok()?;
    let rest = text.strip_prefix("\x1b[")?;
    let (rows, cols) = rest.split_once(';')?;
    let rows: usize = rows.parse().ok()?;
    let cols: usize = cols.parse().ok()?;
    Some((cols, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cursor_report() {
        assert_eq!(parse_cursor_report(b"\x1b[24;80"), Some((80, 24)));
        assert_eq!(parse_cursor_report(b"\x1b[1;1"), Some((1, 1)));
    }

    #[test]
    fn test_parse_cursor_report_malformed() {
        assert_eq!(parse_cursor_report(b""), None);
        assert_eq!(parse_cursor_report(b"24;80"), None);
        assert_eq!(parse_cursor_report(b"\x1b[24"), None);
        assert_eq!(parse_cursor_report(b"\x1b[a;b"), None);
    }
}
