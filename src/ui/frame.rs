//! Frame composition
//!
//! Builds one complete screen update as a single byte buffer: row slices
//! with syntax color runs, the optional line-number gutter, the status bar,
//! and the transient message bar. The whole frame is written to the
//! terminal in one call to avoid flicker. A color escape is emitted only
//! when the tag changes from the previous character.

use crate::core::Document;
use crate::syntax::Tag;

use super::search::MatchOverlay;
use super::viewport::Viewport;

const DEFAULT_BG: u8 = 233;
const DEFAULT_FG: u8 = 246;
const GUTTER_BG: u8 = 232;
const GUTTER_FG: u8 = 240;
const STATUS_BG: u8 = 235;
const STATUS_FG: u8 = 245;
const ERROR_BG: u8 = 131;
const ERROR_FG: u8 = 232;

/// Everything the status bar displays
#[derive(Debug)]
pub struct StatusInfo<'a> {
    /// Mode label, e.g. "EDIT"
    pub mode: &'a str,
    pub filename: Option<&'a str>,
    pub dirty: bool,
    /// Active syntax profile name
    pub profile: Option<&'a str>,
    /// Cursor row (0-based)
    pub line: usize,
    /// Cursor logical column (0-based)
    pub column: usize,
    pub line_count: usize,
}

/// One frame being composed
pub struct Frame<'a> {
    doc: &'a Document,
    view: &'a Viewport,
    overlay: Option<MatchOverlay>,
    gutter: usize,
    buf: Vec<u8>,
}

/// Width of the line-number gutter for a document, including the trailing
/// space; zero when the gutter is disabled or the document is empty.
pub fn gutter_width(doc: &Document, enabled: bool) -> usize {
    if !enabled || doc.line_count() == 0 {
        return 0;
    }
    let mut digits = 0;
    let mut n = doc.line_count();
    while n != 0 {
        n /= 10;
        digits += 1;
    }
    digits + 1
}

impl<'a> Frame<'a> {
    pub fn new(
        doc: &'a Document,
        view: &'a Viewport,
        overlay: Option<MatchOverlay>,
        gutter: usize,
    ) -> Self {
        Self {
            doc,
            view,
            overlay,
            gutter,
            buf: Vec::with_capacity(view.width * view.height * 2),
        }
    }

    /// Compose the full frame. `cy`/`rx` position the terminal cursor;
    /// `message` is the transient message text plus its error flag.
    pub fn compose(
        mut self,
        status: &StatusInfo<'_>,
        message: Option<(&str, bool)>,
        cy: usize,
        rx: usize,
    ) -> Vec<u8> {
        self.push(b"\x1b[?25l");
        self.push(b"\x1b[H");

        self.draw_rows();
        self.draw_status(status);
        self.draw_message(message);

        // place the cursor inside the window, past the gutter
        let row = cy - self.view.y_offset + 1;
        let col = rx + self.gutter - self.view.x_offset + 1;
        self.push_str(&format!("\x1b[{};{}H", row, col));
        self.push(b"\x1b[?25h");

        self.buf
    }

    fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    fn push_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    fn set_colors(&mut self, fg: u8, bg: u8) {
        self.push_str(&format!("\x1b[48;5;{}m\x1b[38;5;{}m", bg, fg));
    }

    fn set_default_colors(&mut self) {
        self.set_colors(DEFAULT_FG, DEFAULT_BG);
    }

    fn draw_rows(&mut self) {
        let banner_row = self.view.height / 4;

        for y in 0..self.view.height {
            self.set_default_colors();

            let row = y + self.view.y_offset;
            if row >= self.doc.line_count() {
                if self.doc.line_count() == 0 {
                    self.draw_banner_row(y, banner_row);
                } else {
                    self.push(b"~");
                }
            } else {
                if self.gutter > 0 {
                    self.draw_line_number(row);
                }
                self.draw_content_row(row);
            }

            self.push(b"\x1b[K");
            self.push(b"\r\n");
        }
    }

    /// Filler for rows past the end of an empty document, with a centered
    /// banner a quarter of the way down.
    fn draw_banner_row(&mut self, y: usize, banner_row: usize) {
        let text = match y.checked_sub(banner_row) {
            Some(0) => format!("sumi -- version {}", env!("CARGO_PKG_VERSION")),
            Some(2) => "Ctrl-S save | Ctrl-F find | Ctrl-Q quit".to_string(),
            _ => {
                self.push(b"~");
                return;
            }
        };

        let mut len = text.len();
        if len > self.view.width {
            len = self.view.width;
        }
        let mut padding = (self.view.width - len) / 2;
        if padding > 0 {
            self.push(b"~");
            padding -= 1;
        }
        for _ in 0..padding {
            self.push(b" ");
        }
        self.push(&text.as_bytes()[..len]);
    }

    fn draw_line_number(&mut self, row: usize) {
        self.set_colors(GUTTER_FG, GUTTER_BG);
        let number = format!("{:>width$} ", row + 1, width = self.gutter - 1);
        self.push_str(&number);
        self.set_default_colors();
    }

    fn draw_content_row(&mut self, row: usize) {
        let Some(line) = self.doc.line(row) else {
            return;
        };
        let width = self.view.width.saturating_sub(self.gutter);
        let start = self.view.x_offset.min(line.rendered_len());
        let end = (start + width).min(line.rendered_len());

        let bytes = &line.rendered().as_bytes()[start..end];
        let tags = &line.tags()[start..end];

        let mut current: Option<u8> = None;
        for (i, (&b, &tag)) in bytes.iter().zip(tags.iter()).enumerate() {
            let tag = self.overlay_tag(row, start + i, tag);

            if b.is_ascii_control() {
                // show control bytes inverse-video as @-letters
                let sym = if b <= 26 { b'@' + b } else { b'?' };
                self.push(b"\x1b[7m");
                self.push(&[sym]);
                self.set_default_colors();
                if let Some(color) = current {
                    self.push_str(&format!("\x1b[38;5;{}m", color));
                }
                continue;
            }

            match tag.color() {
                None => {
                    if current.is_some() {
                        self.set_default_colors();
                        current = None;
                    }
                }
                Some(color) => {
                    if current != Some(color) {
                        self.push_str(&format!("\x1b[38;5;{}m", color));
                        current = Some(color);
                    }
                }
            }
            self.push(&[b]);
        }

        self.set_default_colors();
    }

    /// Substitute the match tag where the search overlay covers this cell.
    fn overlay_tag(&self, row: usize, rendered_col: usize, tag: Tag) -> Tag {
        match self.overlay {
            Some(m) if m.row == row && (m.offset..m.offset + m.len).contains(&rendered_col) => {
                Tag::Match
            }
            _ => tag,
        }
    }

    fn draw_status(&mut self, status: &StatusInfo<'_>) {
        self.set_colors(STATUS_FG, STATUS_BG);

        let name = status.filename.unwrap_or("[empty]");
        let name: String = name.chars().take(20).collect();
        let left = format!(
            " {} {}{}",
            status.mode,
            name,
            if status.dirty { "[+]" } else { "" }
        );
        let right = format!(
            "{} | {}/{}:{}",
            status.profile.unwrap_or(""),
            status.line + 1,
            status.line_count,
            status.column
        );

        let mut len = left.len().min(self.view.width);
        self.push(&left.as_bytes()[..len]);
        while len < self.view.width {
            if self.view.width - len == right.len() {
                self.push_str(&right);
                break;
            }
            self.push(b" ");
            len += 1;
        }

        self.set_default_colors();
        self.push(b"\r\n");
    }

    fn draw_message(&mut self, message: Option<(&str, bool)>) {
        self.push(b"\x1b[K");
        let Some((text, is_error)) = message else {
            return;
        };

        if is_error {
            self.set_colors(ERROR_FG, ERROR_BG);
        }
        let len = text.len().min(self.view.width);
        self.push(&text.as_bytes()[..len]);
        self.set_default_colors();
    }
}
