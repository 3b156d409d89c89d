//! Scroll window over the document
//!
//! Tracks the rendered-column and row origin of the visible window. The
//! cursor never leaves the window: `scroll` pulls the origin toward the
//! cursor when it moves above/left of it and pushes the origin forward when
//! the cursor passes the far edge.

/// The visible window: origin offsets plus extent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visible rendered column
    pub x_offset: usize,
    /// First visible row
    pub y_offset: usize,
    /// Visible width in columns
    pub width: usize,
    /// Visible height in rows
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            x_offset: 0,
            y_offset: 0,
            width,
            height,
        }
    }

    /// Clamp both offsets so the cursor at row `cy`, rendered column `rx`
    /// is visible within the given content width.
    pub fn scroll(&mut self, cy: usize, rx: usize, content_width: usize) {
        if cy < self.y_offset {
            self.y_offset = cy;
        }
        if cy >= self.y_offset + self.height {
            self.y_offset = cy + 1 - self.height;
        }
        if rx < self.x_offset {
            self.x_offset = rx;
        }
        if rx >= self.x_offset + content_width {
            self.x_offset = rx + 1 - content_width;
        }
    }
}
