//! Logical/rendered column conversion
//!
//! Tabs are the only reason a logical character offset and an on-screen
//! column differ, so both conversions walk the line accumulating the same
//! tab-aware width. These are pure functions; the document and the search
//! code share them.

/// Rendered width of the first `column` characters of `raw` under tab stop
/// `tab_stop`. A tab advances to the next multiple of the tab stop.
pub fn to_rendered(raw: &str, column: usize, tab_stop: usize) -> usize {
    let mut width = 0;
    for b in raw.bytes().take(column) {
        if b == b'\t' {
            width += (tab_stop - 1) - (width % tab_stop);
        }
        width += 1;
    }
    width
}

/// Logical offset covering rendered column `rendered_column`: the first
/// offset whose post-advance width exceeds it, or the line length if none
/// does.
///
/// This is the left inverse of [`to_rendered`]; going the other way is only
/// exact up to tab-stop granularity, because every rendered column under a
/// tab maps back to the tab itself.
pub fn to_logical(raw: &str, rendered_column: usize, tab_stop: usize) -> usize {
    let mut width = 0;
    for (offset, b) in raw.bytes().enumerate() {
        if b == b'\t' {
            width += (tab_stop - 1) - (width % tab_stop);
        }
        width += 1;
        if width > rendered_column {
            return offset;
        }
    }
    raw.len()
}

/// Expand every tab in `raw` to spaces up to the next tab stop.
pub fn expand_tabs(raw: &str, tab_stop: usize) -> String {
    let mut rendered = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == '\t' {
            rendered.push(' ');
            while rendered.len() % tab_stop != 0 {
                rendered.push(' ');
            }
        } else {
            rendered.push(ch);
        }
    }
    rendered
}
