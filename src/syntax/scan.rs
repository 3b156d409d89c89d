//! Per-line highlight scanner
//!
//! Classifies one rendered line left to right, carrying the
//! open-block-comment flag in from the previous line and reporting the flag
//! that holds at end of line. Document-level cascading across lines lives in
//! the document, not here; the scanner itself is a pure function of its
//! inputs.

use super::{KeywordKind, Profile, Tag};

/// Characters that end a token, in addition to whitespace and end of line.
const SEPARATORS: &[u8] = b",.(){}+-/*=~%<>[];:";

fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || SEPARATORS.contains(&b)
}

/// Classify every byte of `rendered`, given the predecessor line's
/// open-block-comment flag. Returns the tags and whether a block comment is
/// still open at end of line.
///
/// `raw` is the unexpanded line; it is only consulted for the
/// angle-include special case, which keys off the literal source text.
pub fn highlight(
    profile: Option<&Profile>,
    raw: &str,
    rendered: &str,
    prev_open: bool,
) -> (Vec<Tag>, bool) {
    let bytes = rendered.as_bytes();
    let mut tags = vec![Tag::Normal; bytes.len()];

    let Some(profile) = profile else {
        return (tags, false);
    };

    let line_comment = profile.line_comment.map(str::as_bytes);
    let block_comment = profile
        .block_comment
        .map(|(open, close)| (open.as_bytes(), close.as_bytes()));

    // The include scan keys off the raw source text, not the expansion.
    let include_line = profile.angle_includes && raw.contains('<') && raw.contains("#include");

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_include = false;
    let mut in_comment = prev_open;

    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        let prev_tag = if i > 0 { tags[i - 1] } else { Tag::Normal };

        if let Some(token) = line_comment {
            if in_string.is_none() && !in_comment && bytes[i..].starts_with(token) {
                for tag in &mut tags[i..] {
                    *tag = Tag::Comment;
                }
                break;
            }
        }

        if let Some((open, close)) = block_comment {
            if in_string.is_none() {
                if in_comment {
                    tags[i] = Tag::BlockComment;
                    if bytes[i..].starts_with(close) {
                        for tag in &mut tags[i..i + close.len()] {
                            *tag = Tag::BlockComment;
                        }
                        i += close.len();
                        in_comment = false;
                        prev_sep = true;
                    } else {
                        i += 1;
                    }
                    continue;
                } else if bytes[i..].starts_with(open) {
                    for tag in &mut tags[i..i + open.len()] {
                        *tag = Tag::BlockComment;
                    }
                    i += open.len();
                    in_comment = true;
                    continue;
                }
            }
        }

        if profile.highlight_strings {
            if let Some(quote) = in_string {
                tags[i] = Tag::String;
                if c == b'\\' && i + 1 < bytes.len() {
                    tags[i + 1] = Tag::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                tags[i] = Tag::String;
                i += 1;
                continue;
            }

            if include_line {
                if in_include {
                    tags[i] = Tag::String;
                    if c == b'>' {
                        in_include = false;
                    }
                    i += 1;
                    prev_sep = true;
                    continue;
                } else if c == b'<' {
                    in_include = true;
                    tags[i] = Tag::String;
                    i += 1;
                    continue;
                }
            }
        }

        if profile.highlight_numbers {
            // Deliberately loose: any hex digit or x/X directly after a
            // Number tag stays a Number, whether or not a 0x marker was
            // seen. Legacy behavior, kept as-is.
            let is_number = (c.is_ascii_digit() && (prev_sep || prev_tag == Tag::Number))
                || (c == b'.' && prev_tag == Tag::Number)
                || (c.is_ascii_hexdigit() && prev_tag == Tag::Number)
                || ((c == b'x' || c == b'X') && prev_tag == Tag::Number);

            if is_number {
                tags[i] = Tag::Number;
                i += 1;
                prev_sep = false;
                continue;
            }
        }

        if prev_sep {
            let mut matched = false;
            for keyword in profile.keywords {
                let text = keyword.text.as_bytes();
                let end = i + text.len();
                if bytes.len() < end || &bytes[i..end] != text {
                    continue;
                }
                // Require a separator (or end of line) after the match so
                // that "int" does not fire inside "integer".
                if end < bytes.len() && !is_separator(bytes[end]) {
                    continue;
                }

                let tag = match keyword.kind {
                    KeywordKind::Keyword => Tag::Keyword,
                    KeywordKind::Type => Tag::Type,
                    KeywordKind::Macro => Tag::Macro,
                };
                for t in &mut tags[i..end] {
                    *t = tag;
                }
                i = end;
                matched = true;
                break;
            }
            if matched {
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    (tags, in_comment)
}
