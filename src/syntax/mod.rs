//! Syntax classification
//!
//! A syntax profile is a static ruleset describing how one file type is
//! highlighted: its keyword table, comment tokens, and which literal
//! categories (numbers, strings) are recognized. Profiles are selected by
//! filename and never change while a file is open.

mod scan;

pub use scan::highlight;

/// Per-character classification produced by the highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Normal,
    Comment,
    BlockComment,
    Keyword,
    Type,
    Macro,
    String,
    Number,
    /// Current search hit. Never produced by the scanner; applied as a
    /// render-time overlay.
    Match,
}

impl Tag {
    /// 256-color palette index for this tag, or `None` for the default
    /// foreground.
    pub fn color(self) -> Option<u8> {
        match self {
            Tag::Comment | Tag::BlockComment => Some(28),
            Tag::Keyword => Some(124),
            Tag::Type => Some(166),
            Tag::Macro => Some(29),
            Tag::String => Some(34),
            Tag::Number => Some(90),
            Tag::Match => Some(34),
            Tag::Normal => None,
        }
    }

    /// One-character code used in document snapshots.
    pub fn code(self) -> char {
        match self {
            Tag::Normal => '.',
            Tag::Comment => 'c',
            Tag::BlockComment => 'C',
            Tag::Keyword => 'k',
            Tag::Type => 't',
            Tag::Macro => 'm',
            Tag::String => 's',
            Tag::Number => 'n',
            Tag::Match => '*',
        }
    }
}

/// How a keyword-table entry is classified when it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordKind {
    Keyword,
    Type,
    Macro,
}

/// One entry in a profile's keyword table.
#[derive(Debug, Clone, Copy)]
pub struct Keyword {
    pub text: &'static str,
    pub kind: KeywordKind,
}

const fn kw(text: &'static str) -> Keyword {
    Keyword {
        text,
        kind: KeywordKind::Keyword,
    }
}

const fn ty(text: &'static str) -> Keyword {
    Keyword {
        text,
        kind: KeywordKind::Type,
    }
}

const fn mac(text: &'static str) -> Keyword {
    Keyword {
        text,
        kind: KeywordKind::Macro,
    }
}

/// Static highlighting ruleset for one file type.
#[derive(Debug)]
pub struct Profile {
    /// Short name shown in the status bar
    pub name: &'static str,
    /// Filename patterns: dot-prefixed entries match the file extension,
    /// anything else matches as a substring of the filename
    pub patterns: &'static [&'static str],
    /// Keyword table, scanned in order; first match wins
    pub keywords: &'static [Keyword],
    /// Token opening a comment that runs to end of line
    pub line_comment: Option<&'static str>,
    /// Open/close token pair for multi-line comments
    pub block_comment: Option<(&'static str, &'static str)>,
    /// Recognize numeric literals
    pub highlight_numbers: bool,
    /// Recognize quoted string literals
    pub highlight_strings: bool,
    /// Treat a bare `<...>` on an `#include` line as a string span
    pub angle_includes: bool,
}

static C_KEYWORDS: &[Keyword] = &[
    kw("switch"),
    kw("if"),
    kw("while"),
    kw("for"),
    kw("break"),
    kw("continue"),
    kw("return"),
    kw("else"),
    kw("struct"),
    kw("union"),
    kw("typedef"),
    kw("static"),
    kw("enum"),
    kw("class"),
    kw("case"),
    kw("default"),
    kw("sizeof"),
    kw("auto"),
    kw("do"),
    kw("volatile"),
    kw("extern"),
    kw("goto"),
    kw("register"),
    kw("NULL"),
    ty("int"),
    ty("long"),
    ty("double"),
    ty("float"),
    ty("char"),
    ty("unsigned"),
    ty("signed"),
    ty("void"),
    mac("#define"),
    mac("#endif"),
    mac("#error"),
    mac("#if"),
    mac("#ifdef"),
    mac("#ifndef"),
    mac("#include"),
    mac("#undef"),
];

/// Built-in profiles, checked in order by [`detect`].
pub static PROFILES: &[Profile] = &[Profile {
    name: "c",
    patterns: &[".c", ".h"],
    keywords: C_KEYWORDS,
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    highlight_numbers: true,
    highlight_strings: true,
    angle_includes: true,
}];

/// Pick the profile for a filename, or `None` to disable highlighting.
///
/// Dot-prefixed patterns compare against the file extension; plain patterns
/// match anywhere in the name. The first matching profile wins.
pub fn detect(filename: &str) -> Option<&'static Profile> {
    let ext = filename.rfind('.').map(|i| &filename[i..]);

    for profile in PROFILES {
        for pattern in profile.patterns {
            let matched = if pattern.starts_with('.') {
                ext == Some(*pattern)
            } else {
                filename.contains(pattern)
            };
            if matched {
                return Some(profile);
            }
        }
    }

    None
}
