//! Keyboard input decoding
//!
//! Raw-mode bytes arrive one at a time; escape sequences are collected by
//! the terminal layer and decoded here. Decoding is pure so it can be
//! tested without a terminal.

/// A decoded keypress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
}

/// Decode a single non-escape byte.
pub fn from_byte(byte: u8) -> Key {
    match byte {
        b'\r' => Key::Enter,
        b'\t' => Key::Tab,
        127 => Key::Backspace,
        0x1b => Key::Escape,
        1..=26 => Key::Ctrl((byte + b'a' - 1) as char),
        _ => Key::Char(byte as char),
    }
}

/// Decode the bytes following an ESC. Unrecognized sequences fall back to
/// a bare Escape.
pub fn parse_escape(seq: &[u8]) -> Key {
    match seq {
        [b'[', b'A'] => Key::Up,
        [b'[', b'B'] => Key::Down,
        [b'[', b'C'] => Key::Right,
        [b'[', b'D'] => Key::Left,
        [b'[', b'H'] | [b'O', b'H'] => Key::Home,
        [b'[', b'F'] | [b'O', b'F'] => Key::End,
        [b'[', digit, b'~'] => match digit {
            b'1' | b'7' => Key::Home,
            b'4' | b'8' => Key::End,
            b'3' => Key::Delete,
            b'5' => Key::PageUp,
            b'6' => Key::PageDown,
            _ => Key::Escape,
        },
        _ => Key::Escape,
    }
}
