//! Text entry decoding
//!
//! Shared by the search box and the script dialog: turns raw key bytes into
//! edits of a single-line text buffer.

use super::keymap::{ESCAPE, INTERRUPT, KILL_LINE};

/// An edit requested by one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    /// Append printable text
    Insert(String),
    /// Remove the last character
    Backspace,
    /// Empty the buffer
    Clear,
    /// Enter
    Accept,
    /// Escape or Ctrl+C
    Cancel,
    /// Navigation or control key with no meaning in a text field
    Ignored,
}

/// Decode one key for a text field
pub fn decode(key: &[u8]) -> TextEdit {
    match key {
        b"\r" | b"\n" => TextEdit::Accept,
        b"\x08" | b"\x7f" => TextEdit::Backspace,
        k if k == ESCAPE || k == INTERRUPT => TextEdit::Cancel,
        k if k == KILL_LINE => TextEdit::Clear,
        _ => match std::str::from_utf8(key) {
            Ok(text) if !text.is_empty() && !text.chars().any(char::is_control) => {
                TextEdit::Insert(text.to_string())
            }
            _ => TextEdit::Ignored,
        },
    }
}
