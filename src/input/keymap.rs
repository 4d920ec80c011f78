//! Key bindings for the voice list

use std::collections::HashMap;

/// Key sequence type
pub type KeySequence = Vec<u8>;

/// Escape, alone
pub const ESCAPE: &[u8] = b"\x1b";

/// Ctrl+C
pub const INTERRUPT: &[u8] = b"\x03";

/// Ctrl+U
pub const KILL_LINE: &[u8] = b"\x15";

/// Action identifier for key bindings
///
/// Each variant is a browse-mode command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Row navigation
    PrevVoice,
    NextVoice,
    PageUp,
    PageDown,
    FirstVoice,
    LastVoice,

    // Playback
    Preview,
    Silence,

    // Filters
    Search,
    Language,

    // Dialogs
    EditScript,
    VoiceSettings,

    Quit,
}

/// Create the default keymap
pub fn create_default_keymap() -> HashMap<KeySequence, KeyAction> {
    let mut map = HashMap::new();

    // Row navigation (arrows, vi keys)
    map.insert(b"\x1b[A".to_vec(), KeyAction::PrevVoice);
    map.insert(b"\x1bOA".to_vec(), KeyAction::PrevVoice);
    map.insert(b"k".to_vec(), KeyAction::PrevVoice);
    map.insert(b"\x1b[B".to_vec(), KeyAction::NextVoice);
    map.insert(b"\x1bOB".to_vec(), KeyAction::NextVoice);
    map.insert(b"j".to_vec(), KeyAction::NextVoice);
    map.insert(b"\x1b[5~".to_vec(), KeyAction::PageUp);
    map.insert(b"\x1b[6~".to_vec(), KeyAction::PageDown);
    map.insert(b"\x1b[H".to_vec(), KeyAction::FirstVoice);
    map.insert(b"\x1bOH".to_vec(), KeyAction::FirstVoice);
    map.insert(b"g".to_vec(), KeyAction::FirstVoice);
    map.insert(b"\x1b[F".to_vec(), KeyAction::LastVoice);
    map.insert(b"\x1bOF".to_vec(), KeyAction::LastVoice);
    map.insert(b"G".to_vec(), KeyAction::LastVoice);

    // Playback
    map.insert(b"\r".to_vec(), KeyAction::Preview);
    map.insert(b"\n".to_vec(), KeyAction::Preview);
    map.insert(b" ".to_vec(), KeyAction::Preview);
    map.insert(b"x".to_vec(), KeyAction::Silence);

    // Filters
    map.insert(b"/".to_vec(), KeyAction::Search);
    map.insert(b"l".to_vec(), KeyAction::Language);

    // Dialogs
    map.insert(b"e".to_vec(), KeyAction::EditScript);
    map.insert(b"s".to_vec(), KeyAction::VoiceSettings);

    map.insert(b"q".to_vec(), KeyAction::Quit);
    map.insert(INTERRUPT.to_vec(), KeyAction::Quit);

    map
}

/// Split one read from stdin into individual keys
///
/// Keys typed quickly (or pasted) arrive in a single read. Escape sequences
/// and multi-byte UTF-8 characters stay whole.
pub fn split_keys(input: &[u8]) -> Vec<&[u8]> {
    let mut keys = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        let len = key_len(rest);
        let (key, tail) = rest.split_at(len);
        keys.push(key);
        rest = tail;
    }
    keys
}

fn key_len(bytes: &[u8]) -> usize {
    let len = match bytes[0] {
        0x1b => match bytes.get(1) {
            // CSI: parameters up to a final byte in 0x40..=0x7e
            Some(b'[') => bytes[2..]
                .iter()
                .position(|b| (0x40..=0x7e).contains(b))
                .map_or(bytes.len(), |p| p + 3),
            Some(b'O') => 3,
            _ => 1,
        },
        b if b >= 0xf0 => 4,
        b if b >= 0xe0 => 3,
        b if b >= 0xc0 => 2,
        _ => 1,
    };
    len.min(bytes.len())
}
