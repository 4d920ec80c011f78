//! Frame rendering
//!
//! Builds one full ANSI frame from the selector state. Rendering is pure:
//! the event loop writes the returned string to stdout after every event.

use crate::catalog::Voice;
use crate::input::slider::{Slider, MULTIPLIER_SLIDER};
use crate::state::settings::SettingsField;
use crate::state::SelectorState;
use std::ops::Range;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Clear screen and home the cursor
const CLEAR: &str = "\x1b[H\x1b[2J";
const BOLD: &str = "\x1b[1m";
const REVERSE: &str = "\x1b[7m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Header lines above the voice list
const HEADER_ROWS: usize = 4;

/// Footer lines below the voice list
const FOOTER_ROWS: usize = 1;

/// Widest name and language columns
const NAME_COLUMN: usize = 28;
const LANG_COLUMN: usize = 10;

/// Width of the "Preview Voice" / "Playing..." action column
const ACTION_COLUMN: usize = 13;

/// Render the whole screen
pub fn render_frame(state: &SelectorState, cols: u16, rows: u16) -> String {
    let width = cols as usize;
    let mut lines: Vec<String> = Vec::new();

    // Header
    let title = format!("{}Voice Selector{}", BOLD, RESET);
    let actions = "[s] Voice Settings  [e] Change Script";
    lines.push(join_edges(&title, "Voice Selector".width(), actions, width));

    let search = if state.search_focused {
        format!("Search: {}{}_{}", REVERSE, state.criteria.search, RESET)
    } else if state.criteria.search.is_empty() {
        format!("Search: {}Search voices... [/]{}", DIM, RESET)
    } else {
        format!("Search: {}", state.criteria.search)
    };
    lines.push(search);
    lines.push(format!("Language: {} [l]", state.criteria.lang));
    lines.push(String::new());

    // Dialog or picker, drawn under the list
    let dialog = dialog_lines(state, width);

    // Voice list
    let list_height = (rows as usize)
        .saturating_sub(HEADER_ROWS + FOOTER_ROWS + dialog.len())
        .max(1);
    let voices = state.filtered_voices();
    if voices.is_empty() {
        let message = if state.voices().is_empty() {
            "No voices available."
        } else {
            "No voices match."
        };
        lines.push(format!("  {}{}{}", DIM, message, RESET));
    } else {
        let window = list_window(state.cursor, voices.len(), list_height);
        for idx in window {
            let voice = voices[idx];
            let playing = state.playback.is_playing(&voice.name);
            lines.push(voice_row(voice, idx == state.cursor, playing, width));
        }
    }

    // Pad so the dialog and footer sit at the bottom
    let body_rows = HEADER_ROWS + list_height;
    while lines.len() < body_rows {
        lines.push(String::new());
    }
    lines.extend(dialog);

    match &state.notice {
        Some(notice) => lines.push(format!("{}{}{}", BOLD, fit(notice, width), RESET)),
        None => lines.push(format!(
            "{}{} of {} voices  [Enter] preview  [x] silence  [q] quit{}",
            DIM,
            voices.len(),
            state.voices().len(),
            RESET
        )),
    }

    let mut frame = String::from(CLEAR);
    frame.push_str(&lines.join("\r\n"));
    frame
}

/// One voice row: cursor marker, playing check, name, language, uri, action
fn voice_row(voice: &Voice, selected: bool, playing: bool, width: usize) -> String {
    let marker = if selected { '>' } else { ' ' };
    let check = if playing { '✓' } else { ' ' };
    let action = if playing { "Playing..." } else { "Preview Voice" };

    let fixed = 4 + NAME_COLUMN + 1 + LANG_COLUMN + 1 + ACTION_COLUMN + 1;
    let uri_width = width.saturating_sub(fixed);

    let row = format!(
        "{}{} {} {} {} {}",
        marker,
        check,
        fit(&voice.name, NAME_COLUMN),
        fit(&voice.lang, LANG_COLUMN),
        fit(action, ACTION_COLUMN),
        fit(&voice.uri, uri_width),
    );

    if selected {
        format!("{}{}{}", REVERSE, row.trim_end(), RESET)
    } else if playing {
        format!("{}{}{}", BOLD, row.trim_end(), RESET)
    } else {
        row.trim_end().to_string()
    }
}

fn dialog_lines(state: &SelectorState, width: usize) -> Vec<String> {
    if let Some(draft) = state.script.draft() {
        return boxed(
            "Change Script",
            &[
                "Enter the text you want to use for voice previews.".to_string(),
                format!("> {}_", draft),
                "[Enter] Save  [Esc] Cancel".to_string(),
            ],
            width,
        );
    }

    if let Some(focused) = state.settings_dialog {
        let row = |field: SettingsField| {
            let marker = if field == focused { '>' } else { ' ' };
            let value = state.settings.get(field);
            format!(
                "{} {:<5} {} {:.1}x",
                marker,
                field.label(),
                slider_bar(value, &MULTIPLIER_SLIDER, 16),
                value
            )
        };
        return boxed(
            "Voice Settings",
            &[
                "Adjust the rate and pitch of the voice.".to_string(),
                row(SettingsField::Rate),
                row(SettingsField::Pitch),
                "[Left/Right] adjust  [Up/Down] field  [Enter] Close".to_string(),
            ],
            width,
        );
    }

    if let Some(highlight) = state.language_picker {
        let options = state.language_options();
        let window = list_window(highlight, options.len(), 8);
        let body: Vec<String> = window
            .map(|idx| {
                let marker = if idx == highlight { '>' } else { ' ' };
                let current = if options[idx] == state.criteria.lang { " *" } else { "" };
                format!("{} {}{}", marker, options[idx], current)
            })
            .collect();
        return boxed("Select language", &body, width);
    }

    Vec::new()
}

/// Frame a dialog body with a title bar
fn boxed(title: &str, body: &[String], width: usize) -> Vec<String> {
    let inner = width.saturating_sub(4).max(1);
    let bar = "─".repeat(inner.saturating_sub(title.width() + 2));
    let mut lines = vec![format!("┌ {}{}{} {}┐", BOLD, title, RESET, bar)];
    for line in body {
        lines.push(format!("│ {} │", fit(line, inner.saturating_sub(2))));
    }
    lines.push(format!("└{}┘", "─".repeat(inner)));
    lines
}

/// Title on the left, text on the right, within `width` columns
fn join_edges(left: &str, left_width: usize, right: &str, width: usize) -> String {
    let gap = width.saturating_sub(left_width + right.width());
    if gap == 0 {
        return left.to_string();
    }
    format!("{}{}{}", left, " ".repeat(gap), right)
}

/// Truncate or pad to exactly `width` display columns
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    if text.width() > width && width > 0 && used == width {
        // Replace the tail with an ellipsis
        let mut trimmed = out;
        while trimmed.width() + 1 > width {
            if trimmed.pop().is_none() {
                break;
            }
        }
        trimmed.push('…');
        out = trimmed;
        used = out.width();
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Rows of a list to show so that `cursor` stays visible
pub fn list_window(cursor: usize, len: usize, height: usize) -> Range<usize> {
    if len <= height {
        return 0..len;
    }
    let start = cursor.saturating_sub(height / 2).min(len - height);
    start..start + height
}

/// Text gauge of a slider position
pub fn slider_bar(value: f32, slider: &Slider, width: usize) -> String {
    let span = slider.max - slider.min;
    let ratio = if span > 0.0 {
        ((value - slider.min) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f32).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("Ava", 5), "Ava  ");
        assert_eq!(fit("Samantha", 5), "Sama…");
        assert_eq!(fit("", 3), "   ");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn test_fit_wide_characters() {
        // Each CJK character takes two columns
        let out = fit("婷婷", 5);
        assert_eq!(out.width(), 5);
        assert!(out.starts_with("婷婷"));
    }

    #[test]
    fn test_list_window() {
        assert_eq!(list_window(0, 3, 10), 0..3);
        assert_eq!(list_window(0, 30, 10), 0..10);
        assert_eq!(list_window(15, 30, 10), 10..20);
        assert_eq!(list_window(29, 30, 10), 20..30);
    }

    #[test]
    fn test_slider_bar() {
        assert_eq!(slider_bar(0.5, &MULTIPLIER_SLIDER, 4), "[----]");
        assert_eq!(slider_bar(2.0, &MULTIPLIER_SLIDER, 4), "[####]");
        assert_eq!(slider_bar(1.25, &MULTIPLIER_SLIDER, 4), "[##--]");
    }
}
