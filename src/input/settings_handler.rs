//! Voice settings dialog handler
//!
//! Modal handler for the rate/pitch dialog (s). Every slider movement is
//! committed to the voice settings at once; closing the dialog changes
//! nothing.
//! - Up/Down/Tab: focus rate or pitch
//! - Left/Right or -/+: move the focused slider one step
//! - Enter/Escape: close

use super::keymap::{ESCAPE, INTERRUPT};
use super::slider::{Slider, MULTIPLIER_SLIDER};
use super::{HandlerAction, KeyHandler};
use crate::state::SelectorState;
use crate::Result;
use log::debug;

/// Voice settings key handler
pub struct SettingsHandler {
    slider: Slider,
}

impl Default for SettingsHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsHandler {
    /// Create a new settings handler
    pub fn new() -> Self {
        Self {
            slider: MULTIPLIER_SLIDER,
        }
    }

    /// Open the dialog and push the handler
    pub fn push(state: &mut SelectorState) {
        state.open_settings_dialog();
        state.handlers.push(Box::new(Self::new()));
    }

    /// Move the focused slider and commit the value
    fn nudge(&self, state: &mut SelectorState, steps: i32) {
        if let Some(field) = state.settings_dialog {
            let value = self.slider.step(state.settings.get(field), steps);
            state.settings.set(field, value);
        }
    }
}

impl KeyHandler for SettingsHandler {
    fn process(&mut self, key: &[u8], state: &mut SelectorState) -> Result<HandlerAction> {
        let Some(field) = state.settings_dialog else {
            // Dialog closed underneath us
            return Ok(HandlerAction::Remove);
        };

        match key {
            // Switch field
            b"\x1b[A" | b"\x1bOA" | b"\x1b[B" | b"\x1bOB" | b"\t" | b"k" | b"j" => {
                state.settings_dialog = Some(field.toggle());
                Ok(HandlerAction::Handled)
            }

            // Slider down
            b"\x1b[D" | b"\x1bOD" | b"-" | b"h" => {
                self.nudge(state, -1);
                Ok(HandlerAction::Handled)
            }

            // Slider up
            b"\x1b[C" | b"\x1bOC" | b"+" | b"=" | b"l" => {
                self.nudge(state, 1);
                Ok(HandlerAction::Handled)
            }

            // Close
            b"\r" | b"\n" => {
                state.close_settings_dialog();
                Ok(HandlerAction::Remove)
            }
            k if k == ESCAPE || k == INTERRUPT || k == b"s" => {
                state.close_settings_dialog();
                Ok(HandlerAction::Remove)
            }

            _ => {
                debug!("Settings: unknown key");
                Ok(HandlerAction::Handled)
            }
        }
    }
}
