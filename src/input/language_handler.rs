//! Language picker handler

use super::keymap::{ESCAPE, INTERRUPT};
use super::{HandlerAction, KeyHandler};
use crate::state::SelectorState;
use crate::Result;
use log::debug;

/// Modal handler for the single-select language list
///
/// Up/Down move the highlight, Enter applies it, Escape closes without
/// changing the filter.
pub struct LanguageHandler;

impl Default for LanguageHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageHandler {
    pub fn new() -> Self {
        Self
    }

    /// Open the picker and push the handler
    pub fn push(state: &mut SelectorState) {
        state.open_language_picker();
        state.handlers.push(Box::new(Self::new()));
    }
}

impl KeyHandler for LanguageHandler {
    fn process(&mut self, key: &[u8], state: &mut SelectorState) -> Result<HandlerAction> {
        match key {
            b"\x1b[A" | b"\x1bOA" | b"k" => {
                state.move_language_picker(-1);
                Ok(HandlerAction::Handled)
            }
            b"\x1b[B" | b"\x1bOB" | b"j" => {
                state.move_language_picker(1);
                Ok(HandlerAction::Handled)
            }
            b"\r" | b"\n" | b" " => {
                state.confirm_language_picker();
                Ok(HandlerAction::Remove)
            }
            k if k == ESCAPE || k == INTERRUPT || k == b"l" => {
                debug!("Language picker dismissed");
                state.close_language_picker();
                Ok(HandlerAction::Remove)
            }
            _ => Ok(HandlerAction::Handled),
        }
    }
}
