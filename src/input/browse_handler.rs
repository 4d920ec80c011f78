//! Browse key handler for the voice list
//!
//! The bottom of the handler stack: moves through the filtered voices,
//! previews them, and opens the search box, language picker and dialogs.

use super::keymap::KeyAction;
use super::language_handler::LanguageHandler;
use super::script_handler::ScriptHandler;
use super::search_handler::SearchHandler;
use super::settings_handler::SettingsHandler;
use super::HandlerAction;
use crate::state::SelectorState;
use crate::Result;
use log::{debug, trace};
use std::collections::HashMap;

/// Rows moved by PageUp/PageDown
const PAGE_ROWS: isize = 10;

/// Browse key handler
pub struct BrowseHandler {
    /// Key bindings map
    keymap: HashMap<Vec<u8>, KeyAction>,
}

impl BrowseHandler {
    /// Create a new browse handler
    pub fn new(keymap: HashMap<Vec<u8>, KeyAction>) -> Self {
        debug!("Creating browse handler with {} bindings", keymap.len());
        Self { keymap }
    }

    /// Process a key with the browse bindings
    ///
    /// Unbound keys are ignored (reported as passthrough).
    pub fn process_key(&mut self, key: &[u8], state: &mut SelectorState) -> Result<HandlerAction> {
        match self.keymap.get(key).copied() {
            Some(action) => {
                trace!("Key action: {:?}", action);
                self.execute_action(action, state)
            }
            None => Ok(HandlerAction::Passthrough),
        }
    }

    /// Execute a browse action
    fn execute_action(&mut self, action: KeyAction, state: &mut SelectorState) -> Result<HandlerAction> {
        use KeyAction::*;

        match action {
            PrevVoice => state.move_cursor(-1),
            NextVoice => state.move_cursor(1),
            PageUp => state.move_cursor(-PAGE_ROWS),
            PageDown => state.move_cursor(PAGE_ROWS),
            FirstVoice => state.move_cursor(isize::MIN / 2),
            LastVoice => state.move_cursor(isize::MAX / 2),

            // Disabled for the voice already playing
            Preview => state.preview_selected(),
            Silence => {
                debug!("Silence requested");
                state.silence();
            }

            Search => SearchHandler::push(state),
            Language => LanguageHandler::push(state),
            EditScript => ScriptHandler::push(state),
            VoiceSettings => SettingsHandler::push(state),

            Quit => {
                debug!("Quit requested");
                state.quit = true;
            }
        }

        Ok(HandlerAction::Handled)
    }
}
