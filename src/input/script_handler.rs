//! Script dialog handler
//!
//! Edits go to the draft only. Enter saves the draft as the preview
//! script; Escape cancels and leaves the script untouched.

use super::text_input::{self, TextEdit};
use super::{HandlerAction, KeyHandler};
use crate::state::SelectorState;
use crate::Result;

/// Modal handler for the "Change Script" dialog
pub struct ScriptHandler;

impl Default for ScriptHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptHandler {
    pub fn new() -> Self {
        Self
    }

    /// Open the dialog (seeding the draft) and push the handler
    pub fn push(state: &mut SelectorState) {
        state.script.open();
        state.handlers.push(Box::new(Self::new()));
    }
}

impl KeyHandler for ScriptHandler {
    fn process(&mut self, key: &[u8], state: &mut SelectorState) -> Result<HandlerAction> {
        match text_input::decode(key) {
            TextEdit::Insert(text) => {
                text.chars().for_each(|ch| state.script.insert(ch));
                Ok(HandlerAction::Handled)
            }
            TextEdit::Backspace => {
                state.script.backspace();
                Ok(HandlerAction::Handled)
            }
            TextEdit::Clear => {
                state.script.set_draft("");
                Ok(HandlerAction::Handled)
            }
            TextEdit::Accept => {
                state.script.save();
                Ok(HandlerAction::Remove)
            }
            TextEdit::Cancel => {
                state.script.cancel();
                Ok(HandlerAction::Remove)
            }
            // Modal: nothing reaches the list while the dialog is open
            TextEdit::Ignored => Ok(HandlerAction::Handled),
        }
    }
}
