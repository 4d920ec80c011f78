//! Search box handler
//!
//! While focused, typing edits the search text and the list narrows on
//! every keystroke. Enter or Escape leaves the box; the text stays.

use super::text_input::{self, TextEdit};
use super::{HandlerAction, KeyHandler};
use crate::state::SelectorState;
use crate::Result;
use log::debug;

/// Modal handler for the search box
pub struct SearchHandler;

impl Default for SearchHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchHandler {
    pub fn new() -> Self {
        Self
    }

    /// Focus the search box and push the handler
    pub fn push(state: &mut SelectorState) {
        state.search_focused = true;
        state.handlers.push(Box::new(Self::new()));
    }
}

impl KeyHandler for SearchHandler {
    fn process(&mut self, key: &[u8], state: &mut SelectorState) -> Result<HandlerAction> {
        match text_input::decode(key) {
            TextEdit::Insert(text) => {
                text.chars().for_each(|ch| state.push_search_char(ch));
                debug!("Search: {:?}", state.criteria.search);
                Ok(HandlerAction::Handled)
            }
            TextEdit::Backspace => {
                state.pop_search_char();
                Ok(HandlerAction::Handled)
            }
            TextEdit::Clear => {
                state.set_search("");
                Ok(HandlerAction::Handled)
            }
            TextEdit::Accept | TextEdit::Cancel => {
                state.search_focused = false;
                Ok(HandlerAction::Remove)
            }
            // Arrows still move through the narrowed list
            TextEdit::Ignored => Ok(HandlerAction::Passthrough),
        }
    }
}
