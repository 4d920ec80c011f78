//! Input handling and key bindings
//!
//! The input system uses a stack-based handler architecture where handlers
//! can be pushed/popped to create modal interfaces (search box, language
//! picker, script and settings dialogs) over the browse bindings.

pub mod browse_handler;
pub mod handler;
pub mod keymap;
pub mod language_handler;
pub mod script_handler;
pub mod search_handler;
pub mod settings_handler;
pub mod slider;
pub mod text_input;

pub use browse_handler::BrowseHandler;
pub use handler::{HandlerAction, HandlerStack, KeyHandler};
pub use keymap::{create_default_keymap, split_keys, KeyAction};

use crate::state::SelectorState;
use crate::Result;

/// Route one key through the modal stack, then the browse bindings
///
/// The top handler sees the key first. It stays on the stack unless it
/// answers `Remove`; a `Passthrough` lets the browse bindings handle the key
/// as well.
pub fn dispatch_key(key: &[u8], state: &mut SelectorState, browse: &mut BrowseHandler) -> Result<()> {
    // Off the stack while it runs, since it borrows the state mutably
    if let Some(mut handler) = state.handlers.pop() {
        match handler.process(key, state)? {
            HandlerAction::Handled => {
                state.handlers.push(handler);
                return Ok(());
            }
            HandlerAction::Remove => return Ok(()),
            HandlerAction::Passthrough => state.handlers.push(handler),
        }
    }

    browse.process_key(key, state)?;
    Ok(())
}

/// Route every key contained in one read from stdin
pub fn dispatch_input(input: &[u8], state: &mut SelectorState, browse: &mut BrowseHandler) -> Result<()> {
    for key in split_keys(input) {
        dispatch_key(key, state, browse)?;
        if state.quit {
            break;
        }
    }
    Ok(())
}
