//! Modal key handlers
//!
//! Dialogs and the search box push a handler when they open. The top
//! handler sees each key before the browse bindings and decides whether the
//! key goes further.

use crate::state::SelectorState;
use crate::Result;

/// What the dispatcher does after a modal handler has seen a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerAction {
    /// Keep the handler and let the browse bindings see the key too
    Passthrough,
    /// Close: drop the handler from the stack
    Remove,
    /// Keep the handler; the key goes no further
    Handled,
}

/// A modal input mode layered over the voice list
pub trait KeyHandler {
    /// Handle one key, editing the selector state as needed
    fn process(&mut self, key: &[u8], state: &mut SelectorState) -> Result<HandlerAction>;
}

/// Open modal handlers, newest last
pub struct HandlerStack {
    handlers: Vec<Box<dyn KeyHandler>>,
}

impl HandlerStack {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn push(&mut self, handler: Box<dyn KeyHandler>) {
        self.handlers.push(handler);
    }

    /// Take the top handler off the stack
    pub fn pop(&mut self) -> Option<Box<dyn KeyHandler>> {
        self.handlers.pop()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerStack {
    fn default() -> Self {
        Self::new()
    }
}
