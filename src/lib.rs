//! Voice Selector - terminal browser for system text-to-speech voices
//!
//! Lists the voices exposed by the platform speech engine, filters them by
//! name and language, and previews a script with adjustable rate and pitch.

pub mod catalog;
pub mod error;
pub mod input;
pub mod playback;
pub mod speech;
pub mod state;
pub mod terminal;

pub use error::{Result, SelectorError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "voice-selector";
