//! Speech host interface and platform backends

pub mod backends;
pub mod host;

pub use host::{
    CatalogNotify, EventSink, HostEvent, RequestId, SpeechHost, Utterance, UtteranceEnd,
};

use crate::Result;
use log::info;

/// Create the platform speech host
///
/// Uses the `tts` crate, which reaches Speech Dispatcher on Linux,
/// AVFoundation on macOS and WinRT/SAPI on Windows.
pub fn create_host(poll_interval: std::time::Duration) -> Result<Box<dyn SpeechHost>> {
    info!(
        "Creating native speech host for platform: {}",
        std::env::consts::OS
    );
    let host = backends::native::NativeHost::new(poll_interval).map_err(|e| {
        crate::SelectorError::Speech(format!(
            "Failed to initialize speech host for platform '{}': {}",
            std::env::consts::OS,
            e
        ))
    })?;
    info!("Native speech host initialized");
    Ok(Box::new(host))
}
