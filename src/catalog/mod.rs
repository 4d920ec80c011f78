//! Voice catalog
//!
//! Holds the latest snapshot of the host's voices and keeps it in sync with
//! catalog-changed notifications. Snapshots are replaced wholesale.

pub mod filter;

pub use filter::{filtered, languages, FilterCriteria, LanguageFilter};

use crate::speech::{EventSink, HostEvent, SpeechHost};
use crate::Result;
use log::{debug, info, warn};
use serde::Serialize;

/// A host-provided synthesis voice
///
/// Read-only snapshot value: the selector never creates or edits voices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voice {
    /// Display name, unique within a catalog
    pub name: String,
    /// Locale tag, e.g. `en-US`
    pub lang: String,
    /// Host identifier for the voice
    pub uri: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
            uri: uri.into(),
        }
    }
}

/// Loads the voice catalog and tracks host change notifications
#[derive(Debug, Default)]
pub struct CatalogLoader {
    voices: Vec<Voice>,
    subscribed: bool,
}

impl CatalogLoader {
    /// Create an empty, unsubscribed loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Query the host and subscribe to catalog changes
    ///
    /// Each change notification is posted to `sink` as
    /// [`HostEvent::CatalogChanged`]; the event loop answers it with
    /// [`CatalogLoader::reload`].
    pub fn attach(&mut self, host: &mut dyn SpeechHost, sink: &EventSink) -> Result<()> {
        self.reload(host);

        let sink = sink.clone();
        host.subscribe(Box::new(move || sink.send(HostEvent::CatalogChanged)))?;
        self.subscribed = true;
        info!("Voice catalog attached with {} voices", self.voices.len());
        Ok(())
    }

    /// Re-query the host and replace the catalog
    ///
    /// A failed query leaves an empty catalog; the next notification retries.
    pub fn reload(&mut self, host: &mut dyn SpeechHost) {
        self.voices = match host.voices() {
            Ok(voices) => voices,
            Err(e) => {
                warn!("Voice query failed, catalog is empty: {}", e);
                Vec::new()
            }
        };
        debug!("Catalog reloaded: {} voices", self.voices.len());
    }

    /// Deregister the change notification
    pub fn detach(&mut self, host: &mut dyn SpeechHost) -> Result<()> {
        if self.subscribed {
            host.unsubscribe()?;
            self.subscribed = false;
            debug!("Voice catalog detached");
        }
        Ok(())
    }

    /// Current catalog snapshot, in host order
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Look up a voice by name
    pub fn find(&self, name: &str) -> Option<&Voice> {
        self.voices.iter().find(|v| v.name == name)
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }
}
