//! Speech host abstraction
//!
//! The host is the platform speech engine: it enumerates voices, announces
//! catalog changes, and plays utterances. Callbacks may arrive on host
//! threads, so they only post [`HostEvent`]s through an [`EventSink`]; the
//! event loop applies them to the selector state one at a time.

use crate::catalog::Voice;
use crate::Result;
use std::fmt;
use std::sync::Arc;

/// Identifier of one submitted utterance
///
/// Allocated in strictly increasing order by the playback controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One synthesis request
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Text to speak
    pub text: String,
    /// Voice to speak with; `None` lets the host pick its default voice
    pub voice: Option<Voice>,
    /// Rate multiplier (1.0 is the host's normal rate)
    pub rate: f32,
    /// Pitch multiplier (1.0 is the host's normal pitch)
    pub pitch: f32,
}

/// Notifications delivered from the host to the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The host's voice list changed and should be re-queried
    CatalogChanged,
    /// The utterance submitted under this id has ended
    UtteranceFinished(RequestId),
}

/// Zero-argument catalog-changed callback
pub type CatalogNotify = Box<dyn Fn() + Send + Sync>;

/// Completion callback, invoked exactly once when an utterance ends
pub type UtteranceEnd = Box<dyn FnOnce() + Send>;

/// Thread-safe handle for posting host events into the event loop
#[derive(Clone)]
pub struct EventSink {
    post: Arc<dyn Fn(HostEvent) + Send + Sync>,
}

impl EventSink {
    /// Wrap a posting function
    pub fn new<F>(post: F) -> Self
    where
        F: Fn(HostEvent) + Send + Sync + 'static,
    {
        Self {
            post: Arc::new(post),
        }
    }

    /// Post an event
    pub fn send(&self, event: HostEvent) {
        (self.post)(event);
    }
}

impl fmt::Debug for EventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSink").finish_non_exhaustive()
    }
}

/// Platform speech capability
///
/// Implemented by the native `tts` backend and by fakes in tests.
pub trait SpeechHost: Send {
    /// Query the current ordered voice list (may be empty before the host
    /// has finished populating it)
    fn voices(&mut self) -> Result<Vec<Voice>>;

    /// Register the catalog-changed callback, replacing any previous one
    fn subscribe(&mut self, notify: CatalogNotify) -> Result<()>;

    /// Drop the catalog-changed callback
    fn unsubscribe(&mut self) -> Result<()>;

    /// Begin speaking an utterance
    ///
    /// When `interrupt` is set, speech already in progress is stopped first.
    fn speak(&mut self, utterance: Utterance, interrupt: bool, on_end: UtteranceEnd) -> Result<()>;

    /// Silence current speech
    fn stop(&mut self) -> Result<()>;
}
