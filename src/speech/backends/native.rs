//! Native speech host using the tts crate
//!
//! The `tts` crate provides a unified interface to:
//! - Speech Dispatcher on Linux (via native bindings)
//! - AVFoundation on macOS/iOS (via native bindings)
//! - WinRT / SAPI on Windows
//!
//! It has no voices-changed event, so catalog changes are detected by a
//! watcher thread that re-queries the voice list on an interval.

use crate::catalog::Voice;
use crate::speech::{CatalogNotify, SpeechHost, Utterance, UtteranceEnd};
use crate::{Result, SelectorError};
use log::{debug, error, warn};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tts::{Tts, UtteranceId};

/// Lowest multiplier the selector offers
const MIN_MULTIPLIER: f32 = 0.5;

/// Highest multiplier the selector offers
const MAX_MULTIPLIER: f32 = 2.0;

/// How often the fallback completion thread checks `is_speaking`
const SPEAKING_POLL: Duration = Duration::from_millis(50);

/// Completion callbacks waiting for their utterance to end
///
/// `early` holds ids whose end arrived before `speak` returned and the
/// callback was registered.
#[derive(Default)]
struct Completions {
    pending: Vec<(UtteranceId, UtteranceEnd)>,
    early: Vec<UtteranceId>,
}

impl Completions {
    /// Record an ended utterance, returning its callback if registered
    fn finish(&mut self, id: UtteranceId) -> Option<UtteranceEnd> {
        match self.pending.iter().position(|(pending, _)| *pending == id) {
            Some(idx) => Some(self.pending.swap_remove(idx).1),
            None => {
                self.early.push(id);
                None
            }
        }
    }

    /// Register a callback, returning it back if the utterance already ended
    fn register(&mut self, id: UtteranceId, on_end: UtteranceEnd) -> Option<UtteranceEnd> {
        match self.early.iter().position(|early| *early == id) {
            Some(idx) => {
                self.early.swap_remove(idx);
                Some(on_end)
            }
            None => {
                self.pending.push((id, on_end));
                None
            }
        }
    }
}

type SharedCompletions = Arc<Mutex<Completions>>;

fn finish_utterance(completions: &SharedCompletions, id: UtteranceId) {
    let callback = completions
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .finish(id);
    if let Some(on_end) = callback {
        on_end();
    }
}

/// Background thread re-querying the voice list
struct CatalogWatcher {
    stop: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl CatalogWatcher {
    fn spawn(tts: Tts, interval: Duration, notify: CatalogNotify) -> Self {
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            let mut last = snapshot(&tts).unwrap_or_default();
            loop {
                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    _ => break,
                }
                match snapshot(&tts) {
                    Ok(current) if current != last => {
                        debug!("Voice catalog changed: {} voices", current.len());
                        last = current;
                        notify();
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Catalog watcher query failed: {}", e),
                }
            }
            debug!("Catalog watcher stopped");
        });

        Self {
            stop: Some(stop),
            handle: Some(handle),
        }
    }
}

impl Drop for CatalogWatcher {
    fn drop(&mut self) {
        // Disconnecting the channel wakes the thread immediately
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Catalog watcher thread panicked");
            }
        }
    }
}

fn snapshot(tts: &Tts) -> Result<Vec<Voice>> {
    let voices = tts
        .voices()
        .map_err(|e| SelectorError::Speech(format!("Failed to get voices: {}", e)))?;
    Ok(voices.iter().map(to_voice).collect())
}

fn to_voice(voice: &tts::Voice) -> Voice {
    Voice::new(voice.name(), voice.language().to_string(), voice.id())
}

/// Pick the engine voice whose id is `wanted`, else the engine default
///
/// `None` means neither is known and the engine keeps its current voice.
fn choose_voice<T: Clone>(
    wanted: Option<&str>,
    available: Vec<T>,
    id_of: impl Fn(&T) -> String,
    default: Option<&T>,
) -> Option<T> {
    let found = wanted.and_then(|id| available.into_iter().find(|v| id_of(v) == id));
    if found.is_none() {
        if let Some(id) = wanted {
            warn!("Voice {} not found in engine, using default", id);
        }
    }
    found.or_else(|| default.cloned())
}

/// Map a selector multiplier onto a backend's native parameter range
///
/// 1.0 maps to the backend's normal value; the selector's lowest and highest
/// multipliers map to the backend's minimum and maximum, linearly in between.
pub fn scale_multiplier(multiplier: f32, min: f32, normal: f32, max: f32) -> f32 {
    let value = if multiplier >= 1.0 {
        normal + (multiplier - 1.0) / (MAX_MULTIPLIER - 1.0) * (max - normal)
    } else {
        normal - (1.0 - multiplier) / (1.0 - MIN_MULTIPLIER) * (normal - min)
    };
    value.clamp(min.min(max), max.max(min))
}

/// Native speech host backed by the tts crate
pub struct NativeHost {
    /// The tts crate's TTS instance
    tts: Tts,

    /// Voice the engine used before any preview selected one
    default_voice: Option<tts::Voice>,

    /// Completion callbacks keyed by utterance id
    completions: SharedCompletions,

    /// Whether the engine reports utterance end/stop
    callbacks: bool,

    /// Catalog watcher, present while subscribed
    watcher: Option<CatalogWatcher>,

    /// Interval between catalog re-queries
    poll_interval: Duration,
}

impl NativeHost {
    /// Create a new native speech host
    ///
    /// Initializes the platform-appropriate TTS backend and hooks its
    /// utterance callbacks when supported.
    pub fn new(poll_interval: Duration) -> Result<Self> {
        debug!("Creating native TTS host");

        let mut tts = Tts::default()
            .map_err(|e| SelectorError::Speech(format!("Failed to initialize TTS: {}", e)))?;
        let features = tts.supported_features();

        let default_voice = if features.get_voice {
            tts.voice().unwrap_or_else(|e| {
                warn!("Failed to read default voice: {}", e);
                None
            })
        } else {
            None
        };

        let completions = SharedCompletions::default();
        let callbacks = features.utterance_callbacks;
        if callbacks {
            let on_end = Arc::clone(&completions);
            tts.on_utterance_end(Some(Box::new(move |id| finish_utterance(&on_end, id))))
                .map_err(|e| SelectorError::Speech(format!("Failed to hook utterance end: {}", e)))?;
            let on_stop = Arc::clone(&completions);
            tts.on_utterance_stop(Some(Box::new(move |id| finish_utterance(&on_stop, id))))
                .map_err(|e| {
                    SelectorError::Speech(format!("Failed to hook utterance stop: {}", e))
                })?;
        } else {
            warn!("Utterance callbacks not supported; polling for speech end");
        }

        debug!("Native TTS host created successfully");

        Ok(Self {
            tts,
            default_voice,
            completions,
            callbacks,
            watcher: None,
            poll_interval,
        })
    }

    fn apply_voice(&mut self, voice: Option<&Voice>) -> Result<()> {
        if !self.tts.supported_features().voice {
            warn!("Voice selection not supported on this platform");
            return Ok(());
        }

        let available = match voice {
            Some(_) => self
                .tts
                .voices()
                .map_err(|e| SelectorError::Speech(format!("Failed to get voices: {}", e)))?,
            None => Vec::new(),
        };
        let wanted = voice.map(|v| v.uri.as_str());
        let target = choose_voice(wanted, available, |v| v.id(), self.default_voice.as_ref());

        match target {
            Some(target) => {
                debug!("Selecting voice: {:?}", target);
                self.tts
                    .set_voice(&target)
                    .map_err(|e| SelectorError::Speech(format!("Failed to set voice: {}", e)))?;
            }
            None => warn!(
                "Engine default voice unknown, {} speaks with the last selected voice",
                voice.map_or("preview", |v| v.name.as_str())
            ),
        }
        Ok(())
    }

    fn apply_prosody(&mut self, rate: f32, pitch: f32) -> Result<()> {
        let features = self.tts.supported_features();

        if features.rate {
            let native = scale_multiplier(
                rate,
                self.tts.min_rate(),
                self.tts.normal_rate(),
                self.tts.max_rate(),
            );
            debug!("Setting rate {:.1}x -> {}", rate, native);
            self.tts
                .set_rate(native)
                .map_err(|e| SelectorError::Speech(format!("Failed to set rate: {}", e)))?;
        } else {
            warn!("Rate control not supported on this platform");
        }

        if features.pitch {
            let native = scale_multiplier(
                pitch,
                self.tts.min_pitch(),
                self.tts.normal_pitch(),
                self.tts.max_pitch(),
            );
            debug!("Setting pitch {:.1}x -> {}", pitch, native);
            self.tts
                .set_pitch(native)
                .map_err(|e| SelectorError::Speech(format!("Failed to set pitch: {}", e)))?;
        } else {
            warn!("Pitch control not supported on this platform");
        }

        Ok(())
    }

    /// Complete an utterance by watching `is_speaking` from a helper thread
    fn poll_for_end(&self, on_end: UtteranceEnd) {
        if !self.tts.supported_features().is_speaking {
            warn!("Cannot detect speech end on this platform");
            on_end();
            return;
        }

        let tts = self.tts.clone();
        thread::spawn(move || {
            // Give the engine a moment to start before sampling
            thread::sleep(SPEAKING_POLL * 2);
            while let Ok(true) = tts.is_speaking() {
                thread::sleep(SPEAKING_POLL);
            }
            on_end();
        });
    }
}

impl SpeechHost for NativeHost {
    fn voices(&mut self) -> Result<Vec<Voice>> {
        snapshot(&self.tts)
    }

    fn subscribe(&mut self, notify: CatalogNotify) -> Result<()> {
        debug!(
            "Watching voice catalog every {}ms",
            self.poll_interval.as_millis()
        );
        // Replacing the watcher drops (and joins) the previous one
        self.watcher = Some(CatalogWatcher::spawn(
            self.tts.clone(),
            self.poll_interval,
            notify,
        ));
        Ok(())
    }

    fn unsubscribe(&mut self) -> Result<()> {
        if self.watcher.take().is_some() {
            debug!("Stopped watching voice catalog");
        }
        Ok(())
    }

    fn speak(&mut self, utterance: Utterance, interrupt: bool, on_end: UtteranceEnd) -> Result<()> {
        self.apply_voice(utterance.voice.as_ref())?;
        self.apply_prosody(utterance.rate, utterance.pitch)?;

        debug!("Speaking: {}", utterance.text);
        let id = self.tts.speak(utterance.text, interrupt).map_err(|e| {
            error!("Failed to speak: {}", e);
            SelectorError::Speech(format!("Speak failed: {}", e))
        })?;

        match id {
            Some(id) if self.callbacks => {
                let already_done = self
                    .completions
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .register(id, on_end);
                if let Some(on_end) = already_done {
                    on_end();
                }
            }
            _ => self.poll_for_end(on_end),
        }

        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        debug!("Stopping speech");
        if !self.tts.supported_features().stop {
            warn!("Stopping speech not supported on this platform");
            return Ok(());
        }
        self.tts.stop().map_err(|e| {
            error!("Failed to stop speech: {}", e);
            SelectorError::Speech(format!("Stop failed: {}", e))
        })?;
        Ok(())
    }
}

impl Drop for NativeHost {
    fn drop(&mut self) {
        self.watcher.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_host() {
        // May fail without speech-dispatcher (Linux) or in CI without audio
        match NativeHost::new(Duration::from_millis(500)) {
            Ok(_) => println!("✓ Native TTS host initialized successfully"),
            Err(e) => println!("⚠ TTS initialization failed (may be expected in CI): {}", e),
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_choose_voice_by_id() {
        let default = "urn:default".to_string();
        let picked = choose_voice(Some("urn:b"), ids(&["urn:a", "urn:b"]), String::clone, Some(&default));
        assert_eq!(picked.as_deref(), Some("urn:b"));
    }

    #[test]
    fn test_choose_voice_falls_back_to_default() {
        let default = "urn:default".to_string();
        let missing = choose_voice(Some("urn:gone"), ids(&["urn:a"]), String::clone, Some(&default));
        assert_eq!(missing.as_deref(), Some("urn:default"));

        let unnamed = choose_voice(None, Vec::new(), String::clone, Some(&default));
        assert_eq!(unnamed.as_deref(), Some("urn:default"));
    }

    #[test]
    fn test_choose_voice_without_default_keeps_current() {
        assert_eq!(choose_voice(Some("urn:gone"), ids(&["urn:a"]), String::clone, None), None);
        assert_eq!(choose_voice(None, Vec::new(), String::clone, None), None);
    }

    #[test]
    fn test_scale_multiplier_speech_dispatcher_range() {
        // Speech Dispatcher: -100..=100, normal 0
        assert_eq!(scale_multiplier(1.0, -100.0, 0.0, 100.0), 0.0);
        assert_eq!(scale_multiplier(2.0, -100.0, 0.0, 100.0), 100.0);
        assert_eq!(scale_multiplier(0.5, -100.0, 0.0, 100.0), -100.0);
        assert!((scale_multiplier(1.5, -100.0, 0.0, 100.0) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_scale_multiplier_clamps() {
        // AVFoundation-style rate: 0.1..=2.0, normal 0.5
        assert_eq!(scale_multiplier(1.0, 0.1, 0.5, 2.0), 0.5);
        assert_eq!(scale_multiplier(3.0, 0.1, 0.5, 2.0), 2.0);
        assert_eq!(scale_multiplier(0.1, 0.1, 0.5, 2.0), 0.1);
    }
}
