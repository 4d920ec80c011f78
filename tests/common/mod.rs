//! Shared test fixtures: a scriptable speech host and a selector harness

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use voice_selector::catalog::Voice;
use voice_selector::speech::{CatalogNotify, EventSink, HostEvent, SpeechHost, Utterance, UtteranceEnd};
use voice_selector::state::config::Config;
use voice_selector::state::SelectorState;
use voice_selector::{Result, SelectorError};

#[derive(Default)]
struct FakeInner {
    voices: Vec<Voice>,
    notify: Option<CatalogNotify>,
    spoken: Vec<(Utterance, bool)>,
    pending: VecDeque<UtteranceEnd>,
    stops: usize,
    fail_speak: bool,
    fail_query: bool,
}

/// Speech host whose catalog and completions are driven by the test
pub struct FakeHost {
    inner: Arc<Mutex<FakeInner>>,
}

/// Test-side handle to a [`FakeHost`] owned by the selector
#[derive(Clone)]
pub struct FakeHandle {
    inner: Arc<Mutex<FakeInner>>,
}

impl FakeHost {
    pub fn new(voices: Vec<Voice>) -> (Self, FakeHandle) {
        let inner = Arc::new(Mutex::new(FakeInner {
            voices,
            ..FakeInner::default()
        }));
        (
            Self {
                inner: Arc::clone(&inner),
            },
            FakeHandle { inner },
        )
    }
}

impl SpeechHost for FakeHost {
    fn voices(&mut self) -> Result<Vec<Voice>> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_query {
            return Err(SelectorError::Speech("query failed".into()));
        }
        Ok(inner.voices.clone())
    }

    fn subscribe(&mut self, notify: CatalogNotify) -> Result<()> {
        self.inner.lock().unwrap().notify = Some(notify);
        Ok(())
    }

    fn unsubscribe(&mut self) -> Result<()> {
        self.inner.lock().unwrap().notify = None;
        Ok(())
    }

    fn speak(&mut self, utterance: Utterance, interrupt: bool, on_end: UtteranceEnd) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_speak {
            return Err(SelectorError::Speech("no audio device".into()));
        }
        inner.spoken.push((utterance, interrupt));
        inner.pending.push_back(on_end);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let ended: Vec<UtteranceEnd> = {
            let mut inner = self.inner.lock().unwrap();
            inner.stops += 1;
            inner.pending.drain(..).collect()
        };
        ended.into_iter().for_each(|on_end| on_end());
        Ok(())
    }
}

impl FakeHandle {
    /// Replace the host catalog without notifying
    pub fn set_voices(&self, voices: Vec<Voice>) {
        self.inner.lock().unwrap().voices = voices;
    }

    /// Fire the catalog-changed callback, if subscribed
    pub fn notify_catalog_changed(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        match &inner.notify {
            Some(notify) => {
                notify();
                true
            }
            None => false,
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.inner.lock().unwrap().notify.is_some()
    }

    /// Finish the oldest utterance still playing
    pub fn finish_oldest(&self) -> bool {
        let on_end = self.inner.lock().unwrap().pending.pop_front();
        match on_end {
            Some(on_end) => {
                on_end();
                true
            }
            None => false,
        }
    }

    /// Finish the newest utterance still playing
    pub fn finish_newest(&self) -> bool {
        let on_end = self.inner.lock().unwrap().pending.pop_back();
        match on_end {
            Some(on_end) => {
                on_end();
                true
            }
            None => false,
        }
    }

    pub fn spoken(&self) -> Vec<(Utterance, bool)> {
        self.inner.lock().unwrap().spoken.clone()
    }

    pub fn last_spoken(&self) -> Option<Utterance> {
        self.spoken().pop().map(|(utterance, _)| utterance)
    }

    pub fn stops(&self) -> usize {
        self.inner.lock().unwrap().stops
    }

    pub fn set_fail_speak(&self, fail: bool) {
        self.inner.lock().unwrap().fail_speak = fail;
    }

    pub fn set_fail_query(&self, fail: bool) {
        self.inner.lock().unwrap().fail_query = fail;
    }
}

/// Event sink that queues host events for the test to apply
pub fn recording_sink() -> (EventSink, Arc<Mutex<Vec<HostEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let queue = Arc::clone(&events);
    let sink = EventSink::new(move |event| queue.lock().unwrap().push(event));
    (sink, events)
}

/// Selector state wired to a fake host
pub struct Harness {
    pub state: SelectorState,
    pub host: FakeHandle,
    pub events: Arc<Mutex<Vec<HostEvent>>>,
}

impl Harness {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self::with_config(voices, Config::default())
    }

    pub fn with_config(voices: Vec<Voice>, config: Config) -> Self {
        let (host, handle) = FakeHost::new(voices);
        let (sink, events) = recording_sink();
        let state = SelectorState::with_host(config, Box::new(host), sink)
            .expect("selector state");
        Self {
            state,
            host: handle,
            events,
        }
    }

    /// Apply queued host events the way the event loop does
    pub fn pump(&mut self) -> usize {
        let queued: Vec<HostEvent> = self.events.lock().unwrap().drain(..).collect();
        let count = queued.len();
        for event in queued {
            self.state.handle_host_event(event);
        }
        count
    }

    pub fn names(&self) -> Vec<String> {
        self.state
            .filtered_voices()
            .iter()
            .map(|v| v.name.clone())
            .collect()
    }
}

pub fn voice(name: &str, lang: &str) -> Voice {
    Voice::new(name, lang, format!("urn:voice:{}", name.to_lowercase()))
}

/// The two-voice catalog used in the examples
pub fn ava_milena() -> Vec<Voice> {
    vec![voice("Ava", "en-US"), voice("Milena", "ru-RU")]
}

/// A larger mixed catalog, deliberately unsorted by language
pub fn sample_voices() -> Vec<Voice> {
    vec![
        voice("Samantha", "en-US"),
        voice("Thomas", "fr-FR"),
        voice("Daniel", "en-GB"),
        voice("Milena", "ru-RU"),
        voice("Amélie", "fr-CA"),
        voice("Alex", "en-US"),
        voice("Anna", "de-DE"),
    ]
}
