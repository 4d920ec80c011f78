//! Application state management
//!
//! `SelectorState` is the single in-memory component state. It is only
//! touched from the event loop: key handlers call its operations and host
//! callbacks reach it as [`HostEvent`]s.

pub mod config;
pub mod settings;

use crate::catalog::{self, CatalogLoader, FilterCriteria, LanguageFilter, Voice};
use crate::input::HandlerStack;
use crate::playback::PlaybackController;
use crate::speech::{EventSink, HostEvent, RequestId, SpeechHost};
use crate::Result;
use config::Config;
use log::{debug, error, info};
use settings::{ScriptEditor, SettingsField, VoiceSettings};

/// Main application state for the voice selector
pub struct SelectorState {
    /// Startup configuration
    pub config: Config,

    /// Platform speech engine
    pub host: Box<dyn SpeechHost>,

    /// Latest voice catalog snapshot
    pub catalog: CatalogLoader,

    /// Search text and language selection
    pub criteria: FilterCriteria,

    /// Preview script and its staged-edit dialog
    pub script: ScriptEditor,

    /// Live rate/pitch values
    pub settings: VoiceSettings,

    /// Voice settings dialog: `Some` while open, holding the focused field
    pub settings_dialog: Option<SettingsField>,

    /// Language picker: `Some` while open, holding the highlighted option
    pub language_picker: Option<usize>,

    /// Whether keystrokes edit the search box
    pub search_focused: bool,

    /// Row cursor into the filtered list
    pub cursor: usize,

    /// Preview issuing and playing status
    pub playback: PlaybackController,

    /// Key handler stack for modal input
    pub handlers: HandlerStack,

    /// Last host failure, shown on the status line
    pub notice: Option<String>,

    /// Set when the user asks to quit
    pub quit: bool,
}

impl SelectorState {
    /// Create state on the platform speech host
    pub fn new(config: Config, sink: EventSink) -> Result<Self> {
        let host = crate::speech::create_host(config.poll_interval())?;
        Self::with_host(config, host, sink)
    }

    /// Create state on a given speech host
    ///
    /// Loads the catalog and subscribes to its changes; notifications and
    /// utterance completions are posted to `sink`.
    pub fn with_host(config: Config, mut host: Box<dyn SpeechHost>, sink: EventSink) -> Result<Self> {
        let mut catalog = CatalogLoader::new();
        catalog.attach(host.as_mut(), &sink)?;

        let settings = VoiceSettings {
            rate: config.rate(),
            pitch: config.pitch(),
        };
        let criteria = FilterCriteria::new("", config.language());
        let script = ScriptEditor::new(config.script());
        let playback = PlaybackController::new(sink, config.interrupt());

        info!("Initial rate {:.1}, pitch {:.1}", settings.rate, settings.pitch);
        info!("Initial language filter: {}", criteria.lang);
        info!("Overlapping previews interrupt: {}", playback.interrupts());

        Ok(Self {
            config,
            host,
            catalog,
            criteria,
            script,
            settings,
            settings_dialog: None,
            language_picker: None,
            search_focused: false,
            cursor: 0,
            playback,
            handlers: HandlerStack::new(),
            notice: None,
            quit: false,
        })
    }

    /// Apply a host notification
    pub fn handle_host_event(&mut self, event: HostEvent) {
        debug!("Host event: {:?}", event);
        match event {
            HostEvent::CatalogChanged => {
                self.catalog.reload(self.host.as_mut());
                self.clamp_cursor();
            }
            HostEvent::UtteranceFinished(request) => {
                self.playback.finish(request);
            }
        }
    }

    /// Stop listening to the host
    pub fn shutdown(&mut self) -> Result<()> {
        self.catalog.detach(self.host.as_mut())
    }

    // Derived views

    /// Current catalog, in host order
    pub fn voices(&self) -> &[Voice] {
        self.catalog.voices()
    }

    /// Distinct catalog languages, sorted
    pub fn languages(&self) -> Vec<String> {
        catalog::languages(self.catalog.voices())
    }

    /// Voices passing the current criteria, in catalog order
    pub fn filtered_voices(&self) -> Vec<&Voice> {
        catalog::filtered(self.catalog.voices(), &self.criteria)
    }

    /// Voice under the row cursor
    pub fn selected_voice(&self) -> Option<&Voice> {
        self.filtered_voices().get(self.cursor).copied()
    }

    /// Options shown by the language picker: "all" first, then each language
    pub fn language_options(&self) -> Vec<LanguageFilter> {
        std::iter::once(LanguageFilter::All)
            .chain(self.languages().into_iter().map(LanguageFilter::Only))
            .collect()
    }

    // Row cursor

    /// Move the row cursor, staying within the filtered list
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.filtered_voices().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let target = self.cursor as isize + delta;
        self.cursor = target.clamp(0, len as isize - 1) as usize;
    }

    fn clamp_cursor(&mut self) {
        let len = self.filtered_voices().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    // Playback

    /// Preview a voice by name with the current script and settings
    pub fn preview(&mut self, voice_name: &str) -> Result<RequestId> {
        self.playback.preview(
            self.host.as_mut(),
            self.catalog.voices(),
            voice_name,
            self.script.script(),
            self.settings,
        )
    }

    /// Preview the voice under the cursor
    ///
    /// Does nothing when that voice is already playing. Host failures are
    /// logged and shown as the notice; the selector keeps running.
    pub fn preview_selected(&mut self) {
        let Some(name) = self.selected_voice().map(|v| v.name.clone()) else {
            return;
        };
        if self.playback.is_playing(&name) {
            debug!("{} is already playing", name);
            return;
        }
        match self.preview(&name) {
            Ok(_) => self.notice = None,
            Err(e) => {
                error!("Preview of {} failed: {}", name, e);
                self.notice = Some(format!("Preview of {} failed: {}", name, e));
            }
        }
    }

    /// Silence current speech
    pub fn silence(&mut self) {
        if let Err(e) = self.playback.silence(self.host.as_mut()) {
            error!("Failed to silence speech: {}", e);
            self.notice = Some(format!("Failed to silence speech: {}", e));
        }
    }

    // Search

    /// Replace the search text
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
        self.clamp_cursor();
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.criteria.search.push(ch);
        self.clamp_cursor();
    }

    pub fn pop_search_char(&mut self) {
        self.criteria.search.pop();
        self.clamp_cursor();
    }

    // Language

    /// Restrict the list to a language
    pub fn set_language(&mut self, lang: LanguageFilter) {
        debug!("Language filter: {}", lang);
        self.criteria.lang = lang;
        self.clamp_cursor();
    }

    /// Open the language picker on the current selection
    pub fn open_language_picker(&mut self) {
        let current = self
            .language_options()
            .iter()
            .position(|option| *option == self.criteria.lang)
            .unwrap_or(0);
        self.language_picker = Some(current);
    }

    pub fn move_language_picker(&mut self, delta: isize) {
        let count = self.language_options().len() as isize;
        if let Some(idx) = self.language_picker.as_mut() {
            *idx = (*idx as isize + delta).clamp(0, count - 1) as usize;
        }
    }

    /// Apply the highlighted language and close the picker
    pub fn confirm_language_picker(&mut self) {
        if let Some(idx) = self.language_picker.take() {
            if let Some(lang) = self.language_options().into_iter().nth(idx) {
                self.set_language(lang);
            }
        }
    }

    pub fn close_language_picker(&mut self) {
        self.language_picker = None;
    }

    // Voice settings dialog

    pub fn open_settings_dialog(&mut self) {
        debug!("Settings dialog opened");
        self.settings_dialog = Some(SettingsField::Rate);
    }

    /// Close the settings dialog; values were already committed
    pub fn close_settings_dialog(&mut self) {
        debug!("Settings dialog closed");
        self.settings_dialog = None;
    }
}
