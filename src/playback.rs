//! Voice preview playback
//!
//! Turns a voice name plus the current script and settings into one
//! utterance, and tracks which voice is playing. Every utterance carries a
//! [`RequestId`]; only the completion of the most recent request may clear
//! the playing status, so a late completion from an earlier preview cannot
//! clear a newer one.

use crate::catalog::Voice;
use crate::speech::{EventSink, HostEvent, RequestId, SpeechHost, Utterance};
use crate::state::settings::VoiceSettings;
use crate::Result;
use log::debug;

/// Which voice, if any, is marked playing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Playing {
        voice: String,
        request: RequestId,
    },
}

/// Issues previews and tracks playback status
#[derive(Debug)]
pub struct PlaybackController {
    status: PlaybackStatus,

    /// Last allocated request id
    last_request: u64,

    /// Where completion callbacks post their events
    sink: EventSink,

    /// Stop speech in progress before starting a new preview
    interrupt: bool,
}

impl PlaybackController {
    pub fn new(sink: EventSink, interrupt: bool) -> Self {
        Self {
            status: PlaybackStatus::Idle,
            last_request: 0,
            sink,
            interrupt,
        }
    }

    /// Preview `voice_name` speaking `script`
    ///
    /// A name missing from `voices` is not an error: the utterance goes out
    /// without a voice and the host uses its default. The voice is marked
    /// playing as soon as the host accepts the utterance.
    pub fn preview(
        &mut self,
        host: &mut dyn SpeechHost,
        voices: &[Voice],
        voice_name: &str,
        script: &str,
        settings: VoiceSettings,
    ) -> Result<RequestId> {
        let voice = voices.iter().find(|v| v.name == voice_name).cloned();
        if voice.is_none() {
            debug!("Voice {:?} not in catalog, using host default", voice_name);
        }

        self.last_request += 1;
        let request = RequestId(self.last_request);

        let utterance = Utterance {
            text: script.to_string(),
            voice,
            rate: settings.rate,
            pitch: settings.pitch,
        };
        let sink = self.sink.clone();
        host.speak(
            utterance,
            self.interrupt,
            Box::new(move || sink.send(HostEvent::UtteranceFinished(request))),
        )?;

        debug!("Preview {} started for {}", request, voice_name);
        self.status = PlaybackStatus::Playing {
            voice: voice_name.to_string(),
            request,
        };
        Ok(request)
    }

    /// Apply a completion; returns whether it cleared the status
    pub fn finish(&mut self, request: RequestId) -> bool {
        match &self.status {
            PlaybackStatus::Playing { request: current, .. } if *current == request => {
                debug!("Preview {} finished", request);
                self.status = PlaybackStatus::Idle;
                true
            }
            _ => {
                debug!("Ignoring stale completion {}", request);
                false
            }
        }
    }

    /// Ask the host to stop speaking
    ///
    /// The status clears when the host reports the stopped utterance.
    pub fn silence(&mut self, host: &mut dyn SpeechHost) -> Result<()> {
        host.stop()
    }

    pub fn status(&self) -> &PlaybackStatus {
        &self.status
    }

    /// Name of the voice marked playing
    pub fn currently_playing(&self) -> Option<&str> {
        match &self.status {
            PlaybackStatus::Playing { voice, .. } => Some(voice),
            PlaybackStatus::Idle => None,
        }
    }

    pub fn is_playing(&self, voice_name: &str) -> bool {
        self.currently_playing() == Some(voice_name)
    }

    pub fn interrupts(&self) -> bool {
        self.interrupt
    }
}
