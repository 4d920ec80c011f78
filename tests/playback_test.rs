//! Playback controller tests
//!
//! Previews go out with the current script and settings, and only the
//! completion of the latest preview clears the playing status

mod common;

use common::{ava_milena, recording_sink, FakeHost, Harness};
use voice_selector::playback::{PlaybackController, PlaybackStatus};
use voice_selector::speech::{HostEvent, RequestId};
use voice_selector::state::settings::VoiceSettings;

#[test]
fn test_preview_marks_voice_playing_immediately() {
    let mut h = Harness::new(ava_milena());

    h.state.preview("Ava").unwrap();

    assert_eq!(h.state.playback.currently_playing(), Some("Ava"));
    assert!(h.state.playback.is_playing("Ava"));
    assert!(!h.state.playback.is_playing("Milena"));
}

#[test]
fn test_completion_clears_status() {
    let mut h = Harness::new(ava_milena());

    h.state.preview("Ava").unwrap();
    assert!(h.host.finish_oldest());
    assert_eq!(h.pump(), 1);

    assert_eq!(h.state.playback.currently_playing(), None);
    assert_eq!(*h.state.playback.status(), PlaybackStatus::Idle);
}

#[test]
fn test_utterance_carries_script_voice_and_settings() {
    let mut h = Harness::new(ava_milena());
    h.state.settings.set_rate(1.7);
    h.state.settings.set_pitch(0.8);

    h.state.preview("Milena").unwrap();

    let utterance = h.host.last_spoken().unwrap();
    assert_eq!(utterance.text, "Hello, how are you?");
    assert_eq!(utterance.voice.as_ref().map(|v| v.name.as_str()), Some("Milena"));
    assert_eq!(utterance.voice.as_ref().map(|v| v.lang.as_str()), Some("ru-RU"));
    assert_eq!(utterance.rate, 1.7);
    assert_eq!(utterance.pitch, 0.8);
}

#[test]
fn test_unknown_voice_falls_back_to_default() {
    let mut h = Harness::new(ava_milena());

    h.state.preview("Nobody").unwrap();

    let utterance = h.host.last_spoken().unwrap();
    assert!(utterance.voice.is_none());
    assert_eq!(h.state.playback.currently_playing(), Some("Nobody"));
}

#[test]
fn test_stale_completion_keeps_newer_preview() {
    let mut h = Harness::new(ava_milena());

    h.state.preview("Ava").unwrap();
    h.state.preview("Milena").unwrap();
    assert_eq!(h.state.playback.currently_playing(), Some("Milena"));

    // Ava's utterance ends late, after Milena's preview was issued
    assert!(h.host.finish_oldest());
    h.pump();
    assert_eq!(h.state.playback.currently_playing(), Some("Milena"));

    assert!(h.host.finish_oldest());
    h.pump();
    assert_eq!(h.state.playback.currently_playing(), None);
}

#[test]
fn test_request_ids_increase() {
    let mut h = Harness::new(ava_milena());

    let first = h.state.preview("Ava").unwrap();
    let second = h.state.preview("Milena").unwrap();
    let third = h.state.preview("Ava").unwrap();

    assert!(first < second && second < third);
}

#[test]
fn test_interrupt_flag_reaches_host() {
    let mut h = Harness::new(ava_milena());
    h.state.preview("Ava").unwrap();
    assert!(h.host.spoken()[0].1);

    let mut config = voice_selector::state::config::Config::default();
    config.set("preview", "interrupt", "false");
    let mut queued = Harness::with_config(ava_milena(), config);
    queued.state.preview("Ava").unwrap();
    assert!(!queued.host.spoken()[0].1);
}

#[test]
fn test_failed_submission_leaves_status_idle() {
    let mut h = Harness::new(ava_milena());
    h.host.set_fail_speak(true);

    assert!(h.state.preview("Ava").is_err());
    assert_eq!(h.state.playback.currently_playing(), None);

    // The UI path logs and carries on
    h.state.preview_selected();
    assert_eq!(h.state.playback.currently_playing(), None);
}

#[test]
fn test_preview_selected_skips_voice_already_playing() {
    let mut h = Harness::new(ava_milena());

    h.state.preview_selected();
    h.state.preview_selected();

    assert_eq!(h.host.spoken().len(), 1);
    assert_eq!(h.state.playback.currently_playing(), Some("Ava"));
}

#[test]
fn test_preview_selected_switches_voice() {
    let mut h = Harness::new(ava_milena());

    h.state.preview_selected();
    h.state.move_cursor(1);
    h.state.preview_selected();

    assert_eq!(h.host.spoken().len(), 2);
    assert_eq!(h.state.playback.currently_playing(), Some("Milena"));
}

#[test]
fn test_silence_clears_through_completion() {
    let mut h = Harness::new(ava_milena());

    h.state.preview("Ava").unwrap();
    h.state.silence();
    assert_eq!(h.host.stops(), 1);

    h.pump();
    assert_eq!(h.state.playback.currently_playing(), None);
}

#[test]
fn test_controller_finish_directly() {
    let (mut host, handle) = FakeHost::new(ava_milena());
    let (sink, events) = recording_sink();
    let mut controller = PlaybackController::new(sink, true);

    let request = controller
        .preview(
            &mut host,
            &ava_milena(),
            "Ava",
            "Testing",
            VoiceSettings::default(),
        )
        .unwrap();

    assert!(!controller.finish(RequestId(request.0 + 1)));
    assert_eq!(controller.currently_playing(), Some("Ava"));

    assert!(handle.finish_oldest());
    assert_eq!(
        events.lock().unwrap().as_slice(),
        &[HostEvent::UtteranceFinished(request)]
    );
    assert!(controller.finish(request));
    assert!(!controller.finish(request));
}
