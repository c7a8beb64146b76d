use super::*;
use crate::runtime::recording::{AudioEvent, AudioLog};

fn scene_with_audio() -> Scene {
    let mut s = Scene::new("s1", "Dock", "");
    s.audio_by_line
        .insert("Hero: Hi".to_string(), AudioRef("hi.mp3".to_string()));
    s
}

#[test]
fn cue_prefers_recorded_audio_on_exact_match() {
    let s = scene_with_audio();
    assert_eq!(
        cue_for(&s, "Hero: Hi", true),
        Cue::Recorded(&AudioRef("hi.mp3".to_string()))
    );
    assert_eq!(cue_for(&s, "Hero:  Hi", true), Cue::Speech("Hero:  Hi"));
    assert_eq!(cue_for(&s, "hero: hi", false), Cue::Silent);
}

#[test]
fn control_lines_are_never_voiced() {
    let mut s = scene_with_audio();
    s.audio_by_line
        .insert(">> GOTO: X".to_string(), AudioRef("nope.mp3".to_string()));
    assert_eq!(cue_for(&s, ">> GOTO: X", true), Cue::Silent);
}

#[test]
fn new_cue_replaces_previous_handle() {
    let log = AudioLog::new();
    let mut ch = log.channel();
    let a = AudioRef("a.mp3".to_string());
    ch.play(Cue::Recorded(&a));
    assert!(ch.is_holding());
    ch.play(Cue::Speech("next"));
    assert!(!ch.is_holding());
    assert_eq!(
        log.audible(),
        [
            AudioEvent::Play("a.mp3".to_string()),
            AudioEvent::Pause("a.mp3".to_string()),
            AudioEvent::Speak("next".to_string()),
        ]
    );
}

#[test]
fn drop_releases_held_handle() {
    let log = AudioLog::new();
    {
        let mut ch = log.channel();
        let a = AudioRef("a.mp3".to_string());
        ch.play(Cue::Recorded(&a));
    }
    assert_eq!(
        log.events().last(),
        Some(&AudioEvent::StopSpeech)
    );
    assert!(log.events().contains(&AudioEvent::Pause("a.mp3".to_string())));
}

#[test]
fn silent_channel_holds_nothing() {
    let mut ch = VoiceChannel::silent();
    let a = AudioRef("a.mp3".to_string());
    ch.play(Cue::Recorded(&a));
    assert!(!ch.is_holding());
}
