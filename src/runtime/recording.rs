use std::cell::RefCell;
use std::rc::Rc;

use crate::project::model::AudioRef;
use crate::runtime::audio::{AudioHandle, AudioLibrary, SpeechSynth, VoiceChannel};

#[derive(Clone, Debug, PartialEq, Eq)]
/// One call made against a recording collaborator.
pub enum AudioEvent {
    /// `speak(text)`.
    Speak(String),
    /// `stop_speech()`.
    StopSpeech,
    /// Recorded clip started.
    Play(String),
    /// Recorded clip paused.
    Pause(String),
}

/// Shared, cloneable log of [`AudioEvent`]s.
///
/// Backs in-memory speech and audio collaborators that play nothing and only record what
/// they were asked to do. Used for transcripts and for asserting audio routing.
#[derive(Clone, Debug, Default)]
pub struct AudioLog {
    events: Rc<RefCell<Vec<AudioEvent>>>,
}

impl AudioLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`VoiceChannel`] whose speech and audio collaborators append to this log.
    pub fn channel(&self) -> VoiceChannel {
        VoiceChannel::new(
            Box::new(LoggedSpeech { log: self.clone() }),
            Box::new(LoggedLibrary { log: self.clone() }),
        )
    }

    /// Snapshot of all events so far.
    pub fn events(&self) -> Vec<AudioEvent> {
        self.events.borrow().clone()
    }

    /// Remove and return all events so far.
    pub fn drain(&self) -> Vec<AudioEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Events other than [`AudioEvent::StopSpeech`], which every cue change emits.
    pub fn audible(&self) -> Vec<AudioEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| **e != AudioEvent::StopSpeech)
            .cloned()
            .collect()
    }

    /// [`AudioLog::drain`] without [`AudioEvent::StopSpeech`].
    pub fn drain_audible(&self) -> Vec<AudioEvent> {
        self.drain()
            .into_iter()
            .filter(|e| *e != AudioEvent::StopSpeech)
            .collect()
    }

    fn push(&self, e: AudioEvent) {
        self.events.borrow_mut().push(e);
    }
}

struct LoggedSpeech {
    log: AudioLog,
}

impl SpeechSynth for LoggedSpeech {
    fn speak(&mut self, text: &str) {
        self.log.push(AudioEvent::Speak(text.to_string()));
    }

    fn stop_speech(&mut self) {
        self.log.push(AudioEvent::StopSpeech);
    }
}

struct LoggedLibrary {
    log: AudioLog,
}

impl AudioLibrary for LoggedLibrary {
    fn open(&mut self, audio: &AudioRef) -> Option<Box<dyn AudioHandle>> {
        Some(Box::new(LoggedHandle {
            log: self.log.clone(),
            src: audio.0.clone(),
        }))
    }
}

struct LoggedHandle {
    log: AudioLog,
    src: String,
}

impl AudioHandle for LoggedHandle {
    fn play(&mut self) {
        self.log.push(AudioEvent::Play(self.src.clone()));
    }

    fn pause(&mut self) {
        self.log.push(AudioEvent::Pause(self.src.clone()));
    }
}
