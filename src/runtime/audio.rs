use crate::project::model::{AudioRef, Scene};
use crate::runtime::script;

/// Fire-and-forget speech synthesis.
pub trait SpeechSynth {
    /// Start speaking `text`, replacing anything in progress.
    fn speak(&mut self, text: &str);
    /// Cancel any speech in progress.
    fn stop_speech(&mut self);
}

/// A playable recorded clip.
pub trait AudioHandle {
    /// Start or resume playback.
    fn play(&mut self);
    /// Pause playback.
    fn pause(&mut self);
}

/// Turns an [`AudioRef`] into a playable handle.
pub trait AudioLibrary {
    /// Open a clip; `None` when it cannot be played.
    fn open(&mut self, audio: &AudioRef) -> Option<Box<dyn AudioHandle>>;
}

/// Speech backend that says nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSpeech;

impl SpeechSynth for NullSpeech {
    fn speak(&mut self, _text: &str) {}
    fn stop_speech(&mut self) {}
}

/// Audio library that has no clips.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioLibrary for NullAudio {
    fn open(&mut self, _audio: &AudioRef) -> Option<Box<dyn AudioHandle>> {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a beat should be heard.
pub enum Cue<'a> {
    /// Play the recorded clip.
    Recorded(&'a AudioRef),
    /// Synthesize the beat text.
    Speech(&'a str),
    /// Nothing to play.
    Silent,
}

/// Decide how `beat` is voiced in `scene`.
///
/// Control lines are silent. Otherwise the exact beat text is looked up in the scene's
/// recorded audio; a miss falls back to speech when enabled.
pub fn cue_for<'a>(scene: &'a Scene, beat: &'a str, speech_enabled: bool) -> Cue<'a> {
    if script::is_control(beat) {
        return Cue::Silent;
    }
    if let Some(audio) = scene.audio_for(beat) {
        return Cue::Recorded(audio);
    }
    if speech_enabled {
        Cue::Speech(beat)
    } else {
        Cue::Silent
    }
}

/// Single-slot audio output.
///
/// Holds at most one recorded handle. Every new cue stops the previous handle and any
/// speech first; the slot is also released on drop.
pub struct VoiceChannel {
    speech: Box<dyn SpeechSynth>,
    library: Box<dyn AudioLibrary>,
    current: Option<Box<dyn AudioHandle>>,
}

impl std::fmt::Debug for VoiceChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceChannel")
            .field("holding_handle", &self.current.is_some())
            .finish()
    }
}

impl Default for VoiceChannel {
    fn default() -> Self {
        Self::silent()
    }
}

impl VoiceChannel {
    /// Channel over the given collaborators.
    pub fn new(speech: Box<dyn SpeechSynth>, library: Box<dyn AudioLibrary>) -> Self {
        Self {
            speech,
            library,
            current: None,
        }
    }

    /// Channel that plays nothing.
    pub fn silent() -> Self {
        Self::new(Box::new(NullSpeech), Box::new(NullAudio))
    }

    /// Whether a recorded handle is currently held.
    pub fn is_holding(&self) -> bool {
        self.current.is_some()
    }

    /// Replace whatever is playing with `cue`.
    pub fn play(&mut self, cue: Cue<'_>) {
        self.release();
        match cue {
            Cue::Recorded(audio) => match self.library.open(audio) {
                Some(mut handle) => {
                    handle.play();
                    self.current = Some(handle);
                }
                None => tracing::warn!("recorded audio could not be opened"),
            },
            Cue::Speech(text) => self.speech.speak(text),
            Cue::Silent => {}
        }
    }

    /// Stop speech and pause and drop the held handle.
    pub fn release(&mut self) {
        if let Some(mut handle) = self.current.take() {
            handle.pause();
        }
        self.speech.stop_speech();
    }
}

impl Drop for VoiceChannel {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/audio.rs"]
mod tests;
