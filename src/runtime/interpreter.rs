use crate::{
    foundation::error::{DramaError, DramaResult},
    project::model::{Project, Scene},
    runtime::audio::{VoiceChannel, cue_for},
    runtime::config::RuntimeOpts,
    runtime::script,
};

/// Resolves GOTO targets.
pub trait SceneDirectory {
    /// First scene whose name equals `name` exactly.
    fn find_by_name(&self, name: &str) -> Option<&Scene>;
}

impl SceneDirectory for Project {
    fn find_by_name(&self, name: &str) -> Option<&Scene> {
        self.scene_by_name(name)
    }
}

impl SceneDirectory for Vec<Scene> {
    fn find_by_name(&self, name: &str) -> Option<&Scene> {
        self.iter().find(|s| s.name == name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Interpreter state.
pub enum PlaybackState {
    /// No scene started, or reset.
    Idle,
    /// Backdrop shown before dialogue; waiting for dismissal.
    EstablishingShot,
    /// Showing the beat at this index.
    Playing(usize),
    /// Past the last beat; the caller decides what happens next.
    SceneComplete,
    /// Control moved to another scene; this scene is finished.
    Transferred,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// One line of the dialogue history.
pub struct HistoryEntry {
    /// Speaker, or "Narrator".
    pub speaker: String,
    /// Spoken text.
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Outcome of [`Interpreter::advance`].
pub enum Advance<'p> {
    /// Moved to the beat at `index`.
    Beat {
        /// New beat index.
        index: usize,
    },
    /// There was no further beat.
    Complete,
    /// The next beat is a GOTO whose target exists. Start that scene to continue.
    Transfer {
        /// Target scene.
        scene: &'p Scene,
    },
    /// The next beat is a GOTO to an unknown scene; playback stays on the current beat.
    Stalled,
}

/// Turn-based playback of one scene's script.
///
/// Calls are expected to be serialized by the caller: one `advance` per reader action.
/// The interpreter never mutates the project; all of its state is discarded on
/// [`Interpreter::reset`].
pub struct Interpreter<'p> {
    directory: &'p dyn SceneDirectory,
    voice: VoiceChannel,
    opts: RuntimeOpts,
    scene: Option<&'p Scene>,
    beats: Vec<String>,
    history: Vec<HistoryEntry>,
    state: PlaybackState,
}

impl std::fmt::Debug for Interpreter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("scene", &self.scene.map(|s| s.name.as_str()))
            .field("state", &self.state)
            .field("beats", &self.beats.len())
            .field("history", &self.history.len())
            .field("voice", &self.voice)
            .finish()
    }
}

impl<'p> Interpreter<'p> {
    /// Idle interpreter resolving GOTOs through `directory`.
    pub fn new(directory: &'p dyn SceneDirectory, voice: VoiceChannel, opts: RuntimeOpts) -> Self {
        Self {
            directory,
            voice,
            opts,
            scene: None,
            beats: Vec::new(),
            history: Vec::new(),
            state: PlaybackState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Scene being played, if any.
    pub fn scene(&self) -> Option<&'p Scene> {
        self.scene
    }

    /// Beats of the current scene.
    pub fn beats(&self) -> &[String] {
        &self.beats
    }

    /// Lines already read, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Runtime options.
    pub fn opts(&self) -> RuntimeOpts {
        self.opts
    }

    /// Whether a recorded audio handle is held.
    pub fn is_holding_audio(&self) -> bool {
        self.voice.is_holding()
    }

    /// Beat shown in [`PlaybackState::Playing`].
    pub fn current_beat(&self) -> Option<&str> {
        match self.state {
            PlaybackState::Playing(i) => self.beats.get(i).map(String::as_str),
            _ => None,
        }
    }

    /// Parsed form of [`Interpreter::current_beat`].
    pub fn current_line(&self) -> Option<script::Line<'_>> {
        self.current_beat().map(script::parse_line)
    }

    /// Begin `scene` from the top, discarding any previous scene's state.
    ///
    /// With no beats the scene completes at once. Otherwise a scene with a backdrop opens
    /// on its establishing shot, and one without starts playing beat 0.
    #[tracing::instrument(skip(self, scene), fields(scene = %scene.name))]
    pub fn start(&mut self, scene: &'p Scene) {
        self.reset();
        self.scene = Some(scene);
        self.beats = script::beats(&scene.script);

        if self.beats.is_empty() {
            self.state = PlaybackState::SceneComplete;
        } else if scene.backdrop.is_some() {
            self.state = PlaybackState::EstablishingShot;
        } else {
            self.enter_playing();
        }
        tracing::debug!(beats = self.beats.len(), state = ?self.state, "scene started");
    }

    /// Leave the establishing shot and play beat 0.
    pub fn dismiss_establishing_shot(&mut self) -> DramaResult<()> {
        if self.state != PlaybackState::EstablishingShot {
            return Err(DramaError::script(format!(
                "dismiss_establishing_shot called in state {:?}",
                self.state
            )));
        }
        self.enter_playing();
        Ok(())
    }

    /// Move to the next beat, or complete or transfer the scene.
    #[tracing::instrument(skip(self))]
    pub fn advance(&mut self) -> DramaResult<Advance<'p>> {
        let PlaybackState::Playing(i) = self.state else {
            return Err(DramaError::script(format!(
                "advance called in state {:?}",
                self.state
            )));
        };

        let Some(next) = self.beats.get(i + 1).cloned() else {
            self.state = PlaybackState::SceneComplete;
            tracing::debug!("scene complete");
            return Ok(Advance::Complete);
        };

        if let Some(target) = script::goto_target(&next) {
            let directory = self.directory;
            return Ok(match directory.find_by_name(target) {
                Some(scene) => {
                    self.voice.release();
                    self.state = PlaybackState::Transferred;
                    tracing::debug!(to = %scene.name, "scene transfer");
                    Advance::Transfer { scene }
                }
                None => {
                    tracing::warn!(scene = %target, "GOTO target scene not found; staying on beat");
                    Advance::Stalled
                }
            });
        }

        let prev = &self.beats[i];
        if !script::is_control(prev) {
            let (speaker, text) = script::split_speaker(prev);
            self.history.push(HistoryEntry {
                speaker: speaker.to_string(),
                text: text.to_string(),
            });
        }

        self.state = PlaybackState::Playing(i + 1);
        self.play_beat(i + 1);
        Ok(Advance::Beat { index: i + 1 })
    }

    /// Stop playback, release audio and return to [`PlaybackState::Idle`].
    pub fn reset(&mut self) {
        self.voice.release();
        self.scene = None;
        self.beats.clear();
        self.history.clear();
        self.state = PlaybackState::Idle;
    }

    fn enter_playing(&mut self) {
        if self.beats.is_empty() {
            self.state = PlaybackState::SceneComplete;
            return;
        }
        self.state = PlaybackState::Playing(0);
        self.play_beat(0);
    }

    fn play_beat(&mut self, index: usize) {
        let (Some(scene), Some(beat)) = (self.scene, self.beats.get(index)) else {
            return;
        };
        let cue = cue_for(scene, beat, self.opts.speech_enabled);
        tracing::debug!(index, cue = ?cue, "voicing beat");
        self.voice.play(cue);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/interpreter.rs"]
mod tests;
