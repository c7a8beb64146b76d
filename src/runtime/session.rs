use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::core::Canvas,
    foundation::error::{DramaError, DramaResult},
    project::model::{Project, Scene},
    runtime::audio::VoiceChannel,
    runtime::config::RuntimeOpts,
    runtime::interpreter::{Advance, HistoryEntry, Interpreter, PlaybackState},
    stage::present::{PresentedStage, present},
};

/// Choices offered once a scene has played out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    /// Close the menu and stay on the finished scene.
    Continue,
    /// Hand a snapshot to the [`SnapshotStore`]; the menu stays open.
    Save,
    /// Stop playback and roll credits.
    EndSession,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Where the session is, above the interpreter's per-scene state.
pub enum SessionPhase {
    /// Not begun.
    Idle,
    /// A scene is on screen; see [`Session::interpreter`] for the beat.
    Scene,
    /// The scene-complete menu is open.
    SceneMenu,
    /// The menu was closed with [`MenuAction::Continue`].
    SceneClosed,
    /// The session ended.
    Credits,
}

/// Progress saved from the scene-complete menu.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SessionSnapshot {
    /// Project title.
    pub title: String,
    /// Scene that just completed.
    pub scene_id: String,
    /// Scene transfers followed so far.
    pub transfers: usize,
    /// Dialogue read in that scene.
    pub history: Vec<SnapshotLine>,
}

/// One history line in a [`SessionSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SnapshotLine {
    /// Speaker.
    pub speaker: String,
    /// Text.
    pub text: String,
}

impl From<&HistoryEntry> for SnapshotLine {
    fn from(h: &HistoryEntry) -> Self {
        Self {
            speaker: h.speaker.clone(),
            text: h.text.clone(),
        }
    }
}

/// Persists snapshots. Storage is owned by the host.
pub trait SnapshotStore {
    /// Persist `snapshot`.
    fn save(&mut self, snapshot: &SessionSnapshot) -> DramaResult<()>;
}

/// Store that drops every snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardSnapshots;

impl SnapshotStore for DiscardSnapshots {
    fn save(&mut self, _snapshot: &SessionSnapshot) -> DramaResult<()> {
        Ok(())
    }
}

/// Store that overwrites one pretty-printed JSON file per save.
#[derive(Clone, Debug)]
pub struct JsonFileSnapshots {
    path: PathBuf,
}

impl JsonFileSnapshots {
    /// Store writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileSnapshots {
    fn save(&mut self, snapshot: &SessionSnapshot) -> DramaResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create snapshot dir '{}'", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| DramaError::serde(format!("snapshot encode failed: {e}")))?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("write snapshot '{}'", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}

/// Drives a project from its entry scene through transfers to the credits.
///
/// One [`Interpreter`] is reused for every scene, so the previous scene's audio is always
/// released before the next one starts.
pub struct Session<'p> {
    project: &'p Project,
    interpreter: Interpreter<'p>,
    store: Box<dyn SnapshotStore>,
    phase: SessionPhase,
    transfers: usize,
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase)
            .field("transfers", &self.transfers)
            .field("interpreter", &self.interpreter)
            .finish()
    }
}

impl<'p> Session<'p> {
    /// Idle session over `project`.
    pub fn new(
        project: &'p Project,
        voice: VoiceChannel,
        opts: RuntimeOpts,
        store: Box<dyn SnapshotStore>,
    ) -> Self {
        Self {
            project,
            interpreter: Interpreter::new(project, voice, opts),
            store,
            phase: SessionPhase::Idle,
            transfers: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Interpreter of the current scene.
    pub fn interpreter(&self) -> &Interpreter<'p> {
        &self.interpreter
    }

    /// Scene on screen, if any.
    pub fn scene(&self) -> Option<&'p Scene> {
        self.interpreter.scene()
    }

    /// Transfers followed since the last [`Session::begin`].
    pub fn transfers(&self) -> usize {
        self.transfers
    }

    /// Start at the title scene, or the first scene when no title scene is set.
    pub fn begin(&mut self) -> DramaResult<()> {
        let scene = self
            .project
            .entry_scene()
            .ok_or_else(|| DramaError::validation("project has no scenes"))?;
        self.transfers = 0;
        self.enter(scene);
        Ok(())
    }

    /// Start at a specific scene by id.
    pub fn begin_at(&mut self, scene_id: &str) -> DramaResult<()> {
        let scene = self
            .project
            .scene(scene_id)
            .ok_or_else(|| DramaError::validation(format!("unknown scene id '{scene_id}'")))?;
        self.transfers = 0;
        self.enter(scene);
        Ok(())
    }

    /// Return to the entry scene from any phase.
    pub fn restart(&mut self) -> DramaResult<()> {
        tracing::debug!(phase = ?self.phase, "restart");
        self.begin()
    }

    /// Dismiss the establishing shot of the current scene.
    pub fn dismiss(&mut self) -> DramaResult<()> {
        self.require(SessionPhase::Scene, "dismiss")?;
        self.interpreter.dismiss_establishing_shot()
    }

    /// Reader's "continue": advance the current scene and follow any transfer.
    ///
    /// Reaching the end of a scene opens the menu and, with autosave enabled, saves a
    /// snapshot. A failed autosave is logged and does not block the menu.
    #[tracing::instrument(skip(self))]
    pub fn continue_(&mut self) -> DramaResult<Advance<'p>> {
        self.require(SessionPhase::Scene, "continue")?;
        let step = self.interpreter.advance()?;
        match step {
            Advance::Transfer { scene } => {
                self.transfers += 1;
                self.enter(scene);
            }
            Advance::Complete => self.open_menu(),
            Advance::Beat { .. } | Advance::Stalled => {}
        }
        Ok(step)
    }

    /// Apply a scene-complete menu choice.
    pub fn choose(&mut self, action: MenuAction) -> DramaResult<()> {
        self.require(SessionPhase::SceneMenu, "choose")?;
        match action {
            MenuAction::Continue => self.phase = SessionPhase::SceneClosed,
            MenuAction::Save => self.save()?,
            MenuAction::EndSession => {
                self.interpreter.reset();
                self.phase = SessionPhase::Credits;
            }
        }
        tracing::debug!(?action, phase = ?self.phase, "menu choice");
        Ok(())
    }

    /// Snapshot of the current scene, if one is loaded.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        let scene = self.interpreter.scene()?;
        Some(SessionSnapshot {
            title: self.project.info.title.clone(),
            scene_id: scene.id.clone(),
            transfers: self.transfers,
            history: self.interpreter.history().iter().map(Into::into).collect(),
        })
    }

    /// Stage of the current scene resolved for `canvas`.
    pub fn frame(&self, canvas: Canvas) -> Option<PresentedStage> {
        let scene = self.interpreter.scene()?;
        Some(present(self.project, scene, canvas))
    }

    fn enter(&mut self, scene: &'p Scene) {
        self.interpreter.start(scene);
        self.phase = SessionPhase::Scene;
        if self.interpreter.state() == PlaybackState::SceneComplete {
            self.open_menu();
        }
    }

    fn open_menu(&mut self) {
        self.phase = SessionPhase::SceneMenu;
        if self.interpreter.opts().autosave
            && let Err(e) = self.save()
        {
            tracing::warn!(error = %e, "autosave failed");
        }
    }

    fn save(&mut self) -> DramaResult<()> {
        let snapshot = self
            .snapshot()
            .ok_or_else(|| DramaError::script("no scene to snapshot"))?;
        self.store.save(&snapshot)
    }

    fn require(&self, phase: SessionPhase, op: &str) -> DramaResult<()> {
        if self.phase != phase {
            return Err(DramaError::script(format!(
                "{op} called in session phase {:?}",
                self.phase
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/session.rs"]
mod tests;
