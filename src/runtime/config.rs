use crate::project::model::GameInfo;

/// Runtime configuration, passed explicitly at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RuntimeOpts {
    /// Synthesize speech for beats without recorded audio.
    pub speech_enabled: bool,
    /// Persist a snapshot when a scene completes.
    pub autosave: bool,
}

impl Default for RuntimeOpts {
    fn default() -> Self {
        Self {
            speech_enabled: false,
            autosave: true,
        }
    }
}

impl RuntimeOpts {
    /// Options from a project's settings plus the host's speech preference.
    pub fn from_info(info: &GameInfo, speech_enabled: bool) -> Self {
        Self {
            speech_enabled,
            autosave: info.enable_autosave,
        }
    }
}
