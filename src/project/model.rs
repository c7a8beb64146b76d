use std::collections::{BTreeMap, HashSet};

use crate::{
    foundation::core::SpriteAngle,
    foundation::error::{DramaError, DramaResult},
    stage::model::Stage,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete drama: metadata plus every authored library.
///
/// This is a pure data model; the runtime reads it and never mutates it during playback.
pub struct Project {
    /// Title, author and playback preferences.
    pub info: GameInfo,
    /// Actor library.
    #[serde(default)]
    pub actors: Vec<Actor>,
    /// Scenes in authoring order.
    #[serde(default)]
    pub scenes: Vec<Scene>,
    /// Backdrop library.
    #[serde(default)]
    pub drops: Vec<Backdrop>,
    /// Item library.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Effect library.
    #[serde(default)]
    pub sfx: Vec<Sfx>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Project metadata and playback preferences.
pub struct GameInfo {
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Display author.
    #[serde(default)]
    pub author: String,
    /// Initial world variables (string, number or bool values).
    #[serde(default)]
    pub world_state: BTreeMap<String, serde_json::Value>,
    /// Free-form art direction used by image generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_guide: Option<String>,
    /// Author-defined poses in addition to the built-in set.
    #[serde(default)]
    pub custom_poses: Vec<String>,
    /// Author-defined expressions in addition to the built-in set.
    #[serde(default)]
    pub custom_expressions: Vec<String>,
    /// Whether the reader advances beats or playback runs unattended.
    #[serde(default)]
    pub game_mode: GameMode,
    /// Persist a snapshot whenever a scene completes.
    #[serde(default = "default_true")]
    pub enable_autosave: bool,
    /// Scene to start from instead of the first one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_scene_id: Option<String>,
}

impl Default for GameInfo {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            world_state: BTreeMap::new(),
            style_guide: None,
            custom_poses: Vec::new(),
            custom_expressions: Vec::new(),
            game_mode: GameMode::Interactive,
            enable_autosave: true,
            title_scene_id: None,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// How beats are advanced during playback.
pub enum GameMode {
    /// The reader triggers every advance.
    #[default]
    Interactive,
    /// Beats advance without reader input.
    AutoPlay,
}

/// Built-in pose vocabulary.
pub const POSES: [&str; 8] = [
    "Close-up",
    "Full Body",
    "Jump",
    "Run",
    "Wave",
    "Pointing",
    "Crouch",
    "Dead",
];

/// Built-in expression vocabulary.
pub const EXPRESSIONS: [&str; 8] = [
    "Neutral",
    "Happy",
    "Angry",
    "Confused",
    "Flirting",
    "Sad",
    "Surprised",
    "Disgusted",
];

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A character with its sprite library.
pub struct Actor {
    /// Stable id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Flat fallback image.
    #[serde(default)]
    pub image: Option<String>,
    /// Close-up reference portrait.
    #[serde(default)]
    pub reference_image_close_up: Option<String>,
    /// Full-body reference image.
    #[serde(default)]
    pub reference_image_full_body: Option<String>,
    /// Sprite library in authoring order; duplicates allowed.
    #[serde(default)]
    pub graphics: Vec<ActorGraphic>,
    /// External speech-synthesis voice id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
}

impl Actor {
    /// Actor with no imagery.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: None,
            reference_image_close_up: None,
            reference_image_full_body: None,
            graphics: Vec::new(),
            voice_id: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One sprite of an actor.
pub struct ActorGraphic {
    /// Stable id.
    pub id: String,
    /// Pose label.
    pub pose: String,
    /// Expression label.
    pub expression: String,
    /// Viewing angle.
    #[serde(default)]
    pub angle: SpriteAngle,
    /// Image reference (data URL or path).
    pub image: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
/// Scene flavour; carried through persistence, not interpreted by playback.
pub enum SceneKind {
    /// The reader drives the scene.
    #[default]
    Agency,
    /// The reader watches and reacts.
    Witness,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// World-state gates for entering a scene.
pub struct SceneRequirements {
    /// Required key/value pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_world_state: Vec<WorldRequirement>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A single world-state requirement.
pub struct WorldRequirement {
    /// World-state key.
    pub key: String,
    /// Expected value (string, number or bool).
    pub value: serde_json::Value,
}

/// Reference to a recorded audio clip (data URL or path).
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AudioRef(pub String);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A scene: script, stage and optional backdrop.
pub struct Scene {
    /// Stable id.
    pub id: String,
    /// Display name; GOTO targets match it exactly.
    pub name: String,
    /// Scene flavour.
    #[serde(rename = "type", default)]
    pub kind: SceneKind,
    /// DramScript source.
    #[serde(default)]
    pub script: String,
    /// Entry gates.
    #[serde(default)]
    pub requirements: SceneRequirements,
    /// Stage elements.
    #[serde(default)]
    pub stage: Stage,
    /// Recorded audio keyed by exact beat text.
    #[serde(
        rename = "audioData",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub audio_by_line: BTreeMap<String, AudioRef>,
    /// Backdrop shown as an establishing shot.
    #[serde(rename = "dropId", default, skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<String>,
}

impl Scene {
    /// Empty scene with the given script.
    pub fn new(id: impl Into<String>, name: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: SceneKind::Agency,
            script: script.into(),
            requirements: SceneRequirements::default(),
            stage: Stage::new(),
            audio_by_line: BTreeMap::new(),
            backdrop: None,
        }
    }

    /// Recorded audio for an exact beat string.
    pub fn audio_for(&self, line: &str) -> Option<&AudioRef> {
        self.audio_by_line.get(line)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A full-scene backdrop (a "drop").
pub struct Backdrop {
    /// Stable id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Generation prompt.
    #[serde(default)]
    pub prompt: String,
    /// Rendered backdrop.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Item classification.
pub enum ItemCategory {
    /// Wearable.
    Costume,
    /// Physical object.
    #[default]
    Prop,
    /// Learned fact.
    Knowledge,
    /// Equipment.
    Gear,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// How an item is obtained.
pub enum Acquisition {
    /// Found in a scene.
    #[default]
    Pickup,
    /// Granted by progress.
    Earned,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A prop or inventory item.
pub struct Item {
    /// Stable id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Flavour text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Classification.
    #[serde(default)]
    pub category: ItemCategory,
    /// How it is obtained.
    #[serde(default)]
    pub acquisition: Acquisition,
    /// Gate on a world variable; `None` means always available.
    #[serde(default)]
    pub unlock_condition: Option<UnlockCondition>,
    /// World variables set when the item is obtained.
    #[serde(default)]
    pub effects: Vec<ItemEffect>,
    /// Stage image.
    #[serde(default)]
    pub visual_asset: Option<String>,
}

impl Item {
    /// Item with no imagery, gate or effects.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            category: ItemCategory::default(),
            acquisition: Acquisition::default(),
            unlock_condition: None,
            effects: Vec::new(),
            visual_asset: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Comparison used by an [`UnlockCondition`].
pub enum Comparison {
    /// `>`
    #[serde(rename = ">")]
    Greater,
    /// `<`
    #[serde(rename = "<")]
    Less,
    /// `>=`
    #[serde(rename = ">=")]
    GreaterOrEqual,
    /// `<=`
    #[serde(rename = "<=")]
    LessOrEqual,
    /// `==`
    #[serde(rename = "==")]
    Equal,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// `variable <operator> threshold` over the world state.
pub struct UnlockCondition {
    /// World-state key.
    pub variable: String,
    /// Comparison.
    pub operator: Comparison,
    /// Right-hand side (string, number or bool).
    pub threshold: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// World-state assignment applied by an item.
pub struct ItemEffect {
    /// World-state key.
    pub variable: String,
    /// New value (string, number or bool).
    pub value: serde_json::Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
/// Effect category.
pub enum SfxCategory {
    /// Continuous, looping.
    Attach,
    /// One-shot in intent; rendered as continuous.
    Do,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Effect type.
pub enum SfxType {
    /// Drop-shadow halo.
    Glow,
    /// Breathing scale with a faint halo.
    Pulse,
    /// Wobble.
    Jiggle,
    /// Rapid shake.
    Shake,
    /// Reduced opacity.
    Fade,
    /// Flicker with a color tint. `flash` is an older name for it.
    #[serde(alias = "flash")]
    Electric,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Effect parameters.
pub struct SfxParams {
    /// Strength, `0..=100`.
    pub intensity: f64,
    /// Animation speed, `0..=100`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Hex color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A reusable visual effect.
pub struct Sfx {
    /// Stable id.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Category.
    pub category: SfxCategory,
    /// Type.
    #[serde(rename = "type")]
    pub kind: SfxType,
    /// Generation prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Parameters.
    pub params: SfxParams,
}

impl Sfx {
    /// Effect with only an intensity set.
    pub fn new(id: impl Into<String>, category: SfxCategory, kind: SfxType, intensity: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            category,
            kind,
            prompt: None,
            params: SfxParams {
                intensity,
                speed: None,
                color: None,
                duration: None,
            },
        }
    }

    /// Set the speed parameter.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.params.speed = Some(speed);
        self
    }

    /// Set the color parameter.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.params.color = Some(color.into());
        self
    }
}

impl Project {
    /// Scene by id.
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    /// First scene whose name equals `name` exactly.
    pub fn scene_by_name(&self, name: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.name == name)
    }

    /// Actor by id.
    pub fn actor(&self, id: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    /// Item by id.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Backdrop by id.
    pub fn backdrop(&self, id: &str) -> Option<&Backdrop> {
        self.drops.iter().find(|d| d.id == id)
    }

    /// Effect by id.
    pub fn sfx_by_id(&self, id: &str) -> Option<&Sfx> {
        self.sfx.iter().find(|s| s.id == id)
    }

    /// Scene playback starts from: the title scene if it exists, else the first scene.
    pub fn entry_scene(&self) -> Option<&Scene> {
        self.info
            .title_scene_id
            .as_deref()
            .and_then(|id| self.scene(id))
            .or_else(|| self.scenes.first())
    }

    /// Validate id uniqueness and per-record invariants.
    ///
    /// Dangling actor/item references from stage elements are tolerated; they resolve to
    /// no visual at playback.
    pub fn validate(&self) -> DramaResult<()> {
        check_unique_ids("actor", self.actors.iter().map(|a| a.id.as_str()))?;
        check_unique_ids("scene", self.scenes.iter().map(|s| s.id.as_str()))?;
        check_unique_ids("drop", self.drops.iter().map(|d| d.id.as_str()))?;
        check_unique_ids("item", self.items.iter().map(|i| i.id.as_str()))?;
        check_unique_ids("sfx", self.sfx.iter().map(|s| s.id.as_str()))?;

        let mut names = HashSet::new();
        for scene in &self.scenes {
            if scene.name.trim().is_empty() {
                return Err(DramaError::validation(format!(
                    "scene '{}' name must be non-empty",
                    scene.id
                )));
            }
            if !names.insert(scene.name.as_str()) {
                return Err(DramaError::validation(format!(
                    "scene name '{}' is not unique; GOTO targets would be ambiguous",
                    scene.name
                )));
            }
            scene.stage.validate()?;
        }

        for actor in &self.actors {
            check_unique_ids(
                &format!("actor '{}' graphic", actor.id),
                actor.graphics.iter().map(|g| g.id.as_str()),
            )?;
        }

        for sfx in &self.sfx {
            check_percent(&sfx.id, "intensity", Some(sfx.params.intensity))?;
            check_percent(&sfx.id, "speed", sfx.params.speed)?;
            if let Some(d) = sfx.params.duration
                && (!d.is_finite() || d < 0.0)
            {
                return Err(DramaError::validation(format!(
                    "sfx '{}' duration must be finite and >= 0",
                    sfx.id
                )));
            }
        }

        if let Some(id) = &self.info.title_scene_id
            && self.scene(id).is_none()
        {
            return Err(DramaError::validation(format!(
                "title scene '{id}' does not exist"
            )));
        }

        Ok(())
    }
}

fn check_unique_ids<'a>(what: &str, ids: impl Iterator<Item = &'a str>) -> DramaResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(DramaError::validation(format!("{what} id must be non-empty")));
        }
        if !seen.insert(id) {
            return Err(DramaError::validation(format!("duplicate {what} id '{id}'")));
        }
    }
    Ok(())
}

fn check_percent(sfx_id: &str, field: &str, v: Option<f64>) -> DramaResult<()> {
    match v {
        Some(v) if !(v.is_finite() && (0.0..=100.0).contains(&v)) => Err(DramaError::validation(
            format!("sfx '{sfx_id}' {field} must be within 0..=100"),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/model.rs"]
mod tests;
