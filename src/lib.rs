//! Dramaton is the playback and staging core of a visual-novel authoring tool.
//!
//! A [`Project`] holds actors, items, backdrops, an effect library and scenes. Each scene
//! carries a DramScript (one beat per line, `Speaker: text`, `>> GOTO: Scene` to transfer)
//! and a [`Stage`] of positioned elements.
//!
//! # Overview
//!
//! 1. **Author**: mutate a scene's [`Stage`] (z-order, drags, effects) and its script.
//! 2. **Resolve**: pick sprite imagery per actor pose/expression/angle ([`resolve_actor`])
//!    and fold effects into a [`StyleDescriptor`] ([`element_style`]).
//! 3. **Present**: snapshot a scene's stage in paint order ([`present`]).
//! 4. **Play**: step a scene beat by beat with an [`Interpreter`], or chain scenes,
//!    menus and credits with a [`Session`].
//!
//! Image assets can be background-keyed with [`extract_transparency`] before they are
//! stored.
//!
//! Audio and speech are host collaborators ([`SpeechSynth`], [`AudioLibrary`]); the crate
//! performs no playback itself.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod effects;
mod foundation;
mod project;
mod runtime;
mod stage;

pub use assets::chroma::{
    ChromaKeyOpts, DEFAULT_TOLERANCE, GREEN_MARGIN, corner_colors, encode_png,
    extract_green_screen, extract_transparency, extract_transparency_with, key_corners_in_place,
    key_green_in_place,
};
pub use assets::resolve::{
    DEFAULT_EXPRESSION, DEFAULT_POSE, actor_fallback, placement_defaults, resolve_actor,
    resolve_element, resolve_item,
};
pub use effects::style::{
    Animation, AnimationName, DEFAULT_ELECTRIC_SPEED, DEFAULT_ELECTRIC_TINT, StyleDescriptor,
    StyleFilter, compute_style, element_style,
};
pub use foundation::core::{
    Affine, Canvas, Point, STAGE_MAX, STAGE_MIN, SpriteAngle, Vec2, clamp_percent,
};
pub use foundation::error::{DramaError, DramaResult};
pub use project::model::{
    Acquisition, Actor, ActorGraphic, AudioRef, Backdrop, Comparison, EXPRESSIONS, GameInfo,
    GameMode, Item, ItemCategory, ItemEffect, POSES, Project, Scene, SceneKind,
    SceneRequirements, Sfx, SfxCategory, SfxParams, SfxType, UnlockCondition, WorldRequirement,
};
pub use runtime::audio::{
    AudioHandle, AudioLibrary, Cue, NullAudio, NullSpeech, SpeechSynth, VoiceChannel, cue_for,
};
pub use runtime::config::RuntimeOpts;
pub use runtime::interpreter::{
    Advance, HistoryEntry, Interpreter, PlaybackState, SceneDirectory,
};
pub use runtime::recording::{AudioEvent, AudioLog};
pub use runtime::script::{
    CONTROL_PREFIX, GOTO_PREFIX, Line, NARRATOR, beats, goto_target, is_control, parse_line,
    split_speaker,
};
pub use runtime::session::{
    DiscardSnapshots, JsonFileSnapshots, MenuAction, Session, SessionPhase, SessionSnapshot,
    SnapshotLine, SnapshotStore,
};
pub use stage::model::{BalloonKind, ElementKind, ElementPatch, Stage, StageElement};
pub use stage::present::{PresentedElement, PresentedStage, present};
