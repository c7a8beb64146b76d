use crate::foundation::core::{Affine, Canvas, SpriteAngle, clamp_percent};
use crate::foundation::error::{DramaError, DramaResult};

/// A positioned, transformable visual unit on a scene's stage.
///
/// Serialized flat, with a `type` discriminator selecting the [`ElementKind`] variant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageElement {
    /// Unique id within the owning scene.
    pub id: String,
    /// Actor or item id this element displays. Balloons carry a synthetic key.
    #[serde(rename = "assetId")]
    pub asset_ref: String,
    /// Horizontal position in percent of stage width.
    pub x: f64,
    /// Vertical position in percent of stage height.
    pub y: f64,
    /// Uniform scale factor, `> 0`.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Rotation in degrees; any value is accepted.
    #[serde(default)]
    pub rotation: f64,
    /// Paint order; ties keep insertion order.
    #[serde(default)]
    pub z_index: i32,
    /// Ids of effects applied to this element.
    #[serde(rename = "activeSfx", default, skip_serializing_if = "Vec::is_empty")]
    pub active_effects: Vec<String>,
    /// Variant-specific payload.
    #[serde(flatten)]
    pub kind: ElementKind,
}

fn default_scale() -> f64 {
    1.0
}

/// Variant payload of a [`StageElement`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum ElementKind {
    /// A character sprite.
    #[serde(rename = "ACTOR", rename_all = "camelCase")]
    Actor {
        /// Requested pose.
        #[serde(default)]
        pose: String,
        /// Requested facial expression.
        #[serde(default)]
        expression: String,
        /// Requested viewing angle.
        #[serde(default)]
        sprite_angle: SpriteAngle,
    },
    /// A prop or inventory item.
    #[serde(rename = "ITEM")]
    Item,
    /// A dialogue balloon.
    #[serde(rename = "BALLOON", rename_all = "camelCase")]
    Balloon {
        /// Balloon text.
        #[serde(default)]
        text: String,
        /// Speech or thought styling.
        #[serde(rename = "balloonType", default)]
        balloon_kind: BalloonKind,
    },
}

/// Balloon styling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BalloonKind {
    /// Spoken words.
    #[default]
    Speech,
    /// Inner monologue.
    Thought,
}

impl StageElement {
    /// Build an actor element at the stage center.
    pub fn actor(
        id: impl Into<String>,
        actor_id: impl Into<String>,
        pose: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        Self::centered(
            id,
            actor_id,
            ElementKind::Actor {
                pose: pose.into(),
                expression: expression.into(),
                sprite_angle: SpriteAngle::Front,
            },
        )
    }

    /// Build an item element at the stage center.
    pub fn item(id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self::centered(id, item_id, ElementKind::Item)
    }

    /// Build a balloon element at the stage center.
    pub fn balloon(id: impl Into<String>, text: impl Into<String>, kind: BalloonKind) -> Self {
        let id = id.into();
        let asset_ref = format!("balloon_{id}");
        Self::centered(
            id,
            asset_ref,
            ElementKind::Balloon {
                text: text.into(),
                balloon_kind: kind,
            },
        )
    }

    fn centered(id: impl Into<String>, asset_ref: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            asset_ref: asset_ref.into(),
            x: 50.0,
            y: 50.0,
            scale: 1.0,
            rotation: 0.0,
            z_index: 0,
            active_effects: Vec::new(),
            kind,
        }
    }

    /// Place the element at a stage position (percent).
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Attach effects by id.
    pub fn with_effects<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_effects = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this is an actor element.
    pub fn is_actor(&self) -> bool {
        matches!(self.kind, ElementKind::Actor { .. })
    }

    /// Check element-local invariants.
    pub fn validate(&self) -> DramaResult<()> {
        if self.id.trim().is_empty() {
            return Err(DramaError::validation("stage element id must be non-empty"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(DramaError::validation(format!(
                "stage element '{}' scale must be finite and > 0",
                self.id
            )));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.rotation.is_finite() {
            return Err(DramaError::validation(format!(
                "stage element '{}' geometry must be finite",
                self.id
            )));
        }
        Ok(())
    }

    /// Transform placing this element's local origin on a pixel canvas.
    ///
    /// Applied right to left: scale, rotate about the origin, then translate to the
    /// element's percent position.
    pub fn transform(&self, canvas: Canvas) -> Affine {
        let pos = canvas.percent_to_px(self.x, self.y);
        Affine::translate(pos.to_vec2())
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale(self.scale)
    }
}

/// Merge patch for [`Stage::update`]. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementPatch {
    /// New asset reference.
    pub asset_ref: Option<String>,
    /// New x (percent); not clamped, see [`Stage::commit_drag`].
    pub x: Option<f64>,
    /// New y (percent); not clamped, see [`Stage::commit_drag`].
    pub y: Option<f64>,
    /// New scale; non-positive or non-finite values are ignored.
    pub scale: Option<f64>,
    /// New rotation in degrees.
    pub rotation: Option<f64>,
    /// New z-index.
    pub z_index: Option<i32>,
    /// Replacement effect set.
    pub active_effects: Option<Vec<String>>,
    /// Actor pose. Ignored for non-actor elements.
    pub pose: Option<String>,
    /// Actor expression. Ignored for non-actor elements.
    pub expression: Option<String>,
    /// Actor sprite angle. Ignored for non-actor elements.
    pub sprite_angle: Option<SpriteAngle>,
    /// Balloon text. Ignored for non-balloon elements.
    pub text: Option<String>,
    /// Balloon kind. Ignored for non-balloon elements.
    pub balloon_kind: Option<BalloonKind>,
}

/// Ordered element list for one scene.
///
/// The vector order is insertion order. Paint order is derived from `z_index`, see
/// [`Stage::render_order`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Stage {
    elements: Vec<StageElement>,
}

impl Stage {
    /// Empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stage from elements in insertion order, checking id uniqueness.
    pub fn from_elements(elements: Vec<StageElement>) -> DramaResult<Self> {
        let stage = Self { elements };
        stage.validate()?;
        Ok(stage)
    }

    /// Elements in insertion order.
    pub fn elements(&self) -> &[StageElement] {
        &self.elements
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the stage has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Look up an element by id.
    pub fn get(&self, id: &str) -> Option<&StageElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Highest z-index on stage, if any.
    pub fn max_z(&self) -> Option<i32> {
        self.elements.iter().map(|e| e.z_index).max()
    }

    /// Append an element on top of everything else and return its assigned z-index.
    ///
    /// The element's own `z_index` is overwritten with `max + 1` (`1` on an empty stage).
    /// A duplicate id, or a top element already at `i32::MAX`, is rejected and leaves the
    /// stage unchanged.
    pub fn add(&mut self, mut element: StageElement) -> DramaResult<i32> {
        element.validate()?;
        if self.get(&element.id).is_some() {
            return Err(DramaError::validation(format!(
                "stage element id '{}' already exists",
                element.id
            )));
        }
        let z = match self.max_z() {
            None => 1,
            Some(m) => m.checked_add(1).ok_or_else(|| {
                DramaError::validation(format!(
                    "cannot place '{}' above z-index {m}; lower the top element first",
                    element.id
                ))
            })?,
        };
        element.z_index = z;
        self.elements.push(element);
        Ok(z)
    }

    /// Merge-patch an element. Returns `false` if `id` is unknown.
    ///
    /// The element id is never changed. Variant fields that do not apply to the element's
    /// kind are ignored.
    pub fn update(&mut self, id: &str, patch: ElementPatch) -> bool {
        let Some(el) = self.elements.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if let Some(v) = patch.asset_ref {
            el.asset_ref = v;
        }
        if let Some(v) = patch.x {
            el.x = v;
        }
        if let Some(v) = patch.y {
            el.y = v;
        }
        if let Some(v) = patch.scale
            && v.is_finite()
            && v > 0.0
        {
            el.scale = v;
        }
        if let Some(v) = patch.rotation
            && v.is_finite()
        {
            el.rotation = v;
        }
        if let Some(v) = patch.z_index {
            el.z_index = v;
        }
        if let Some(v) = patch.active_effects {
            el.active_effects = v;
        }
        match &mut el.kind {
            ElementKind::Actor {
                pose,
                expression,
                sprite_angle,
            } => {
                if let Some(v) = patch.pose {
                    *pose = v;
                }
                if let Some(v) = patch.expression {
                    *expression = v;
                }
                if let Some(v) = patch.sprite_angle {
                    *sprite_angle = v;
                }
            }
            ElementKind::Balloon { text, balloon_kind } => {
                if let Some(v) = patch.text {
                    *text = v;
                }
                if let Some(v) = patch.balloon_kind {
                    *balloon_kind = v;
                }
            }
            ElementKind::Item => {}
        }
        true
    }

    /// Move an element during a drag; coordinates may leave `[0, 100]` until commit.
    pub fn drag_to(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.update(
            id,
            ElementPatch {
                x: Some(x),
                y: Some(y),
                ..ElementPatch::default()
            },
        )
    }

    /// Commit a drag, clamping the position into `[0, 100]`.
    pub fn commit_drag(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.drag_to(id, clamp_percent(x), clamp_percent(y))
    }

    /// Remove an element. Unknown ids are a no-op and return `None`.
    pub fn remove(&mut self, id: &str) -> Option<StageElement> {
        let idx = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(idx))
    }

    /// Add the effect if absent, remove it if present. Returns whether it is now active.
    pub fn toggle_effect(&mut self, id: &str, sfx_id: &str) -> Option<bool> {
        let el = self.elements.iter_mut().find(|e| e.id == id)?;
        if let Some(pos) = el.active_effects.iter().position(|s| s == sfx_id) {
            el.active_effects.remove(pos);
            Some(false)
        } else {
            el.active_effects.push(sfx_id.to_string());
            Some(true)
        }
    }

    /// Elements in paint order: ascending `z_index`, ties in insertion order.
    pub fn render_order(&self) -> Vec<&StageElement> {
        let mut order: Vec<&StageElement> = self.elements.iter().collect();
        // `sort_by_key` is stable, so equal z keep insertion order.
        order.sort_by_key(|e| e.z_index);
        order
    }

    /// Check stage invariants: per-element validity and unique ids.
    pub fn validate(&self) -> DramaResult<()> {
        let mut seen = std::collections::HashSet::new();
        for el in &self.elements {
            el.validate()?;
            if !seen.insert(el.id.as_str()) {
                return Err(DramaError::validation(format!(
                    "duplicate stage element id '{}'",
                    el.id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/model.rs"]
mod tests;
