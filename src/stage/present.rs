use crate::{
    assets::resolve::resolve_element,
    effects::style::{StyleDescriptor, element_style},
    foundation::core::{Affine, Canvas},
    project::model::{Project, Scene},
    stage::model::ElementKind,
};

#[derive(Clone, Debug, serde::Serialize)]
/// Stage of one scene, resolved for display.
pub struct PresentedStage {
    /// Scene id.
    pub scene_id: String,
    /// Surface the transforms map onto.
    pub canvas: Canvas,
    /// Backdrop image, when the scene names a drop that has one.
    pub backdrop: Option<String>,
    /// Elements in painter's order (lowest z first).
    pub elements: Vec<PresentedElement>,
}

#[derive(Clone, Debug, serde::Serialize)]
/// One stage element with everything a renderer needs.
pub struct PresentedElement {
    /// Element id.
    pub id: String,
    /// Variant payload copied from the element.
    pub kind: ElementKind,
    /// Paint order.
    pub z: i32,
    /// Element-local to canvas pixels.
    pub transform: Affine,
    /// Resolved image; `None` for balloons and unresolvable references.
    pub visual: Option<String>,
    /// Combined effect style.
    pub style: StyleDescriptor,
}

impl PresentedStage {
    /// Element by id.
    pub fn element(&self, id: &str) -> Option<&PresentedElement> {
        self.elements.iter().find(|e| e.id == id)
    }
}

/// Resolve every element of `scene` against `project` for display on `canvas`.
#[tracing::instrument(skip(project, scene), fields(scene = %scene.name))]
pub fn present(project: &Project, scene: &Scene, canvas: Canvas) -> PresentedStage {
    let backdrop = scene
        .backdrop
        .as_deref()
        .and_then(|id| project.backdrop(id))
        .and_then(|d| d.image.clone());

    let elements: Vec<PresentedElement> = scene
        .stage
        .render_order()
        .into_iter()
        .map(|el| {
            let visual = resolve_element(project, el).map(str::to_string);
            if visual.is_none() && !matches!(el.kind, ElementKind::Balloon { .. }) {
                tracing::debug!(element = %el.id, asset = %el.asset_ref, "no visual resolved");
            }
            PresentedElement {
                id: el.id.clone(),
                kind: el.kind.clone(),
                z: el.z_index,
                transform: el.transform(canvas),
                visual,
                style: element_style(&project.sfx, &el.active_effects),
            }
        })
        .collect();

    tracing::debug!(elements = elements.len(), "stage presented");
    PresentedStage {
        scene_id: scene.id.clone(),
        canvas,
        backdrop,
        elements,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/present.rs"]
mod tests;
