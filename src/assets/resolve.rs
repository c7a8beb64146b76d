use crate::{
    foundation::core::SpriteAngle,
    project::model::{Actor, ActorGraphic, Item, Project},
    stage::model::{ElementKind, StageElement},
};

/// Pose used when none is known for an actor.
pub const DEFAULT_POSE: &str = "Neutral";
/// Expression used when none is known for an actor.
pub const DEFAULT_EXPRESSION: &str = "Neutral";

/// Pick the image for an actor in a given pose, expression and angle.
///
/// Priority: exact match, then pose+expression ignoring angle, then the actor-level
/// fallback (full-body reference, flat image, close-up reference). Within each step the
/// first graphic in library order wins. `None` means "render a placeholder".
pub fn resolve_actor<'a>(
    actor: &'a Actor,
    pose: &str,
    expression: &str,
    angle: SpriteAngle,
) -> Option<&'a str> {
    let same_look = |g: &&ActorGraphic| {
        g.pose == pose && g.expression == expression
    };

    if let Some(g) = actor
        .graphics
        .iter()
        .filter(same_look)
        .find(|g| g.angle == angle)
    {
        return Some(g.image.as_str());
    }
    if let Some(g) = actor.graphics.iter().find(same_look) {
        return Some(g.image.as_str());
    }
    actor_fallback(actor)
}

/// Actor-level fallback ladder. Full-body comes first since it covers arbitrary poses best.
pub fn actor_fallback(actor: &Actor) -> Option<&str> {
    actor
        .reference_image_full_body
        .as_deref()
        .or(actor.image.as_deref())
        .or(actor.reference_image_close_up.as_deref())
}

/// Stage image of an item.
pub fn resolve_item(item: &Item) -> Option<&str> {
    item.visual_asset.as_deref()
}

/// Resolve the image for any stage element. Dangling references and balloons yield `None`.
pub fn resolve_element<'a>(project: &'a Project, element: &StageElement) -> Option<&'a str> {
    match &element.kind {
        ElementKind::Actor {
            pose,
            expression,
            sprite_angle,
        } => {
            let actor = project.actor(&element.asset_ref)?;
            resolve_actor(actor, pose, expression, *sprite_angle)
        }
        ElementKind::Item => project.item(&element.asset_ref).and_then(resolve_item),
        ElementKind::Balloon { .. } => None,
    }
}

/// Pose and expression a newly placed actor starts in: those of its first graphic, or
/// [`DEFAULT_POSE`]/[`DEFAULT_EXPRESSION`].
pub fn placement_defaults(actor: Option<&Actor>) -> (String, String) {
    match actor.and_then(|a| a.graphics.first()) {
        Some(g) => (g.pose.clone(), g.expression.clone()),
        None => (DEFAULT_POSE.to_string(), DEFAULT_EXPRESSION.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
