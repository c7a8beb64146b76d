use super::*;
use crate::effects::style::AnimationName;
use crate::foundation::core::Point;
use crate::project::model::{Actor, ActorGraphic, Backdrop, Item, Sfx, SfxCategory, SfxType};
use crate::stage::model::{BalloonKind, ElementPatch, StageElement};

fn project() -> Project {
    let mut hero = Actor::new("hero", "Hero");
    hero.image = Some("hero_flat.png".to_string());
    hero.graphics.push(ActorGraphic {
        id: "g1".to_string(),
        pose: "Standing".to_string(),
        expression: "Happy".to_string(),
        angle: Default::default(),
        image: "hero_happy.png".to_string(),
    });

    let mut scene = Scene::new("s1", "Pier", "Hero: hi");
    scene.backdrop = Some("d1".to_string());
    scene
        .stage
        .add(
            StageElement::actor("e-hero", "hero", "Standing", "Happy")
                .at(25.0, 50.0)
                .with_effects(["fx-shake", "missing"]),
        )
        .unwrap();
    scene
        .stage
        .add(StageElement::item("e-lamp", "lamp").at(75.0, 80.0))
        .unwrap();
    scene
        .stage
        .add(StageElement::balloon("e-bal", "Hey!", BalloonKind::Speech))
        .unwrap();
    scene
        .stage
        .add(StageElement::item("e-ghost", "no-such-item"))
        .unwrap();

    Project {
        actors: vec![hero],
        scenes: vec![scene],
        drops: vec![Backdrop {
            id: "d1".to_string(),
            name: "Pier".to_string(),
            prompt: String::new(),
            image: Some("pier.png".to_string()),
        }],
        items: vec![Item {
            id: "lamp".to_string(),
            name: "Lamp".to_string(),
            description: None,
            category: Default::default(),
            acquisition: Default::default(),
            unlock_condition: None,
            effects: Vec::new(),
            visual_asset: Some("lamp.png".to_string()),
        }],
        sfx: vec![
            Sfx::new("fx-shake", SfxCategory::Attach, SfxType::Shake, 40.0).with_speed(100.0),
        ],
        ..Project::default()
    }
}

fn canvas() -> Canvas {
    Canvas::new(800, 600).unwrap()
}

#[test]
fn resolves_visuals_by_kind() {
    let project = project();
    let stage = present(&project, &project.scenes[0], canvas());

    assert_eq!(stage.scene_id, "s1");
    assert_eq!(stage.backdrop.as_deref(), Some("pier.png"));
    assert_eq!(
        stage.element("e-hero").unwrap().visual.as_deref(),
        Some("hero_happy.png")
    );
    assert_eq!(
        stage.element("e-lamp").unwrap().visual.as_deref(),
        Some("lamp.png")
    );
    assert!(stage.element("e-bal").unwrap().visual.is_none());
    assert!(stage.element("e-ghost").unwrap().visual.is_none());
}

#[test]
fn elements_follow_render_order() {
    let mut project = project();
    project.scenes[0].stage.update(
        "e-hero",
        ElementPatch {
            z_index: Some(99),
            ..ElementPatch::default()
        },
    );
    let stage = present(&project, &project.scenes[0], canvas());
    let ids: Vec<&str> = stage.elements.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["e-lamp", "e-bal", "e-ghost", "e-hero"]);
    assert!(stage.elements.windows(2).all(|w| w[0].z <= w[1].z));
}

#[test]
fn transform_maps_percent_position_to_pixels() {
    let project = project();
    let stage = present(&project, &project.scenes[0], canvas());
    let lamp = stage.element("e-lamp").unwrap();
    let origin = lamp.transform * Point::ORIGIN;
    assert!((origin.x - 600.0).abs() < 1e-9);
    assert!((origin.y - 480.0).abs() < 1e-9);
}

#[test]
fn style_uses_known_effects_only() {
    let project = project();
    let stage = present(&project, &project.scenes[0], canvas());

    let hero = stage.element("e-hero").unwrap();
    let anim = hero.style.animation.unwrap();
    assert_eq!(anim.name, AnimationName::Shake);
    assert!((anim.duration_secs - 0.1).abs() < 1e-9);
    assert!(stage.element("e-lamp").unwrap().style.is_empty());
}

#[test]
fn dangling_drop_has_no_backdrop() {
    let mut project = project();
    project.scenes[0].backdrop = Some("gone".to_string());
    let stage = present(&project, &project.scenes[0], canvas());
    assert!(stage.backdrop.is_none());
    assert_eq!(stage.elements.len(), 4);
}

#[test]
fn presented_stage_serializes() {
    let project = project();
    let stage = present(&project, &project.scenes[0], canvas());
    let v = serde_json::to_value(&stage).unwrap();
    assert_eq!(v["elements"][0]["id"], "e-hero");
    assert_eq!(v["elements"][0]["kind"]["type"], "ACTOR");
    assert_eq!(v["canvas"]["width"], 800);
}
