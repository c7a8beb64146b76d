use super::*;

fn stage_with(ids: &[&str]) -> Stage {
    let mut stage = Stage::new();
    for id in ids {
        stage.add(StageElement::item(*id, "lamp")).unwrap();
    }
    stage
}

#[test]
fn add_refuses_when_top_z_is_saturated() {
    let mut stage = stage_with(&["a"]);
    stage.update(
        "a",
        ElementPatch {
            z_index: Some(i32::MAX),
            ..ElementPatch::default()
        },
    );
    let err = stage.add(StageElement::item("b", "lamp")).unwrap_err();
    assert!(matches!(err, DramaError::Validation(_)));
    assert_eq!(stage.len(), 1);
    assert!(stage.get("b").is_none());

    stage.update(
        "a",
        ElementPatch {
            z_index: Some(i32::MAX - 1),
            ..ElementPatch::default()
        },
    );
    assert_eq!(stage.add(StageElement::item("b", "lamp")).unwrap(), i32::MAX);
}

#[test]
fn add_assigns_z_above_current_max() {
    let mut stage = Stage::new();
    assert_eq!(stage.add(StageElement::item("a", "lamp")).unwrap(), 1);
    assert_eq!(stage.add(StageElement::item("b", "lamp")).unwrap(), 2);

    stage.update(
        "a",
        ElementPatch {
            z_index: Some(40),
            ..ElementPatch::default()
        },
    );
    let mut late = StageElement::item("c", "lamp");
    late.z_index = -3;
    let z = stage.add(late).unwrap();
    assert_eq!(z, 41);
    assert!(stage.elements().iter().all(|e| e.id == "c" || e.z_index < z));
}

#[test]
fn add_rejects_duplicate_id() {
    let mut stage = stage_with(&["a"]);
    let err = stage.add(StageElement::item("a", "other")).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert_eq!(stage.len(), 1);
    assert_eq!(stage.get("a").unwrap().asset_ref, "lamp");
}

#[test]
fn update_merges_and_never_changes_id() {
    let mut stage = Stage::new();
    stage
        .add(StageElement::actor("hero", "actor-1", "Wave", "Happy"))
        .unwrap();

    assert!(stage.update(
        "hero",
        ElementPatch {
            rotation: Some(-725.0),
            expression: Some("Sad".to_string()),
            text: Some("ignored for actors".to_string()),
            scale: Some(0.0),
            ..ElementPatch::default()
        },
    ));

    let el = stage.get("hero").unwrap();
    assert_eq!(el.id, "hero");
    assert_eq!(el.rotation, -725.0);
    assert_eq!(el.scale, 1.0);
    assert_eq!(
        el.kind,
        ElementKind::Actor {
            pose: "Wave".to_string(),
            expression: "Sad".to_string(),
            sprite_angle: SpriteAngle::Front,
        }
    );

    assert!(!stage.update("ghost", ElementPatch::default()));
}

#[test]
fn remove_unknown_is_noop() {
    let mut stage = stage_with(&["a", "b"]);
    assert!(stage.remove("zzz").is_none());
    assert_eq!(stage.len(), 2);
    assert_eq!(stage.remove("a").unwrap().id, "a");
    assert_eq!(stage.len(), 1);
}

#[test]
fn drag_is_unclamped_until_commit() {
    let mut stage = stage_with(&["a"]);
    stage.drag_to("a", -12.0, 130.0);
    let el = stage.get("a").unwrap();
    assert_eq!((el.x, el.y), (-12.0, 130.0));

    stage.commit_drag("a", -12.0, 130.0);
    let el = stage.get("a").unwrap();
    assert_eq!((el.x, el.y), (0.0, 100.0));
}

#[test]
fn render_order_sorts_by_z_with_stable_ties() {
    let mut stage = stage_with(&["a", "b", "c"]);
    for id in ["a", "b", "c"] {
        stage.update(
            id,
            ElementPatch {
                z_index: Some(5),
                ..ElementPatch::default()
            },
        );
    }
    stage.update(
        "b",
        ElementPatch {
            z_index: Some(1),
            ..ElementPatch::default()
        },
    );
    let ids: Vec<&str> = stage.render_order().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["b", "a", "c"]);
}

#[test]
fn toggle_effect_adds_then_removes() {
    let mut stage = stage_with(&["a"]);
    assert_eq!(stage.toggle_effect("a", "glow"), Some(true));
    assert_eq!(stage.toggle_effect("a", "shake"), Some(true));
    assert_eq!(stage.get("a").unwrap().active_effects, ["glow", "shake"]);
    assert_eq!(stage.toggle_effect("a", "glow"), Some(false));
    assert_eq!(stage.get("a").unwrap().active_effects, ["shake"]);
    assert_eq!(stage.toggle_effect("nope", "glow"), None);
}

#[test]
fn from_elements_rejects_duplicate_ids() {
    let els = vec![StageElement::item("a", "x"), StageElement::item("a", "y")];
    assert!(Stage::from_elements(els).is_err());
}

#[test]
fn transform_places_origin_at_percent_position() {
    let canvas = Canvas::new(200, 100).unwrap();
    let mut el = StageElement::item("a", "x").at(25.0, 50.0);
    el.scale = 2.0;
    el.rotation = 90.0;
    let t = el.transform(canvas);

    let origin = t * kurbo::Point::ORIGIN;
    assert!((origin.x - 50.0).abs() < 1e-9);
    assert!((origin.y - 50.0).abs() < 1e-9);

    let unit_x = t * kurbo::Point::new(1.0, 0.0);
    assert!((unit_x.x - 50.0).abs() < 1e-9);
    assert!((unit_x.y - 52.0).abs() < 1e-9);
}

#[test]
fn serde_uses_flat_type_tag() {
    let el = StageElement::balloon("b1", "Psst", BalloonKind::Thought).at(10.0, 20.0);
    let json = serde_json::to_value(&el).unwrap();
    assert_eq!(json["type"], "BALLOON");
    assert_eq!(json["balloonType"], "THOUGHT");
    assert_eq!(json["assetId"], "balloon_b1");
    assert_eq!(json["zIndex"], 0);

    let back: StageElement = serde_json::from_value(json).unwrap();
    assert_eq!(back, el);

    let actor: StageElement = serde_json::from_value(serde_json::json!({
        "id": "e1",
        "assetId": "a1",
        "type": "ACTOR",
        "x": 50, "y": 50, "scale": 1, "zIndex": 3, "rotation": 0,
        "pose": "Run", "expression": "Angry", "spriteAngle": 90,
        "activeSfx": ["s1"]
    }))
    .unwrap();
    assert_eq!(actor.z_index, 3);
    assert_eq!(actor.active_effects, ["s1"]);
    assert!(matches!(
        actor.kind,
        ElementKind::Actor {
            sprite_angle: SpriteAngle::Right,
            ..
        }
    ));
}
