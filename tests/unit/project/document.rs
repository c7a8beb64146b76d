use super::*;

const DOC: &str = r##"{
  "info": {
    "title": "Night Shift",
    "author": "K",
    "worldState": { "gold": 5, "met_ana": false, "mood": "grim" },
    "customPoses": [],
    "customExpressions": [],
    "gameMode": "INTERACTIVE",
    "enableAutosave": false,
    "titleSceneId": "s1"
  },
  "actors": [{
    "id": "a1", "name": "Hero", "image": null,
    "referenceImageCloseUp": null, "referenceImageFullBody": "full.png",
    "graphics": [{ "id": "g1", "pose": "Wave", "expression": "Happy", "angle": 45, "image": "wave.png" }]
  }],
  "scenes": [{
    "id": "s1", "name": "Dock", "type": "WITNESS",
    "script": "Hero: Cold night.\n>> GOTO: Dock",
    "requirements": {},
    "stage": [
      { "id": "e1", "assetId": "a1", "type": "ACTOR", "x": 30, "y": 60, "scale": 1.2,
        "zIndex": 1, "rotation": 0, "pose": "Wave", "expression": "Happy", "spriteAngle": 45,
        "activeSfx": ["fx1"] },
      { "id": "e2", "assetId": "balloon_e2", "type": "BALLOON", "x": 40, "y": 20, "scale": 1,
        "zIndex": 101, "rotation": 0, "text": "brr", "balloonType": "SPEECH" }
    ],
    "audioData": { "Hero: Cold night.": "data:audio/mp3;base64,AAAA" },
    "dropId": "d1"
  }],
  "drops": [{ "id": "d1", "name": "Pier", "prompt": "fog", "image": "pier.png" }],
  "items": [{
    "id": "i1", "name": "Brass Key", "description": "Opens the shed.",
    "category": "prop", "acquisition": "pickup",
    "unlockCondition": { "variable": "gold", "operator": ">=", "threshold": 3 },
    "effects": [{ "variable": "has_key", "value": true }],
    "visualAsset": "key.png"
  }],
  "sfx": [{ "id": "fx1", "name": "Halo", "category": "ATTACH", "type": "glow",
            "params": { "intensity": 50, "color": "#00ffcc" } }]
}"##;

#[test]
fn parses_authoring_tool_document() {
    let p = Project::from_json_str(DOC).unwrap();
    p.validate().unwrap();
    assert!(!p.info.enable_autosave);
    let scene = p.scene("s1").unwrap();
    assert_eq!(scene.kind, crate::project::model::SceneKind::Witness);
    assert_eq!(scene.backdrop.as_deref(), Some("d1"));
    assert_eq!(scene.stage.len(), 2);
    assert_eq!(
        scene.audio_for("Hero: Cold night.").unwrap().0,
        "data:audio/mp3;base64,AAAA"
    );
    assert!(scene.audio_for("Hero:  Cold night.").is_none());
}

#[test]
fn json_roundtrip_is_lossless() {
    let p = Project::from_json_str(DOC).unwrap();
    let s = p.to_json_string().unwrap();
    let back = Project::from_json_str(&s).unwrap();
    assert_eq!(back, p);
}

#[test]
fn world_state_and_item_gates_survive_a_save() {
    let p = Project::from_json_str(DOC).unwrap();
    let out: serde_json::Value = serde_json::from_str(&p.to_json_string().unwrap()).unwrap();
    let src: serde_json::Value = serde_json::from_str(DOC).unwrap();

    assert_eq!(out["info"]["worldState"], src["info"]["worldState"]);
    assert_eq!(out["items"][0]["unlockCondition"], src["items"][0]["unlockCondition"]);
    assert_eq!(out["items"][0]["effects"], src["items"][0]["effects"]);

    let item = p.item("i1").unwrap();
    let gate = item.unlock_condition.as_ref().unwrap();
    assert_eq!(gate.operator, crate::project::model::Comparison::GreaterOrEqual);
    assert_eq!(item.effects[0].value, serde_json::Value::Bool(true));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Project::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, DramaError::Serde(_)));
}

#[test]
fn file_roundtrip_validates_on_load() {
    let dir = std::env::temp_dir().join(format!("dramaton_doc_{}", std::process::id()));
    let path = dir.join("game.json");
    let p = Project::from_json_str(DOC).unwrap();
    p.to_path(&path).unwrap();
    let back = Project::from_path(&path).unwrap();
    assert_eq!(back, p);
    std::fs::remove_dir_all(&dir).ok();
}
