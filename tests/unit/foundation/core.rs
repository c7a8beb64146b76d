use super::*;

#[test]
fn clamp_percent_bounds_and_nan() {
    assert_eq!(clamp_percent(-5.0), 0.0);
    assert_eq!(clamp_percent(42.5), 42.5);
    assert_eq!(clamp_percent(180.0), 100.0);
    assert_eq!(clamp_percent(f64::NAN), 0.0);
}

#[test]
fn canvas_rejects_zero() {
    assert!(Canvas::new(0, 10).is_err());
    let c = Canvas::new(200, 100).unwrap();
    assert_eq!(c.percent_to_px(50.0, 50.0), Point::new(100.0, 50.0));
}

#[test]
fn sprite_angle_degrees_roundtrip_through_serde() {
    for a in SpriteAngle::ALL {
        assert_eq!(SpriteAngle::from_degrees(a.degrees()).unwrap(), a);
    }
    assert!(SpriteAngle::from_degrees(30).is_err());

    let json = serde_json::to_string(&SpriteAngle::Left).unwrap();
    assert_eq!(json, "270");
    let back: SpriteAngle = serde_json::from_str("135").unwrap();
    assert_eq!(back, SpriteAngle::BackRight);
    assert!(serde_json::from_str::<SpriteAngle>("10").is_err());
}
