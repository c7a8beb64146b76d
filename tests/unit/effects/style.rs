use super::*;
use crate::project::model::SfxCategory;

fn fx(id: &str, kind: SfxType, intensity: f64) -> Sfx {
    Sfx::new(id, SfxCategory::Attach, kind, intensity)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn glow_alone_sets_no_animation() {
    let glow = fx("g", SfxType::Glow, 40.0).with_color("#00ffcc");
    let s = compute_style([&glow]);
    assert!(s.animation.is_none());
    assert_eq!(
        s.filters,
        [StyleFilter::DropShadow {
            radius_px: 20.0,
            color: Some("#00ffcc".to_string())
        }]
    );
}

#[test]
fn pulse_duration_spans_two_seconds_to_a_fifth() {
    let fast = fx("p", SfxType::Pulse, 50.0).with_speed(100.0);
    let slow = fx("p", SfxType::Pulse, 50.0).with_speed(0.0);
    let a = compute_style([&fast]).animation.unwrap();
    assert_eq!(a.name, AnimationName::Pulse);
    assert!(approx(a.duration_secs, 0.2));
    assert!(approx(
        compute_style([&slow]).animation.unwrap().duration_secs,
        2.0
    ));
    assert_eq!(a.to_css(), "sfx-pulse 0.2s infinite ease-in-out");
}

#[test]
fn glow_then_pulse_accumulates_filters_and_keeps_pulse_animation() {
    let glow = fx("g", SfxType::Glow, 40.0);
    let pulse = fx("p", SfxType::Pulse, 50.0).with_speed(50.0);
    let s = compute_style([&glow, &pulse]);
    assert_eq!(s.filters.len(), 2);
    assert_eq!(s.animation.unwrap().name, AnimationName::Pulse);

    let s = compute_style([&pulse, &glow]);
    assert_eq!(s.filters.len(), 2);
    assert_eq!(s.animation.unwrap().name, AnimationName::Pulse);
}

#[test]
fn last_animated_effect_wins() {
    let pulse = fx("p", SfxType::Pulse, 50.0).with_speed(100.0);
    let shake = fx("s", SfxType::Shake, 50.0).with_speed(100.0);
    let a = compute_style([&pulse, &shake]).animation.unwrap();
    assert_eq!(a.name, AnimationName::Shake);
    assert!(approx(a.duration_secs, 0.1));

    let a = compute_style([&shake, &pulse]).animation.unwrap();
    assert_eq!(a.name, AnimationName::Pulse);
}

#[test]
fn jiggle_and_shake_periods() {
    let j = fx("j", SfxType::Jiggle, 0.0).with_speed(50.0);
    let s = fx("s", SfxType::Shake, 0.0).with_speed(0.0);
    assert!(approx(compute_style([&j]).animation.unwrap().duration_secs, 0.6));
    assert!(approx(compute_style([&s]).animation.unwrap().duration_secs, 1.0));
}

#[test]
fn fade_sets_opacity_from_intensity() {
    let f = fx("f", SfxType::Fade, 75.0);
    let s = compute_style([&f]);
    assert_eq!(s.opacity, Some(0.25));
    assert!(s.animation.is_none());
    assert!(s.filters.is_empty());
}

#[test]
fn electric_defaults_speed_and_tint() {
    let e = fx("e", SfxType::Electric, 10.0);
    let s = compute_style([&e]);
    let a = s.animation.unwrap();
    assert_eq!(a.name, AnimationName::Electric);
    assert!(approx(a.duration_secs, 1.1));
    assert_eq!(s.tint.as_deref(), Some(DEFAULT_ELECTRIC_TINT));

    let e = fx("e", SfxType::Electric, 10.0)
        .with_speed(100.0)
        .with_color("#ff00ff");
    let s = compute_style([&e]);
    assert!(approx(s.animation.unwrap().duration_secs, 0.2));
    assert_eq!(s.tint.as_deref(), Some("#ff00ff"));
}

#[test]
fn element_style_skips_unknown_ids() {
    let library = vec![
        fx("glow", SfxType::Glow, 20.0),
        fx("fade", SfxType::Fade, 50.0),
    ];
    let active = vec!["missing".to_string(), "glow".to_string(), "fade".to_string()];
    let s = element_style(&library, &active);
    assert_eq!(s.filters.len(), 1);
    assert_eq!(s.opacity, Some(0.5));
    assert!(element_style(&library, &[]).is_empty());
}

#[test]
fn css_declarations_render_filter_stack() {
    let glow = fx("g", SfxType::Glow, 30.0).with_color("red");
    let pulse = fx("p", SfxType::Pulse, 25.0)
        .with_speed(0.0)
        .with_color("blue");
    let decls = compute_style([&glow, &pulse]).css_declarations();
    assert_eq!(
        decls,
        [
            ("animation", "sfx-pulse 2s infinite ease-in-out".to_string()),
            (
                "filter",
                "drop-shadow(0 0 15px red) drop-shadow(0 0 5px blue)".to_string()
            ),
        ]
    );
}
