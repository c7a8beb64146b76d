use crate::project::model::{Sfx, SfxType};

/// Tint used by `electric` when the effect has no color.
pub const DEFAULT_ELECTRIC_TINT: &str = "#ffff00";

/// Speed assumed by `electric` when the effect has none.
pub const DEFAULT_ELECTRIC_SPEED: f64 = 50.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One entry of a filter stack.
pub enum StyleFilter {
    /// Blurred halo around the element's opaque pixels.
    DropShadow {
        /// Blur radius in pixels.
        radius_px: f64,
        /// Halo color; `None` renders as `currentColor`.
        color: Option<String>,
    },
}

impl StyleFilter {
    /// CSS `filter` function.
    pub fn to_css(&self) -> String {
        match self {
            StyleFilter::DropShadow { radius_px, color } => format!(
                "drop-shadow(0 0 {}px {})",
                fmt_number(*radius_px),
                color.as_deref().unwrap_or("currentColor")
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Named looping animation.
pub enum AnimationName {
    /// Breathing scale.
    Pulse,
    /// Wobble.
    Jiggle,
    /// Rapid translate.
    Shake,
    /// Flicker.
    Electric,
}

impl AnimationName {
    /// Stable identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            AnimationName::Pulse => "pulse",
            AnimationName::Jiggle => "jiggle",
            AnimationName::Shake => "shake",
            AnimationName::Electric => "electric",
        }
    }

    /// CSS timing function the keyframes are authored for.
    pub fn timing(self) -> &'static str {
        match self {
            AnimationName::Pulse | AnimationName::Jiggle => "ease-in-out",
            AnimationName::Shake | AnimationName::Electric => "linear",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Animation directive: a named loop with a period.
pub struct Animation {
    /// Which keyframes to run.
    pub name: AnimationName,
    /// Loop period in seconds.
    pub duration_secs: f64,
}

impl Animation {
    /// CSS `animation` shorthand, e.g. `sfx-shake 0.1s infinite linear`.
    pub fn to_css(&self) -> String {
        format!(
            "sfx-{} {}s infinite {}",
            self.name.as_str(),
            fmt_number(self.duration_secs),
            self.name.timing()
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// Combined visual style for one stage element.
pub struct StyleDescriptor {
    /// Element opacity in `[0, 1]`; `None` leaves it opaque.
    pub opacity: Option<f64>,
    /// Filters in application order.
    pub filters: Vec<StyleFilter>,
    /// Single animation slot; the last effect that sets it wins.
    pub animation: Option<Animation>,
    /// Text/tint color override.
    pub tint: Option<String>,
}

impl StyleDescriptor {
    /// True when no effect contributed anything.
    pub fn is_empty(&self) -> bool {
        self.opacity.is_none()
            && self.filters.is_empty()
            && self.animation.is_none()
            && self.tint.is_none()
    }

    /// CSS declarations in a fixed property order.
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(a) = &self.animation {
            out.push(("animation", a.to_css()));
        }
        if let Some(c) = &self.tint {
            out.push(("color", c.clone()));
        }
        if let Some(o) = self.opacity {
            out.push(("opacity", fmt_number(o)));
        }
        if !self.filters.is_empty() {
            let stack: Vec<String> = self.filters.iter().map(StyleFilter::to_css).collect();
            out.push(("filter", stack.join(" ")));
        }
        out
    }
}

fn pct(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 100.0) } else { 0.0 }
}

/// `base - (speed / 100) * span`, with speed clamped to `0..=100`.
fn period(base: f64, span: f64, speed: f64) -> f64 {
    base - pct(speed) / 100.0 * span
}

/// Round to milliseconds and drop trailing zeros.
fn fmt_number(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    format!("{r}")
}

/// Fold effects, in order, into one style.
///
/// `filters` accumulate and the last `fade` sets `opacity`; `animation` is a single slot
/// overwritten by every animated effect, so the last one in iteration order wins.
pub fn compute_style<'a, I>(effects: I) -> StyleDescriptor
where
    I: IntoIterator<Item = &'a Sfx>,
{
    let mut style = StyleDescriptor::default();

    for sfx in effects {
        let p = &sfx.params;
        let intensity = pct(p.intensity);
        let speed = p.speed.unwrap_or(0.0);

        match sfx.kind {
            SfxType::Glow => style.filters.push(StyleFilter::DropShadow {
                radius_px: intensity / 2.0,
                color: p.color.clone(),
            }),
            SfxType::Pulse => {
                style.animation = Some(Animation {
                    name: AnimationName::Pulse,
                    duration_secs: period(2.0, 1.8, speed),
                });
                style.filters.push(StyleFilter::DropShadow {
                    radius_px: intensity / 5.0,
                    color: p.color.clone(),
                });
            }
            SfxType::Jiggle => {
                style.animation = Some(Animation {
                    name: AnimationName::Jiggle,
                    duration_secs: period(1.0, 0.8, speed),
                });
            }
            SfxType::Shake => {
                style.animation = Some(Animation {
                    name: AnimationName::Shake,
                    duration_secs: period(1.0, 0.9, speed),
                });
            }
            SfxType::Fade => style.opacity = Some((100.0 - intensity) / 100.0),
            SfxType::Electric => {
                style.animation = Some(Animation {
                    name: AnimationName::Electric,
                    duration_secs: period(2.0, 1.8, p.speed.unwrap_or(DEFAULT_ELECTRIC_SPEED)),
                });
                style.tint = Some(
                    p.color
                        .clone()
                        .unwrap_or_else(|| DEFAULT_ELECTRIC_TINT.to_string()),
                );
            }
        }
    }

    style
}

/// Style for a list of effect ids looked up in `library`. Unknown ids are skipped.
pub fn element_style(library: &[Sfx], active: &[String]) -> StyleDescriptor {
    compute_style(active.iter().filter_map(|id| {
        let found = library.iter().find(|s| &s.id == id);
        if found.is_none() {
            tracing::debug!(sfx = %id, "skipping unknown effect id");
        }
        found
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/style.rs"]
mod tests;
