use crate::foundation::error::{DramaError, DramaResult};

pub use kurbo::{Affine, Point, Vec2};

/// Lower bound of the stage coordinate space (percent).
pub const STAGE_MIN: f64 = 0.0;
/// Upper bound of the stage coordinate space (percent).
pub const STAGE_MAX: f64 = 100.0;

/// Clamp a stage coordinate to `[0, 100]`. Non-finite input collapses to the lower bound.
pub fn clamp_percent(v: f64) -> f64 {
    if !v.is_finite() {
        return STAGE_MIN;
    }
    v.clamp(STAGE_MIN, STAGE_MAX)
}

/// Pixel dimensions of a surface a stage is projected onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting zero-sized dimensions.
    pub fn new(width: u32, height: u32) -> DramaResult<Self> {
        if width == 0 || height == 0 {
            return Err(DramaError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Map a percent-space stage position to pixel space.
    pub fn percent_to_px(self, x: f64, y: f64) -> Point {
        Point::new(
            x / 100.0 * f64::from(self.width),
            y / 100.0 * f64::from(self.height),
        )
    }
}

/// Viewing angle of an actor sprite, in 45 degree steps.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub enum SpriteAngle {
    /// Facing the viewer.
    #[default]
    Front,
    /// 45 degrees.
    FrontRight,
    /// 90 degrees.
    Right,
    /// 135 degrees.
    BackRight,
    /// 180 degrees.
    Back,
    /// 225 degrees.
    BackLeft,
    /// 270 degrees.
    Left,
    /// 315 degrees.
    FrontLeft,
}

impl SpriteAngle {
    /// All angles in ascending degree order.
    pub const ALL: [SpriteAngle; 8] = [
        SpriteAngle::Front,
        SpriteAngle::FrontRight,
        SpriteAngle::Right,
        SpriteAngle::BackRight,
        SpriteAngle::Back,
        SpriteAngle::BackLeft,
        SpriteAngle::Left,
        SpriteAngle::FrontLeft,
    ];

    /// Angle in degrees.
    pub fn degrees(self) -> u16 {
        match self {
            SpriteAngle::Front => 0,
            SpriteAngle::FrontRight => 45,
            SpriteAngle::Right => 90,
            SpriteAngle::BackRight => 135,
            SpriteAngle::Back => 180,
            SpriteAngle::BackLeft => 225,
            SpriteAngle::Left => 270,
            SpriteAngle::FrontLeft => 315,
        }
    }

    /// Parse a degree value; only multiples of 45 in `[0, 315]` are accepted.
    pub fn from_degrees(deg: u16) -> DramaResult<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.degrees() == deg)
            .ok_or_else(|| {
                DramaError::validation(format!(
                    "sprite angle must be one of 0,45,...,315 (got {deg})"
                ))
            })
    }
}

impl TryFrom<u16> for SpriteAngle {
    type Error = DramaError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_degrees(value)
    }
}

impl From<SpriteAngle> for u16 {
    fn from(value: SpriteAngle) -> Self {
        value.degrees()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
