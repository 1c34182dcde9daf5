//! Device tilt to simulation gravity
//!
//! The accelerometer reports in the device's portrait frame. Rotating that
//! into the screen frame depends on how the device is held, and the hold is
//! not auto-detected: the host configures it through `Orientation`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TILT_SENSITIVITY;

/// Raw 3-axis acceleration reading (in g)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TiltSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl TiltSample {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// How the device is held relative to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Home button / charging port on the right
    #[default]
    #[serde(alias = "right")]
    LandscapeRight,
    #[serde(alias = "left")]
    LandscapeLeft,
    Portrait,
    #[serde(alias = "upside_down")]
    PortraitUpsideDown,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::LandscapeRight => "landscape_right",
            Orientation::LandscapeLeft => "landscape_left",
            Orientation::Portrait => "portrait",
            Orientation::PortraitUpsideDown => "portrait_upside_down",
        }
    }

    /// Rotate a sample's x/y into the screen frame (unit scale)
    pub fn to_screen(&self, sample: TiltSample) -> Vec2 {
        match self {
            // Landscape: axes swap, and the screen-y component is negated
            Orientation::LandscapeRight => Vec2::new(sample.y, -sample.x),
            Orientation::LandscapeLeft => Vec2::new(-sample.y, sample.x),
            Orientation::Portrait => Vec2::new(sample.x, sample.y),
            Orientation::PortraitUpsideDown => Vec2::new(-sample.x, -sample.y),
        }
    }
}

/// Tilt-to-gravity mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltMapping {
    /// Multiplier on the raw reading; tilt is broad so this is large
    pub sensitivity: f32,
    pub orientation: Orientation,
}

impl Default for TiltMapping {
    fn default() -> Self {
        Self {
            sensitivity: TILT_SENSITIVITY,
            orientation: Orientation::LandscapeRight,
        }
    }
}

impl TiltMapping {
    pub fn new(sensitivity: f32, orientation: Orientation) -> Self {
        Self {
            sensitivity,
            orientation,
        }
    }

    /// Gravity vector for one sample
    pub fn map_gravity(&self, sample: TiltSample) -> Vec2 {
        self.orientation.to_screen(sample) * self.sensitivity
    }

    /// Next gravity: mapped from `sample`, or `current` unchanged without one
    pub fn apply(&self, current: Vec2, sample: Option<TiltSample>) -> Vec2 {
        sample.map_or(current, |s| self.map_gravity(s))
    }
}
