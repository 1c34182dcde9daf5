//! Marbles - rule engine for a tilt-controlled marble matching puzzle
//!
//! Core modules:
//! - `sim`: Deterministic rules (board layout, match resolution, scoring, tilt)
//! - `settings`: Data-driven configuration loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Board defaults (landscape tablet)
    pub const BOARD_WIDTH: f32 = 1024.0;
    pub const BOARD_HEIGHT: f32 = 768.0;
    /// Band reserved for the score display; the tray floor sits on top of it
    pub const TOP_MARGIN: f32 = 100.0;
    pub const BALL_DIAMETER: f32 = 64.0;

    /// Gravity before the first tilt sample arrives (m/s²)
    pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -9.8);
    /// Tilt-to-gravity multiplier; raw tilt is very broad
    pub const TILT_SENSITIVITY: f32 = 50.0;
    /// Scale from physics meters to board points
    pub const PIXELS_PER_METER: f32 = 150.0;

    /// Squared-distance slack over exact edge contact, absorbs simulation jitter
    pub const PROXIMITY_FACTOR: f32 = 1.1;
    /// Smallest group that clears
    pub const MIN_MATCH: usize = 3;
    /// Score exponent stops growing past this match size
    pub const SCORE_EXPONENT_CAP: usize = 16;
    /// Match size that triggers the celebration
    pub const CELEBRATE_THRESHOLD: usize = 10;
}

/// Evenly spaced values in `[from, to)`, stepping by `by`.
///
/// Values are computed from the index rather than accumulated so long strides
/// don't drift. Yields nothing when `by` is not positive.
pub fn stride(from: f32, to: f32, by: f32) -> impl Iterator<Item = f32> {
    let count = if by > 0.0 && to > from {
        ((to - from) / by).ceil() as usize
    } else {
        0
    };
    (0..count).map(move |i| from + i as f32 * by)
}
