//! Fixed timestep simulation tick
//!
//! Each tick polls the tilt sensor, hands the resulting gravity to the
//! physics substrate and lets it move the balls. Taps are handled between
//! ticks on the same thread, never during a step.

use super::ports::{PhysicsWorld, SensorFeed};
use super::state::GameSession;
use crate::consts::MAX_SUBSTEPS;

/// Advance the session by one fixed timestep
pub fn tick(
    session: &mut GameSession,
    sensor: &mut impl SensorFeed,
    physics: &mut impl PhysicsWorld,
    dt: f32,
) {
    // No sample yet (sensor starting or unavailable): keep the last gravity
    session.gravity = session.tilt.apply(session.gravity, sensor.latest_sample());
    physics.set_gravity(session.gravity);
    physics.step(dt, &mut session.balls);
    session.time_ticks += 1;
}

/// Splits variable frame times into whole fixed steps
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add a frame's elapsed time and return how many ticks to run.
    /// Long frames are clamped to avoid a spiral of death.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.dt;
            substeps += 1;
        }
        substeps
    }
}
