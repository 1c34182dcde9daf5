//! Deterministic rule engine
//!
//! All gameplay rules live here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by ball ID)
//! - Rendering, production physics and sensors are reached only through `ports`

pub mod grid;
pub mod matching;
pub mod physics;
pub mod ports;
pub mod scoring;
pub mod spatial;
pub mod state;
pub mod tap;
pub mod tick;
pub mod tilt;

pub use grid::{BoardLayout, populate_grid};
pub use matching::{MatchRadius, MatchSet, NeighborSearch, resolve, resolve_matches};
pub use physics::TrayPhysics;
pub use ports::{
    CircleCollider, CircleHitTest, EventSink, GameEvent, HitTest, PhysicsWorld, Rect, SensorFeed,
};
pub use scoring::{is_celebration, meets_minimum, score_delta};
pub use spatial::SpatialHash;
pub use state::{Ball, BallColor, BallId, BallStore, GameSession, Palette};
pub use tap::{TapOutcome, on_tap};
pub use tick::{FixedTimestep, tick};
pub use tilt::{Orientation, TiltMapping, TiltSample};
