//! Seams to the host: physics substrate, hit testing, sensor and event sinks
//!
//! The rule engine never renders, never owns a production physics engine and
//! never touches sensor hardware. Hosts plug those in through these traits.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, BallColor, BallId, BallStore};
use super::tilt::TiltSample;

/// Axis-aligned rectangle in board coordinates (y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Physics body description for one marble
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleCollider {
    pub radius: f32,
    pub rotation_locked: bool,
    pub restitution: f32,
    pub friction: f32,
}

impl CircleCollider {
    /// Marbles glide and stack: no spin, no bounce, no friction
    pub fn marble(radius: f32) -> Self {
        Self {
            radius,
            rotation_locked: true,
            restitution: 0.0,
            friction: 0.0,
        }
    }
}

/// Physics substrate that moves balls around
pub trait PhysicsWorld {
    fn register_circle_collider(&mut self, id: BallId, pos: Vec2, collider: &CircleCollider);

    /// Walls the balls are kept inside
    fn set_container(&mut self, bounds: Rect);

    fn set_gravity(&mut self, gravity: Vec2);

    /// Forget a cleared ball's body. Unknown ids are ignored.
    fn remove_body(&mut self, id: BallId);

    /// Advance one step and write new positions back into `balls`
    fn step(&mut self, dt: f32, balls: &mut BallStore);
}

/// Scene query for the ball under a tap
pub trait HitTest {
    fn topmost_ball_at(&self, point: Vec2, balls: &BallStore) -> Option<BallId>;
}

/// Buffered tilt readings, polled once per tick without blocking
pub trait SensorFeed {
    fn latest_sample(&mut self) -> Option<TiltSample>;
}

/// A fixed reading, or none while the sensor is stopped
impl SensorFeed for Option<TiltSample> {
    fn latest_sample(&mut self) -> Option<TiltSample> {
        *self
    }
}

/// Instructions for the presentation layer; the engine never waits on them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball left the board; remove it from scene and physics, spawn particles
    BallCleared {
        id: BallId,
        color: BallColor,
        pos: Vec2,
    },
    /// Unusually large clear
    Celebrate { match_size: usize },
    ScoreChanged { score: u64, delta: u64 },
}

impl GameEvent {
    pub fn cleared(ball: &Ball) -> Self {
        GameEvent::BallCleared {
            id: ball.id,
            color: ball.color,
            pos: ball.pos,
        }
    }
}

pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Hit test for hosts without a scene graph: the newest ball whose circle
/// contains the point wins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleHitTest {
    pub radius: f32,
}

impl CircleHitTest {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl HitTest for CircleHitTest {
    fn topmost_ball_at(&self, point: Vec2, balls: &BallStore) -> Option<BallId> {
        let radius_sq = self.radius * self.radius;
        balls
            .iter()
            .rev()
            .find(|b| b.pos.distance_squared(point) <= radius_sq)
            .map(|b| b.id)
    }
}
