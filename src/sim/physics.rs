//! Minimal tray physics for headless play and tests
//!
//! Not a physics engine: explicit Euler integration, pairwise overlap
//! separation and wall clamping. Collisions are perfectly inelastic and
//! frictionless with equal masses, which is all the marbles need to slide
//! and stack.

use std::collections::HashMap;

use glam::Vec2;

use super::ports::{CircleCollider, PhysicsWorld, Rect};
use super::state::{BallId, BallStore};
use crate::consts::{DEFAULT_GRAVITY, PIXELS_PER_METER};

/// Separation passes per step
const SOLVER_ITERATIONS: u32 = 8;

#[derive(Debug, Clone, Copy)]
struct Body {
    vel: Vec2,
    collider: CircleCollider,
}

/// Reference `PhysicsWorld` implementation
#[derive(Debug, Clone)]
pub struct TrayPhysics {
    /// m/s²
    gravity: Vec2,
    pixels_per_meter: f32,
    container: Option<Rect>,
    bodies: HashMap<BallId, Body>,
}

impl Default for TrayPhysics {
    fn default() -> Self {
        Self::new(PIXELS_PER_METER)
    }
}

impl TrayPhysics {
    pub fn new(pixels_per_meter: f32) -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            pixels_per_meter,
            container: None,
            bodies: HashMap::new(),
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn velocity(&self, id: BallId) -> Option<Vec2> {
        self.bodies.get(&id).map(|b| b.vel)
    }

    fn radius(&self, id: BallId) -> f32 {
        self.bodies.get(&id).map_or(0.0, |b| b.collider.radius)
    }

    /// Push overlapping pairs apart and cancel their closing velocity
    fn separate(&mut self, balls: &mut BallStore) {
        let balls = balls.as_mut_slice();
        for i in 0..balls.len() {
            let (head, tail) = balls.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                let min_dist = self.radius(a.id) + self.radius(b.id);
                let delta = b.pos - a.pos;
                let dist_sq = delta.length_squared();
                if dist_sq >= min_dist * min_dist || dist_sq < 1e-6 {
                    continue;
                }

                let dist = dist_sq.sqrt();
                let normal = delta / dist;
                let correction = normal * (min_dist - dist) * 0.5;
                a.pos -= correction;
                b.pos += correction;

                let (Some(va), Some(vb)) = (self.velocity(a.id), self.velocity(b.id)) else {
                    continue;
                };
                let closing = (vb - va).dot(normal);
                if closing < 0.0 {
                    // Zero restitution: both end with the same normal velocity
                    let impulse = normal * closing * 0.5;
                    if let Some(body) = self.bodies.get_mut(&a.id) {
                        body.vel = va + impulse;
                    }
                    if let Some(body) = self.bodies.get_mut(&b.id) {
                        body.vel = vb - impulse;
                    }
                }
            }
        }
    }

    /// Keep every ball inside the container, stopping motion into the wall
    fn confine(&mut self, balls: &mut BallStore) {
        let Some(bounds) = self.container else {
            return;
        };
        for ball in balls.iter_mut() {
            let Some(body) = self.bodies.get_mut(&ball.id) else {
                continue;
            };
            let r = Vec2::splat(body.collider.radius);
            let lo = bounds.min + r;
            let hi = (bounds.max - r).max(lo);
            let clamped = ball.pos.clamp(lo, hi);
            if clamped.x != ball.pos.x {
                body.vel.x = 0.0;
            }
            if clamped.y != ball.pos.y {
                body.vel.y = 0.0;
            }
            ball.pos = clamped;
        }
    }
}

impl PhysicsWorld for TrayPhysics {
    fn register_circle_collider(&mut self, id: BallId, _pos: Vec2, collider: &CircleCollider) {
        self.bodies.insert(
            id,
            Body {
                vel: Vec2::ZERO,
                collider: *collider,
            },
        );
    }

    fn set_container(&mut self, bounds: Rect) {
        self.container = Some(bounds);
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn remove_body(&mut self, id: BallId) {
        if self.bodies.remove(&id).is_none() {
            log::trace!("No body for ball {} to remove", id);
        }
    }

    fn step(&mut self, dt: f32, balls: &mut BallStore) {
        let accel = self.gravity * self.pixels_per_meter;
        for ball in balls.iter_mut() {
            if let Some(body) = self.bodies.get_mut(&ball.id) {
                body.vel += accel * dt;
                ball.pos += body.vel * dt;
            }
        }

        // Walls win: a ball pinned against one pushes its neighbor the full way
        self.confine(balls);
        for _ in 0..SOLVER_ITERATIONS {
            self.separate(balls);
            self.confine(balls);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::{Ball, BallColor};

    fn tray() -> (TrayPhysics, BallStore) {
        let mut physics = TrayPhysics::default();
        physics.set_container(Rect::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0)));
        (physics, BallStore::new())
    }

    fn add(physics: &mut TrayPhysics, balls: &mut BallStore, id: BallId, pos: Vec2) {
        physics.register_circle_collider(id, pos, &CircleCollider::marble(5.0));
        balls.insert(Ball::new(id, BallColor::Red, pos));
    }

    #[test]
    fn test_gravity_moves_ball() {
        let (mut physics, mut balls) = tray();
        add(&mut physics, &mut balls, 1, Vec2::new(50.0, 50.0));
        physics.set_gravity(Vec2::new(1.0, 0.0));

        physics.step(SIM_DT, &mut balls);
        let pos = balls.get(1).map(|b| b.pos).unwrap();
        assert!(pos.x > 50.0);
        assert_eq!(pos.y, 50.0);
    }

    #[test]
    fn test_ball_rests_on_wall() {
        let (mut physics, mut balls) = tray();
        add(&mut physics, &mut balls, 1, Vec2::new(50.0, 10.0));
        physics.set_gravity(Vec2::new(0.0, -50.0));

        for _ in 0..120 {
            physics.step(SIM_DT, &mut balls);
        }
        let pos = balls.get(1).map(|b| b.pos).unwrap();
        assert!((pos.y - 5.0).abs() < 1e-3);
        assert_eq!(physics.velocity(1), Some(Vec2::ZERO));
    }

    #[test]
    fn test_overlap_is_separated() {
        let (mut physics, mut balls) = tray();
        add(&mut physics, &mut balls, 1, Vec2::new(50.0, 50.0));
        add(&mut physics, &mut balls, 2, Vec2::new(56.0, 50.0));
        physics.set_gravity(Vec2::ZERO);

        physics.step(SIM_DT, &mut balls);
        let a = balls.get(1).map(|b| b.pos).unwrap();
        let b = balls.get(2).map(|b| b.pos).unwrap();
        assert!(a.distance(b) >= 10.0 - 1e-3);
    }

    #[test]
    fn test_balls_stack_without_bouncing() {
        let (mut physics, mut balls) = tray();
        add(&mut physics, &mut balls, 1, Vec2::new(50.0, 5.0));
        add(&mut physics, &mut balls, 2, Vec2::new(50.0, 30.0));
        physics.set_gravity(Vec2::new(0.0, -20.0));

        for _ in 0..240 {
            physics.step(SIM_DT, &mut balls);
        }
        let top = balls.get(2).map(|b| b.pos).unwrap();
        assert!(top.y < 16.0);
        assert!(top.y > 14.0);
        assert!(top.y >= balls.get(1).map(|b| b.pos.y).unwrap());
    }

    #[test]
    fn test_removed_body_is_forgotten() {
        let (mut physics, mut balls) = tray();
        add(&mut physics, &mut balls, 1, Vec2::new(20.0, 20.0));
        add(&mut physics, &mut balls, 2, Vec2::new(80.0, 20.0));
        balls.remove(1);
        physics.remove_body(1);
        physics.remove_body(42);

        assert_eq!(physics.body_count(), 1);
        assert!(physics.velocity(1).is_none());
        physics.step(SIM_DT, &mut balls);
        assert!(physics.velocity(2).is_some());
    }
}
