//! Initial board layout
//!
//! Balls start on a square lattice one diameter apart, each colored
//! independently at random. Nothing stops two same-colored neighbors from
//! landing side by side; that's part of the game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::matching::MatchRadius;
use super::ports::{CircleCollider, PhysicsWorld, Rect};
use super::state::{Ball, GameSession, Palette};
use crate::consts::*;
use crate::stride;

/// Play area dimensions and ball size (board points, y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardLayout {
    pub width: f32,
    pub height: f32,
    pub ball_diameter: f32,
    /// Band kept free for the score display; balls and walls start above it
    pub top_margin: f32,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            ball_diameter: BALL_DIAMETER,
            top_margin: TOP_MARGIN,
        }
    }
}

impl BoardLayout {
    #[inline]
    pub fn ball_radius(&self) -> f32 {
        self.ball_diameter / 2.0
    }

    /// Lattice points column by column: x in `[r, width - r)`,
    /// y in `[top_margin, height - r)`, one diameter apart
    pub fn lattice_points(&self) -> impl Iterator<Item = Vec2> {
        let r = self.ball_radius();
        let step = self.ball_diameter;
        let (y_from, y_to) = (self.top_margin, self.height - r);
        stride(r, self.width - r, step)
            .flat_map(move |x| stride(y_from, y_to, step).map(move |y| Vec2::new(x, y)))
    }

    /// Walls of the tray: the whole area minus the score band
    pub fn container(&self) -> Rect {
        Rect::new(
            Vec2::new(0.0, self.top_margin),
            Vec2::new(self.width, self.height),
        )
    }
}

/// Fill the board and register every ball with the physics substrate.
///
/// The session's match radius is re-derived from the layout's ball size.
/// Returns the number of balls created.
pub fn populate_grid(
    session: &mut GameSession,
    layout: &BoardLayout,
    palette: &Palette,
    physics: &mut impl PhysicsWorld,
) -> usize {
    let radius = MatchRadius::for_diameter(layout.ball_diameter);
    if session.match_radius != radius {
        log::debug!("Match radius follows layout diameter {}", layout.ball_diameter);
        session.match_radius = radius;
    }

    physics.set_container(layout.container());
    let collider = CircleCollider::marble(layout.ball_radius());

    let mut count = 0;
    for pos in layout.lattice_points() {
        let color = palette.pick(session.rng_mut());
        let id = session.next_entity_id();
        physics.register_circle_collider(id, pos, &collider);
        session.balls.insert(Ball::new(id, color, pos));
        count += 1;
    }

    log::info!(
        "Board {}x{}: placed {} balls (diameter {}, {} colors)",
        layout.width,
        layout.height,
        count,
        layout.ball_diameter,
        palette.colors().len()
    );
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BallColor, BallId, BallStore};

    /// Records every call the grid makes
    #[derive(Default)]
    struct RecordingPhysics {
        colliders: Vec<(BallId, Vec2, CircleCollider)>,
        container: Option<Rect>,
    }

    impl PhysicsWorld for RecordingPhysics {
        fn register_circle_collider(&mut self, id: BallId, pos: Vec2, collider: &CircleCollider) {
            self.colliders.push((id, pos, *collider));
        }
        fn set_container(&mut self, bounds: Rect) {
            self.container = Some(bounds);
        }
        fn set_gravity(&mut self, _gravity: Vec2) {}
        fn remove_body(&mut self, _id: BallId) {}
        fn step(&mut self, _dt: f32, _balls: &mut BallStore) {}
    }

    fn two_by_two() -> BoardLayout {
        BoardLayout {
            width: 25.0,
            height: 35.0,
            ball_diameter: 10.0,
            top_margin: 10.0,
        }
    }

    #[test]
    fn test_lattice_two_by_two() {
        let points: Vec<Vec2> = two_by_two().lattice_points().collect();
        assert_eq!(
            points,
            vec![
                Vec2::new(5.0, 10.0),
                Vec2::new(5.0, 20.0),
                Vec2::new(15.0, 10.0),
                Vec2::new(15.0, 20.0),
            ]
        );
    }

    #[test]
    fn test_default_lattice_size() {
        // 1024 wide: x = 32, 96, ..., 928 (15 columns, stops before 992)
        // 768 high: y = 100, 164, ..., 676 (10 rows, stops before 736)
        assert_eq!(BoardLayout::default().lattice_points().count(), 15 * 10);
    }

    #[test]
    fn test_lattice_stays_inside_container() {
        let layout = BoardLayout::default();
        let container = layout.container();
        for p in layout.lattice_points() {
            assert!(container.contains(p));
            assert!(p.x - layout.ball_radius() >= container.min.x);
            assert!(p.x + layout.ball_radius() <= container.max.x);
        }
    }

    #[test]
    fn test_populate_registers_marbles() {
        let mut session = GameSession::new(3, 10.0);
        let mut physics = RecordingPhysics::default();
        let placed = populate_grid(&mut session, &two_by_two(), &Palette::full(), &mut physics);

        assert_eq!(placed, 4);
        assert_eq!(session.balls.len(), 4);
        assert_eq!(physics.colliders.len(), 4);
        assert_eq!(physics.container, Some(two_by_two().container()));
        for (id, pos, collider) in &physics.colliders {
            assert_eq!(*collider, CircleCollider::marble(5.0));
            assert_eq!(session.balls.get(*id).map(|b| b.pos), Some(*pos));
        }
    }

    #[test]
    fn test_populate_matches_layout_diameter() {
        let mut session = GameSession::new(3, BALL_DIAMETER);
        let mut physics = RecordingPhysics::default();
        populate_grid(&mut session, &two_by_two(), &Palette::full(), &mut physics);
        assert_eq!(session.match_radius, MatchRadius::for_diameter(10.0));
    }

    #[test]
    fn test_populate_single_color_palette() {
        let mut session = GameSession::new(3, 10.0);
        let mut physics = RecordingPhysics::default();
        populate_grid(
            &mut session,
            &two_by_two(),
            &Palette::single(BallColor::Purple),
            &mut physics,
        );
        assert!(session.balls.iter().all(|b| b.color == BallColor::Purple));
    }

    #[test]
    fn test_populate_is_deterministic_per_seed() {
        let colors = |seed: u64| {
            let mut session = GameSession::new(seed, BALL_DIAMETER);
            let mut physics = RecordingPhysics::default();
            populate_grid(&mut session, &BoardLayout::default(), &Palette::full(), &mut physics);
            session.balls.iter().map(|b| b.color).collect::<Vec<_>>()
        };
        assert_eq!(colors(1234), colors(1234));
        assert_ne!(colors(1234), colors(4321));
    }
}
