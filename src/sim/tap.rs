//! Tap handling: hit test, resolve, score, clear

use glam::Vec2;

use super::matching::resolve_matches;
use super::ports::{EventSink, GameEvent, HitTest, PhysicsWorld};
use super::scoring::{is_celebration, score_delta};
use super::state::{BallId, GameSession};

/// What a tap did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TapOutcome {
    /// Ball under the tap, if any
    pub hit: Option<BallId>,
    /// Size of the resolved group (0 without a hit)
    pub match_size: usize,
    /// Points awarded (0 when nothing cleared)
    pub delta: u64,
    pub celebrated: bool,
}

impl TapOutcome {
    pub fn cleared(&self) -> bool {
        self.delta > 0
    }
}

/// Handle a tap at `point`.
///
/// Empty taps and groups below the minimum match are no-ops. A successful
/// match emits `ScoreChanged`, one `BallCleared` per ball (removing it from
/// the store and its body from `physics`), then `Celebrate` for big groups.
pub fn on_tap(
    session: &mut GameSession,
    point: Vec2,
    hit_test: &impl HitTest,
    physics: &mut impl PhysicsWorld,
    events: &mut impl EventSink,
) -> TapOutcome {
    let Some(tapped) = hit_test.topmost_ball_at(point, &session.balls) else {
        return TapOutcome::default();
    };

    session.matched.clear();
    resolve_matches(
        tapped,
        &session.balls,
        session.match_radius,
        session.neighbor_search,
        &mut session.matched,
    );

    let match_size = session.matched.len();
    let mut outcome = TapOutcome {
        hit: Some(tapped),
        match_size,
        ..Default::default()
    };

    let Some(delta) = score_delta(match_size) else {
        log::debug!("Group of {} from ball {} too small to clear", match_size, tapped);
        return outcome;
    };

    let score = session.award(delta);
    events.emit(GameEvent::ScoreChanged { score, delta });

    for id in session.matched.iter() {
        if let Some(ball) = session.balls.remove(id) {
            physics.remove_body(id);
            events.emit(GameEvent::cleared(&ball));
        }
    }

    if is_celebration(match_size) {
        log::info!("Cleared {} balls at once!", match_size);
        events.emit(GameEvent::Celebrate { match_size });
        outcome.celebrated = true;
    }

    outcome.delta = delta;
    outcome
}
