//! Marbles entry point
//!
//! Runs a scripted headless session on the built-in tray physics: tilt the
//! board a few ways, tap everything, report the score.
//!
//! Usage: `marbles [settings.json]`

use std::process::ExitCode;

use marbles::Settings;
use marbles::consts::*;
use marbles::sim::{
    CircleHitTest, FixedTimestep, GameEvent, GameSession, TiltSample, TrayPhysics, on_tap,
    populate_grid, tick,
};

/// Frame time of the pretend display (30 fps, two ticks per frame)
const FRAME_DT: f32 = 1.0 / 30.0;
/// Frames to let the board settle after each tilt change
const FRAMES_PER_TILT: u32 = 45;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Marbles (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    let Some(palette) = settings.palette() else {
        log::error!("Palette is empty; at least one ball color is required");
        return ExitCode::FAILURE;
    };

    let mut session = GameSession::from_settings(&settings);
    let mut physics = TrayPhysics::default();
    populate_grid(&mut session, &settings.board, &palette, &mut physics);
    log::info!(
        "Seed {}, tilt {} x{}, neighbor search {}",
        session.seed(),
        session.tilt.orientation.as_str(),
        session.tilt.sensitivity,
        session.neighbor_search.as_str()
    );

    let hit_test = CircleHitTest::new(settings.board.ball_radius());
    let mut clock = FixedTimestep::new(SIM_DT);
    let mut events: Vec<GameEvent> = Vec::new();

    // Lying flat (sensor off), then tipped toward each long edge and back
    let script = [
        None,
        Some(TiltSample::new(0.0, -0.4, -0.9)),
        Some(TiltSample::new(0.0, 0.4, -0.9)),
        Some(TiltSample::new(0.3, 0.0, -0.95)),
    ];

    for mut sensor in script {
        for _ in 0..FRAMES_PER_TILT {
            for _ in 0..clock.advance(FRAME_DT) {
                tick(&mut session, &mut sensor, &mut physics, clock.dt());
            }
        }

        for point in settings.board.lattice_points() {
            on_tap(&mut session, point, &hit_test, &mut physics, &mut events);
        }

        for event in events.drain(..) {
            match event {
                GameEvent::ScoreChanged { score, delta } => {
                    log::info!("+{} -> {}", delta, score);
                }
                GameEvent::Celebrate { match_size } => {
                    log::info!("OMG! {} in one go", match_size);
                }
                GameEvent::BallCleared { id, color, pos } => {
                    log::debug!("Cleared {} ball {} at ({:.0}, {:.0})", color.as_str(), id, pos.x, pos.y);
                }
            }
        }
        log::info!(
            "Gravity ({:.1}, {:.1}): {} balls left",
            session.gravity.x,
            session.gravity.y,
            session.balls.len()
        );
    }

    println!(
        "SCORE: {} ({} balls left after {} ticks)",
        session.score(),
        session.balls.len(),
        session.time_ticks()
    );
    ExitCode::SUCCESS
}
