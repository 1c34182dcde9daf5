//! Session state and core entity types
//!
//! Everything a tap or tick mutates lives on `GameSession`, so several
//! sessions can run side by side and tests stay deterministic.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::matching::{MatchRadius, MatchSet, NeighborSearch};
use super::tilt::TiltMapping;
use crate::consts::*;
use crate::settings::Settings;

/// Stable ball identity, allocated in increasing order
pub type BallId = u32;

/// Ball colors available to the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallColor {
    Blue,
    Green,
    Purple,
    Red,
    Yellow,
}

impl BallColor {
    pub const ALL: [BallColor; 5] = [
        BallColor::Blue,
        BallColor::Green,
        BallColor::Purple,
        BallColor::Red,
        BallColor::Yellow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BallColor::Blue => "blue",
            BallColor::Green => "green",
            BallColor::Purple => "purple",
            BallColor::Red => "red",
            BallColor::Yellow => "yellow",
        }
    }
}

/// A marble on the tray
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    /// Fixed at creation
    pub color: BallColor,
    /// Center position, written by the physics substrate only
    pub pos: Vec2,
}

impl Ball {
    pub fn new(id: BallId, color: BallColor, pos: Vec2) -> Self {
        Self { id, color, pos }
    }
}

/// Non-empty set of colors to draw new balls from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette(Vec<BallColor>);

impl Palette {
    /// Returns `None` for an empty color list
    pub fn new(colors: Vec<BallColor>) -> Option<Self> {
        if colors.is_empty() {
            None
        } else {
            Some(Self(colors))
        }
    }

    /// All five colors
    pub fn full() -> Self {
        Self(BallColor::ALL.to_vec())
    }

    pub fn single(color: BallColor) -> Self {
        Self(vec![color])
    }

    pub fn colors(&self) -> &[BallColor] {
        &self.0
    }

    /// Uniform pick, independent of any previous pick
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> BallColor {
        self.0[rng.random_range(0..self.0.len())]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::full()
    }
}

/// Authoritative set of active balls (sorted by id for determinism)
#[derive(Debug, Clone, Default)]
pub struct BallStore {
    balls: Vec<Ball>,
}

impl BallStore {
    pub fn new() -> Self {
        Self { balls: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// Balls in ascending id order
    pub fn iter(&self) -> std::slice::Iter<'_, Ball> {
        self.balls.iter()
    }

    /// Mutable access for the physics substrate to write positions back
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Ball> {
        self.balls.iter_mut()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    fn index_of(&self, id: BallId) -> Option<usize> {
        self.balls.binary_search_by_key(&id, |b| b.id).ok()
    }

    pub fn get(&self, id: BallId) -> Option<&Ball> {
        self.index_of(id).map(|i| &self.balls[i])
    }

    /// Insert a ball, replacing any ball that already has its id
    pub fn insert(&mut self, ball: Ball) {
        match self.balls.binary_search_by_key(&ball.id, |b| b.id) {
            Ok(i) => self.balls[i] = ball,
            Err(i) => self.balls.insert(i, ball),
        }
    }

    pub fn remove(&mut self, id: BallId) -> Option<Ball> {
        self.index_of(id).map(|i| self.balls.remove(i))
    }
}

impl FromIterator<Ball> for BallStore {
    fn from_iter<I: IntoIterator<Item = Ball>>(iter: I) -> Self {
        let mut balls: Vec<Ball> = iter.into_iter().collect();
        balls.sort_by_key(|b| b.id);
        balls.dedup_by_key(|b| b.id);
        Self { balls }
    }
}

/// One player's game: board contents, score and the per-tap accumulator
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    seed: u64,
    rng: Pcg32,
    /// Active balls
    pub balls: BallStore,
    /// Score, only ever increased by a successful match
    score: u64,
    /// Balls gathered by the most recent resolution
    pub(crate) matched: MatchSet,
    /// Gravity last handed to the physics substrate
    pub gravity: Vec2,
    pub tilt: TiltMapping,
    pub match_radius: MatchRadius,
    pub neighbor_search: NeighborSearch,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    /// Next entity ID
    next_id: BallId,
}

impl GameSession {
    /// Create an empty session; populate it with `populate_grid`
    pub fn new(seed: u64, ball_diameter: f32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            balls: BallStore::new(),
            score: 0,
            matched: MatchSet::new(),
            gravity: DEFAULT_GRAVITY,
            tilt: TiltMapping::default(),
            match_radius: MatchRadius::for_diameter(ball_diameter),
            neighbor_search: NeighborSearch::default(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut session = Self::new(settings.seed, settings.board.ball_diameter);
        session.tilt = settings.tilt;
        session.neighbor_search = settings.neighbor_search;
        session
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Result of the most recent tap resolution
    pub fn matched(&self) -> &MatchSet {
        &self.matched
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> BallId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Add a score delta, returning the new total
    pub(crate) fn award(&mut self, delta: u64) -> u64 {
        self.score = self.score.saturating_add(delta);
        self.score
    }
}
