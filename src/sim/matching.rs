//! Match resolution over live ball positions
//!
//! Adjacency is recomputed from current positions on every call. Balls drift
//! under physics between taps, so a cached neighbor graph would go stale, and
//! contact lists miss resting balls separated by a hair.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::spatial::SpatialHash;
use super::state::{Ball, BallId, BallStore};
use crate::consts::PROXIMITY_FACTOR;

/// Squared-distance cutoff for two same-colored balls to count as touching
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchRadius {
    threshold_sq: f32,
}

impl MatchRadius {
    /// `diameter² × PROXIMITY_FACTOR`
    pub fn for_diameter(diameter: f32) -> Self {
        Self {
            threshold_sq: diameter * diameter * PROXIMITY_FACTOR,
        }
    }

    #[inline]
    pub fn threshold_sq(&self) -> f32 {
        self.threshold_sq
    }

    /// Strict: a squared distance equal to the threshold is not a match
    #[inline]
    pub fn accepts(&self, dist_sq: f32) -> bool {
        dist_sq < self.threshold_sq
    }

    #[inline]
    pub fn are_neighbors(&self, a: &Ball, b: &Ball) -> bool {
        a.color == b.color && self.accepts(a.pos.distance_squared(b.pos))
    }
}

/// How candidate neighbors are found during resolution.
///
/// Both strategies return identical match sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborSearch {
    /// Compare against every active ball, O(V²)
    #[default]
    Scan,
    /// Bucket same-colored balls into a uniform grid first
    #[serde(alias = "hash", alias = "grid")]
    SpatialHash,
}

impl NeighborSearch {
    pub fn as_str(&self) -> &'static str {
        match self {
            NeighborSearch::Scan => "scan",
            NeighborSearch::SpatialHash => "spatial_hash",
        }
    }
}

/// Balls collected by one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    ids: BTreeSet<BallId>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Returns false if the ball was already matched
    pub fn insert(&mut self, id: BallId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: BallId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Matched ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = BallId> + '_ {
        self.ids.iter().copied()
    }
}

/// Resolve the group reachable from `tapped` into a fresh `MatchSet`
pub fn resolve(
    tapped: BallId,
    balls: &BallStore,
    radius: MatchRadius,
    search: NeighborSearch,
) -> MatchSet {
    let mut matched = MatchSet::new();
    resolve_matches(tapped, balls, radius, search, &mut matched);
    matched
}

/// Grow `matched` with every ball transitively touching `tapped` in its color.
///
/// Callers clear `matched` first; balls already present are treated as
/// visited. A `tapped` id missing from the store leaves `matched` untouched.
pub fn resolve_matches(
    tapped: BallId,
    balls: &BallStore,
    radius: MatchRadius,
    search: NeighborSearch,
    matched: &mut MatchSet,
) {
    let Some(start) = balls.get(tapped) else {
        log::debug!("Tapped ball {} is no longer on the board", tapped);
        return;
    };

    matched.insert(start.id);
    match search {
        NeighborSearch::Scan => flood_scan(start, balls, radius, matched),
        NeighborSearch::SpatialHash => flood_hashed(start, balls, radius, matched),
    }

    log::debug!(
        "Resolved {} {} ball(s) from ball {}",
        matched.len(),
        start.color.as_str(),
        tapped
    );
}

/// Worklist flood fill, rescanning the whole board for each frontier ball
fn flood_scan(start: &Ball, balls: &BallStore, radius: MatchRadius, matched: &mut MatchSet) {
    let mut frontier = vec![start];

    while let Some(current) = frontier.pop() {
        for candidate in balls.iter() {
            if !radius.are_neighbors(current, candidate) {
                continue;
            }
            if matched.insert(candidate.id) {
                frontier.push(candidate);
            }
        }
    }
}

/// Same flood fill, with candidates drawn from neighboring hash cells
fn flood_hashed(start: &Ball, balls: &BallStore, radius: MatchRadius, matched: &mut MatchSet) {
    // Pad the cell so sqrt rounding can't push an in-range pair two cells apart
    let mut hash = SpatialHash::new(radius.threshold_sq().sqrt() * 1.001);
    for ball in balls.iter().filter(|b| b.color == start.color) {
        hash.insert(ball.id, ball.pos);
    }

    let mut frontier = vec![start.pos];
    let mut nearby = Vec::new();

    while let Some(current) = frontier.pop() {
        hash.query_nearby_into(current, &mut nearby);
        for &(id, pos) in &nearby {
            if !radius.accepts(current.distance_squared(pos)) {
                continue;
            }
            if matched.insert(id) {
                frontier.push(pos);
            }
        }
    }
}
