//! Uniform grid spatial hash for neighbor queries

use std::collections::HashMap;

use glam::Vec2;

use super::state::BallId;

/// Buckets points into square cells of `cell_size`.
///
/// Any two points closer than `cell_size` land in the same or adjacent cells,
/// so a 3×3 query around a point covers every neighbor within that range.
#[derive(Debug, Clone)]
pub struct SpatialHash {
    inv_cell_size: f32,
    cells: HashMap<(i32, i32), Vec<(BallId, Vec2)>>,
}

impl SpatialHash {
    pub fn new(cell_size: f32) -> Self {
        Self {
            inv_cell_size: 1.0 / cell_size.max(1e-3),
            cells: HashMap::new(),
        }
    }

    #[inline]
    fn cell_of(&self, pos: Vec2) -> (i32, i32) {
        let cell = (pos * self.inv_cell_size).floor();
        (cell.x as i32, cell.y as i32)
    }

    pub fn insert(&mut self, id: BallId, pos: Vec2) {
        let cell = self.cell_of(pos);
        self.cells.entry(cell).or_default().push((id, pos));
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.values().all(Vec::is_empty)
    }

    /// Fill `out` with every entry in the 3×3 block of cells around `pos`.
    /// Callers still apply their exact distance test.
    pub fn query_nearby_into(&self, pos: Vec2, out: &mut Vec<(BallId, Vec2)>) {
        out.clear();
        let (cx, cy) = self.cell_of(pos);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(bucket) = self.cells.get(&(cx.saturating_add(dx), cy.saturating_add(dy))) {
                    out.extend_from_slice(bucket);
                }
            }
        }
    }
}
