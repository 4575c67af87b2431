// Broad phase: the handful of grid tiles near a moving body

use super::body::PhysicsBody;
use crate::core::math::grid_index;
use crate::engine::tilemap::{GridCell, PlacedTile, TileMap};

/// Extra cells scanned on every side of the body's footprint
pub const NEIGHBOR_MARGIN: i32 = 2;

/// Per-tick candidate set for one body
///
/// Rebuilt in place every tick; nothing in here is valid across ticks.
#[derive(Debug, Default)]
pub struct NeighborQuery {
    tiles: Vec<PlacedTile>,
    scanned: Vec<GridCell>,
    intersected: Vec<PlacedTile>,
}

impl NeighborQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every placed tile within the expanded footprint of `body`
    pub fn rebuild(&mut self, body: &PhysicsBody, map: &TileMap) {
        self.tiles.clear();
        self.scanned.clear();
        self.intersected.clear();

        let size = map.tile_size();
        let rect = &body.rect;
        let left = grid_index(rect.left(), size);
        let right = grid_index(rect.right() - 1.0, size);
        let top = grid_index(rect.top(), size);
        let bottom = grid_index(rect.bottom() - 1.0, size);

        for y in (top - NEIGHBOR_MARGIN)..=(bottom + NEIGHBOR_MARGIN) {
            for x in (left - NEIGHBOR_MARGIN)..=(right + NEIGHBOR_MARGIN) {
                let cell = GridCell::new(x, y);
                self.scanned.push(cell);
                if let Some(tile) = map.get(cell) {
                    self.tiles.push(*tile);
                }
            }
        }
    }

    /// Candidate tiles for this tick, in row-major scan order
    pub fn tiles(&self) -> &[PlacedTile] {
        &self.tiles
    }

    /// Every cell visited by the last rebuild, occupied or not
    pub fn scanned(&self) -> &[GridCell] {
        &self.scanned
    }

    /// Tiles the body overlapped during this tick's resolution passes
    pub fn intersected(&self) -> &[PlacedTile] {
        &self.intersected
    }

    /// Split borrow for the resolvers: candidates in, hits out
    pub(crate) fn candidates_and_hits(&mut self) -> (&[PlacedTile], &mut Vec<PlacedTile>) {
        (&self.tiles, &mut self.intersected)
    }
}
