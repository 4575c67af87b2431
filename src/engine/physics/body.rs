// Physics body: a rectangle plus the bookkeeping needed for collision and interpolation

use glam::Vec2;

use super::rect::Rect;
use crate::core::math::{grid_index, lerp};
use crate::engine::tilemap::GridCell;

/// A rectangle that moves through the world
///
/// `prev` holds the position at the start of the current axis step and is
/// used both to infer collision direction and as the interpolation origin.
#[derive(Debug, Clone)]
pub struct PhysicsBody {
    pub rect: Rect,
    pub prev: Vec2,
    display: Vec2,
    grid: GridCell,
}

impl PhysicsBody {
    pub fn new(x: f32, y: f32, width: i32, height: i32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            prev: Vec2::new(x, y),
            display: Vec2::new(x, y),
            grid: GridCell::new(0, 0),
        }
    }

    /// Current position (top-left corner)
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.rect.x, self.rect.y)
    }

    /// Teleport the body, leaving no interpolation trail
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.rect.x = x;
        self.rect.y = y;
        self.prev = Vec2::new(x, y);
        self.display = self.prev;
    }

    /// Interpolated position for rendering
    pub fn display_position(&self) -> Vec2 {
        self.display
    }

    /// Grid cell containing the body's center, as of the last `update_grid_pos`
    pub fn grid_cell(&self) -> GridCell {
        self.grid
    }

    pub fn update_grid_pos(&mut self, tile_size: i32) {
        self.grid = GridCell::new(
            grid_index(self.rect.center_x(), tile_size),
            grid_index(self.rect.center_y(), tile_size),
        );
    }

    /// Blend between the previous and current tick positions
    pub fn interpolate(&mut self, alpha: f32) {
        self.display = Vec2::new(
            lerp(self.prev.x, self.rect.x, alpha),
            lerp(self.prev.y, self.rect.y, alpha),
        );
    }
}
