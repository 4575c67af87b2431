// Tile grid: variant registry, map data and the placed-tile lookup table
//
// Tiles are placed once when map data loads and never move, so the map is
// read-only during simulation and can be shared by any number of bodies.

mod map;
mod registry;

pub use map::{GridCell, MapData, PlacedTile, TileData, TileMap};
pub use registry::{TileVariant, TileVariantRegistry, VariantId};

/// Errors raised while building the world from map data
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("Tile variant not registered: {tile_type} variant {variant}")]
    UnregisteredVariant { tile_type: String, variant: u32 },

    #[error("Grid cell ({x}, {y}) already holds a tile")]
    DuplicateCell { x: i32, y: i32 },

    #[error("Invalid tile size: {0}")]
    InvalidTileSize(i32),
}
