// Placed tiles and the grid-indexed lookup table

use std::collections::HashMap;

use log::info;
use serde::Deserialize;

use super::registry::{TileVariantRegistry, VariantId};
use super::WorldError;
use crate::engine::physics::Rect;

/// A cell on the tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Packed lookup key: x in the high 32 bits, y in the low 32 bits
    pub fn key(&self) -> u64 {
        ((self.x as u32 as u64) << 32) | (self.y as u32 as u64)
    }
}

/// One tile entry in a map file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileData {
    #[serde(rename = "type")]
    pub tile_type: String,
    pub variant: u32,
    pub grid_x: i32,
    pub grid_y: i32,
}

/// Deserialized map file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapData {
    pub tile_size: i32,
    #[serde(default)]
    pub tiles: Vec<TileData>,
}

impl MapData {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A static tile occupying one grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    pub rect: Rect,
    pub variant: VariantId,
    pub cell: GridCell,
}

/// All placed tiles of a level
#[derive(Debug)]
pub struct TileMap {
    tile_size: i32,
    /// Dense storage in map-file order, for render iteration
    tiles: Vec<PlacedTile>,
    /// Packed cell key -> index into `tiles`
    by_cell: HashMap<u64, usize>,
}

impl TileMap {
    /// Build the map. Any unregistered variant aborts the load.
    pub fn from_map_data(data: &MapData, registry: &TileVariantRegistry) -> Result<Self, WorldError> {
        if data.tile_size <= 0 {
            return Err(WorldError::InvalidTileSize(data.tile_size));
        }

        let mut map = Self {
            tile_size: data.tile_size,
            tiles: Vec::with_capacity(data.tiles.len()),
            by_cell: HashMap::with_capacity(data.tiles.len()),
        };

        for tile in &data.tiles {
            let variant = registry.lookup(&tile.tile_type, tile.variant).ok_or_else(|| {
                WorldError::UnregisteredVariant {
                    tile_type: tile.tile_type.clone(),
                    variant: tile.variant,
                }
            })?;
            map.place(GridCell::new(tile.grid_x, tile.grid_y), variant)?;
        }

        info!(
            "Tile map loaded: {} tiles, tile size {}",
            map.tiles.len(),
            map.tile_size
        );
        Ok(map)
    }

    fn place(&mut self, cell: GridCell, variant: VariantId) -> Result<(), WorldError> {
        let key = cell.key();
        if self.by_cell.contains_key(&key) {
            return Err(WorldError::DuplicateCell {
                x: cell.x,
                y: cell.y,
            });
        }

        let size = self.tile_size;
        self.by_cell.insert(key, self.tiles.len());
        self.tiles.push(PlacedTile {
            rect: Rect::new((cell.x * size) as f32, (cell.y * size) as f32, size, size),
            variant,
            cell,
        });
        Ok(())
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// O(1) lookup of the tile in a cell
    pub fn get(&self, cell: GridCell) -> Option<&PlacedTile> {
        self.by_cell
            .get(&cell.key())
            .and_then(|&index| self.tiles.get(index))
    }

    /// Every placed tile, in load order
    pub fn tiles(&self) -> &[PlacedTile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
