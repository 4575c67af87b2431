// Central asset management system

use super::{AssetError, AssetHandle, AssetId, AssetLoader, AssetType, TextureHandle};
use crate::engine::tilemap::MapData;
use anyhow::Result;
use image::RgbaImage;
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

/// Bottom margin left under the sprite inside each sprite-sheet cell
const SHEET_BOTTOM_MARGIN: u32 = 16;

/// Layout of a horizontal sprite sheet: one frame per `canvas` cell,
/// the sprite centred horizontally and sitting `SHEET_BOTTOM_MARGIN` above the cell bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub sprite_width: u32,
    pub sprite_height: u32,
    pub frame_count: u32,
}

impl SheetLayout {
    /// Top-left pixel of a frame inside the sheet
    pub fn frame_origin(&self, index: u32) -> Option<(u32, u32)> {
        let x_offset = self.canvas_width.checked_sub(self.sprite_width)? / 2;
        let y_offset = self
            .canvas_height
            .checked_sub(SHEET_BOTTOM_MARGIN + self.sprite_height)?;
        Some((index * self.canvas_width + x_offset, y_offset))
    }
}

/// Asset provider owned by the application and passed into world construction
///
/// Holds decoded images keyed by handle. There is no global instance.
pub struct AssetManager {
    /// Asset loader
    loader: AssetLoader,

    /// Decoded images
    textures: HashMap<AssetId, RgbaImage>,

    /// Path to ID mapping for textures
    texture_paths: HashMap<String, AssetId>,
}

impl AssetManager {
    /// Create a new asset manager
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            textures: HashMap::new(),
            texture_paths: HashMap::new(),
        }
    }

    /// Load and decode an image from disk
    pub fn load_texture(&mut self, name: &str) -> Result<TextureHandle> {
        // Check if already loaded
        if let Some(&id) = self.texture_paths.get(name) {
            return Ok(AssetHandle::new(id));
        }

        let bytes = self.loader.load_bytes(AssetType::Texture, name)?;
        let image = image::load_from_memory(&bytes)
            .map_err(AssetError::Decode)?
            .to_rgba8();
        debug!("Decoded {} ({}x{})", name, image.width(), image.height());

        Ok(self.store(name, image))
    }

    /// Register an already-decoded image under a name
    pub fn insert_texture(&mut self, name: &str, image: RgbaImage) -> Result<TextureHandle> {
        if self.texture_paths.contains_key(name) {
            return Err(AssetError::AlreadyLoaded(name.to_string()).into());
        }
        Ok(self.store(name, image))
    }

    fn store(&mut self, name: &str, image: RgbaImage) -> TextureHandle {
        let id = AssetId::from_path(name);
        self.textures.insert(id, image);
        self.texture_paths.insert(name.to_string(), id);
        AssetHandle::new(id)
    }

    /// Load numbered frames `folder/1.png ..= folder/<count>.png`
    pub fn load_frame_folder(&mut self, folder: &str, count: usize) -> Result<Vec<TextureHandle>> {
        if count == 0 {
            return Err(AssetError::LoadError(format!("{}: frame count is zero", folder)).into());
        }

        let frames = (1..=count)
            .map(|i| self.load_texture(&format!("{}/{}.png", folder, i)))
            .collect::<Result<Vec<_>>>()?;

        info!("Loaded {} frames from {}", frames.len(), folder);
        Ok(frames)
    }

    /// Slice a horizontal sprite sheet into individual frames
    pub fn load_sprite_sheet(&mut self, name: &str, layout: SheetLayout) -> Result<Vec<TextureHandle>> {
        let sheet = self.load_texture(name)?;
        let sheet_image = self
            .get_texture(sheet)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))?
            .clone();

        let mut frames = Vec::with_capacity(layout.frame_count as usize);
        for index in 0..layout.frame_count {
            let (x, y) = layout.frame_origin(index).ok_or_else(|| {
                AssetError::LoadError(format!("{}: sprite larger than its canvas", name))
            })?;
            if x + layout.sprite_width > sheet_image.width()
                || y + layout.sprite_height > sheet_image.height()
            {
                return Err(AssetError::LoadError(format!(
                    "{}: frame {} lies outside the {}x{} sheet",
                    name,
                    index,
                    sheet_image.width(),
                    sheet_image.height()
                ))
                .into());
            }

            let frame = image::imageops::crop_imm(
                &sheet_image,
                x,
                y,
                layout.sprite_width,
                layout.sprite_height,
            )
            .to_image();
            frames.push(self.store(&format!("{}#{}", name, index), frame));
        }

        info!("Sliced {} frames from {}", frames.len(), name);
        Ok(frames)
    }

    /// Read and parse a map file
    pub fn load_map(&self, name: &str) -> Result<MapData> {
        let json = self.loader.load_string(AssetType::Map, name)?;
        let data = MapData::from_json(&json).map_err(AssetError::Parse)?;
        info!("Map {} parsed: {} tiles", name, data.tiles.len());
        Ok(data)
    }

    /// Get a decoded image by handle
    pub fn get_texture(&self, handle: TextureHandle) -> Option<&RgbaImage> {
        self.textures.get(&handle.id())
    }

    /// Pixel size of a decoded image
    pub fn texture_size(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        self.get_texture(handle).map(|image| image.dimensions())
    }

    /// List all available assets of a given type
    pub fn list_assets(&self, asset_type: AssetType) -> Result<Vec<String>> {
        self.loader.list_assets(asset_type)
    }

    /// Check if an asset exists
    pub fn asset_exists(&self, asset_type: AssetType, name: &str) -> bool {
        self.loader.exists(asset_type, name)
    }

    /// Get statistics about loaded assets
    pub fn stats(&self) -> AssetStats {
        AssetStats {
            texture_count: self.textures.len(),
        }
    }

    /// Get the asset loader
    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }
}

/// Statistics about loaded assets
#[derive(Debug, Clone, Copy)]
pub struct AssetStats {
    pub texture_count: usize,
}
