// Asset management system
//
// Decodes and caches images and map files. The manager is an explicit value
// owned by the application and handed to whatever needs it at load time.

mod handle;
mod loader;
mod manager;

pub use handle::{AssetHandle, AssetId, TextureAsset, TextureHandle};
pub use loader::{AssetLoader, AssetType};
pub use manager::{AssetManager, AssetStats, SheetLayout};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset already loaded: {0}")]
    AlreadyLoaded(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to parse map: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
