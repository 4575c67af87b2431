// Game layer: characters and the scene that steps them

pub mod characters;
pub mod scene;

pub use scene::Scene;
