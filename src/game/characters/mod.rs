// Character system
//
// Everything a playable body needs on top of the engine:
// - Tuning constants for the world and the player
// - Wall and animation state
// - Frame animation assets and playback
// - The player entity and its per-tick update

pub mod animation;
pub mod player;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{
    AnimationAsset, AnimationError, AnimationPlayer, AnimationSet, AnimationSetBuilder, Animator,
    RenderOffset,
};
pub use player::{Player, SpriteDraw};
pub use state::{AnimState, AnimationStateMachine, MovementFlags, WallState};
pub use stats::{PlayerStats, WorldPhysics, BASE_STATS, BASE_WORLD};
