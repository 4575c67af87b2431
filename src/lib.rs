// Tile-based platformer simulation core
//
// `engine` holds the reusable pieces (assets, tile grid, collision, input,
// fixed-step clock); `game` builds the player and the scene on top of them.

pub mod core;
pub mod engine;
pub mod game;
