// Engine modules: assets, input, physics, tile grid, loop timing

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod tilemap;
