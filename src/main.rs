use std::time::Duration;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use log::{info, warn};

use ledge_runner::engine::assets::{AssetManager, AssetType};
use ledge_runner::engine::game_loop::FIXED_TIMESTEP;
use ledge_runner::engine::input::{Action, PlayerInput};
use ledge_runner::engine::tilemap::{MapData, TileData, TileMap, TileVariantRegistry};
use ledge_runner::game::characters::{
    AnimState, AnimationAsset, AnimationSet, Player, PlayerStats, WorldPhysics,
};
use ledge_runner::game::Scene;

const MAP_NAME: &str = "level1.json";
const PLAYER_SIZE: (i32, i32) = (30, 90);

/// Frame folder, frame count, fps and looping per animation state
const PLAYER_ANIMATIONS: [(AnimState, &str, usize, f32, bool); 9] = [
    (AnimState::Idle, "player/idle", 4, 8.0, true),
    (AnimState::Walk, "player/walk", 8, 12.0, true),
    (AnimState::Run, "player/run", 8, 16.0, true),
    (AnimState::JumpStart, "player/jump_start", 2, 10.0, false),
    (AnimState::JumpTransition, "player/jump_transition", 2, 10.0, false),
    (AnimState::JumpFall, "player/jump_fall", 2, 10.0, true),
    (AnimState::WallContact, "player/wall_contact", 2, 8.0, false),
    (AnimState::WallSlide, "player/wall_slide", 2, 8.0, true),
    (AnimState::WallClimb, "player/wall_climb", 6, 6.0, false),
];

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let asset_root = std::env::args().nth(1).unwrap_or_else(|| "assets".to_string());
    info!("Starting Ledge Runner (assets: {})", asset_root);

    let mut assets = AssetManager::new(&asset_root);
    let map = load_map(&mut assets)?;
    let animations = load_animations(&mut assets)?;
    info!("Assets ready: {} textures", assets.stats().texture_count);

    let world = WorldPhysics::default();
    let mut scene = Scene::new(map, world);
    let player = Player::new(
        300.0,
        50.0,
        PLAYER_SIZE.0,
        PLAYER_SIZE.1,
        PlayerStats::default(),
        &world,
        &animations,
    );
    let id = scene.spawn_player(player);

    // Scripted run: settle, walk right, sprint-jump, then idle
    let mut input = PlayerInput::new(id);
    let frame_time = Duration::from_secs_f32(FIXED_TIMESTEP);
    for frame in 0..600u32 {
        match frame {
            60 => input.press(Action::MoveRight),
            180 => input.press(Action::Sprint),
            200 | 240 => input.press(Action::Jump),
            210 | 250 => input.release(Action::Jump),
            360 => input.reset(),
            _ => {}
        }
        scene.set_input(id, input.snapshot());
        scene.frame(frame_time);

        if frame % 60 == 0 {
            if let Some(player) = scene.player(id) {
                let pos = player.display_position();
                info!(
                    "t={:.1}s pos=({:.1}, {:.1}) vy={:.1} anim={} ground={} wall={:?}",
                    frame as f32 * FIXED_TIMESTEP,
                    pos.x,
                    pos.y,
                    player.velocity().y,
                    player.anim_state().animation_name(),
                    player.on_ground(),
                    player.wall_state()
                );
            }
        }
    }

    info!(
        "Finished after {} ticks over {} frames",
        scene.clock().update_count(),
        scene.clock().frame_count()
    );
    Ok(())
}

/// Load the level from disk, or the built-in demo level when no map file exists
///
/// Tile variants are registered only from images present under `textures/tiles/`,
/// so a map naming a variant without an image fails to load.
fn load_map(assets: &mut AssetManager) -> Result<TileMap> {
    let mut registry = TileVariantRegistry::new();
    let data = if assets.asset_exists(AssetType::Map, MAP_NAME) {
        let data = assets.load_map(MAP_NAME)?;
        register_tile_images(assets, &mut registry, &data)?;
        data
    } else {
        warn!("{} not found, using the built-in demo level", MAP_NAME);
        let image = assets.insert_texture("builtin/grass", demo_tile(32))?;
        registry.register("grass", 0, image);
        demo_map()
    };

    let map = TileMap::from_map_data(&data, &registry).context("building tile map")?;
    info!("Map loaded: {} tiles of {}px", map.len(), map.tile_size());
    Ok(map)
}

fn register_tile_images(
    assets: &mut AssetManager,
    registry: &mut TileVariantRegistry,
    data: &MapData,
) -> Result<()> {
    for tile in &data.tiles {
        if registry.lookup(&tile.tile_type, tile.variant).is_some() {
            continue;
        }
        let name = format!("tiles/{}/{}.png", tile.tile_type, tile.variant);
        if assets.asset_exists(AssetType::Texture, &name) {
            let image = assets.load_texture(&name)?;
            registry.register(&tile.tile_type, tile.variant, image);
        }
    }
    Ok(())
}

/// Ground strip with a ledge column to climb
fn demo_map() -> MapData {
    let ground = (0..40).map(|x| (x, 10));
    let ledge = (8..10).map(|y| (20, y));
    MapData {
        tile_size: 32,
        tiles: ground
            .chain(ledge)
            .map(|(grid_x, grid_y)| TileData {
                tile_type: "grass".to_string(),
                variant: 0,
                grid_x,
                grid_y,
            })
            .collect(),
    }
}

/// Load every player animation; any missing or undecodable frame aborts
fn load_animations(assets: &mut AssetManager) -> Result<AnimationSet> {
    let mut builder = AnimationSet::builder();
    for (state, folder, count, fps, looping) in PLAYER_ANIMATIONS {
        let asset = AnimationAsset::from_folder(assets, folder, count, fps, looping)
            .with_context(|| format!("loading {} animation from {}", state.animation_name(), folder))?;
        builder = builder.insert(state, asset);
    }
    Ok(builder.build()?)
}

fn demo_tile(size: u32) -> RgbaImage {
    RgbaImage::from_pixel(size, size, Rgba([86, 160, 64, 255]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledge_runner::engine::assets::AssetError;
    use ledge_runner::engine::tilemap::WorldError;
    use std::path::Path;

    fn write_map(root: &Path, json: &str) {
        let maps = root.join("maps");
        std::fs::create_dir_all(&maps).unwrap();
        std::fs::write(maps.join(MAP_NAME), json).unwrap();
    }

    fn write_png(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::new(32, 32).save(path).unwrap();
    }

    const LAVA_MAP: &str =
        r#"{"tileSize":32,"tiles":[{"type":"lava","variant":7,"gridX":0,"gridY":0}]}"#;

    #[test]
    fn test_tile_without_image_aborts_map_load() {
        let dir = tempfile::tempdir().unwrap();
        write_map(dir.path(), LAVA_MAP);

        let mut assets = AssetManager::new(dir.path());
        let err = load_map(&mut assets).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WorldError>(),
            Some(WorldError::UnregisteredVariant { variant: 7, .. })
        ));
    }

    #[test]
    fn test_tile_with_image_loads() {
        let dir = tempfile::tempdir().unwrap();
        write_map(dir.path(), LAVA_MAP);
        write_png(&dir.path().join("textures/tiles/lava/7.png"));

        let mut assets = AssetManager::new(dir.path());
        let map = load_map(&mut assets).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_builtin_level_without_map_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut assets = AssetManager::new(dir.path());
        let map = load_map(&mut assets).unwrap();
        assert_eq!(map.len(), 42);
    }

    #[test]
    fn test_missing_animation_frames_abort_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut assets = AssetManager::new(dir.path());

        let err = load_animations(&mut assets).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AssetError>(),
            Some(AssetError::NotFound(_))
        ));
        assert!(format!("{:#}", err).contains("player/idle"));
    }

    #[test]
    fn test_complete_animation_folders_load() {
        let dir = tempfile::tempdir().unwrap();
        for (_, folder, count, _, _) in PLAYER_ANIMATIONS {
            for i in 1..=count {
                write_png(&dir.path().join(format!("textures/{}/{}.png", folder, i)));
            }
        }

        let mut assets = AssetManager::new(dir.path());
        let set = load_animations(&mut assets).unwrap();
        assert_eq!(set.get(AnimState::WallClimb).frame_count(), 6);
        assert_eq!(set.get(AnimState::WallJump).name, "player/jump_start");
    }
}
