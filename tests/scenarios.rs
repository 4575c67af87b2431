// End-to-end movement scenarios against hand-built maps

use image::RgbaImage;

use ledge_runner::engine::assets::AssetManager;
use ledge_runner::engine::game_loop::FIXED_TIMESTEP;
use ledge_runner::engine::input::InputState;
use ledge_runner::engine::tilemap::{MapData, TileData, TileMap, TileVariantRegistry, WorldError};
use ledge_runner::game::characters::{
    AnimState, AnimationAsset, AnimationSet, Player, PlayerStats, WallState, WorldPhysics,
};
use ledge_runner::game::Scene;

const DT: f32 = FIXED_TIMESTEP;

struct Fixture {
    assets: AssetManager,
    registry: TileVariantRegistry,
    animations: AnimationSet,
}

impl Fixture {
    fn new() -> Self {
        let mut assets = AssetManager::new("unused");
        let stone = assets
            .insert_texture("tiles/stone/0.png", RgbaImage::new(32, 32))
            .unwrap();
        let mut registry = TileVariantRegistry::new();
        registry.register("stone", 0, stone);

        let mut builder = AnimationSet::builder();
        for state in AnimState::ALL {
            if state == AnimState::WallJump {
                continue;
            }
            let frames = (0..4)
                .map(|i| {
                    assets
                        .insert_texture(
                            &format!("{}/{}.png", state.animation_name(), i),
                            RgbaImage::new(32, 32),
                        )
                        .unwrap()
                })
                .collect();
            let looping = state != AnimState::WallClimb;
            builder = builder.insert(
                state,
                AnimationAsset::new(state.animation_name(), frames, 10.0, looping, (32, 32))
                    .unwrap(),
            );
        }

        Self {
            assets,
            registry,
            animations: builder.build().unwrap(),
        }
    }

    fn map(&self, cells: impl IntoIterator<Item = (i32, i32)>) -> TileMap {
        let data = MapData {
            tile_size: 32,
            tiles: cells
                .into_iter()
                .map(|(grid_x, grid_y)| TileData {
                    tile_type: "stone".to_string(),
                    variant: 0,
                    grid_x,
                    grid_y,
                })
                .collect(),
        };
        TileMap::from_map_data(&data, &self.registry).unwrap()
    }

    fn player(&self, x: f32, y: f32) -> Player {
        Player::new(
            x,
            y,
            30,
            90,
            PlayerStats::default(),
            &WorldPhysics::default(),
            &self.animations,
        )
    }
}

fn step(player: &mut Player, input: &InputState, map: &TileMap) {
    player.update(DT, input, map, &WorldPhysics::default());
    player.update_animation(DT);
}

fn ground(row: i32) -> impl Iterator<Item = (i32, i32)> {
    (0..30).map(move |x| (x, row))
}

fn land(player: &mut Player, map: &TileMap) {
    for _ in 0..400 {
        step(player, &InputState::default(), map);
        if player.on_ground() {
            return;
        }
    }
    panic!("player never landed");
}

fn jump() -> InputState {
    InputState {
        jump_pressed: true,
        ..Default::default()
    }
}

#[test]
fn test_player_settles_on_ground() {
    let fixture = Fixture::new();
    let map = fixture.map(ground(10));
    let mut player = fixture.player(300.0, 50.0);

    for _ in 0..200 {
        step(&mut player, &InputState::default(), &map);
    }

    assert_eq!(player.rect().y, 230.0);
    assert_eq!(player.rect().bottom(), 320.0);
    assert!(player.on_ground());
    assert_eq!(player.velocity().y, 0.0);
    assert_eq!(player.anim_state(), AnimState::Idle);
    assert!(player.neighbors().scanned().len() >= player.neighbors().tiles().len());
}

#[test]
fn test_landing_restores_jumps() {
    let fixture = Fixture::new();
    let map = fixture.map(ground(10));
    let mut player = fixture.player(300.0, 50.0);
    land(&mut player, &map);

    for _ in 0..2 {
        step(&mut player, &jump(), &map);
        assert_eq!(player.remaining_jumps(), 1);
        assert!(player.velocity().y < 0.0);
        land(&mut player, &map);
        assert_eq!(player.remaining_jumps(), 2);
    }
}

#[test]
fn test_third_jump_in_air_is_ignored() {
    let fixture = Fixture::new();
    let map = fixture.map(ground(10));
    let mut player = fixture.player(300.0, 50.0);
    land(&mut player, &map);

    step(&mut player, &jump(), &map);
    step(&mut player, &InputState::default(), &map);
    step(&mut player, &jump(), &map);
    assert_eq!(player.remaining_jumps(), 0);
    assert!(player.velocity().y < -300.0);

    for _ in 0..20 {
        step(&mut player, &InputState::default(), &map);
    }
    let before = player.velocity().y;
    step(&mut player, &jump(), &map);
    assert_eq!(player.remaining_jumps(), 0);
    assert!(player.velocity().y > before);
}

#[test]
fn test_wall_hold_then_slide() {
    let fixture = Fixture::new();
    let map = fixture.map((0..=20).map(|y| (12, y)));
    let mut player = fixture.player(350.0, 100.0);
    let push_right = InputState {
        moving_right: true,
        ..Default::default()
    };

    let mut held_ticks = 0;
    let mut slid = false;
    for _ in 0..90 {
        step(&mut player, &push_right, &map);
        match player.wall_state() {
            WallState::Holding => {
                held_ticks += 1;
                assert!(player.holding_wall_timer() < 0.5);
                assert_eq!(player.velocity().y, 0.0);
                assert_eq!(player.anim_state(), AnimState::WallContact);
            }
            WallState::Sliding => {
                slid = true;
                assert!(player.holding_wall_timer() >= 0.5);
                assert!(player.velocity().y <= 80.0);
                assert_eq!(player.anim_state(), AnimState::WallSlide);
            }
            _ => assert!(!slid, "lost the wall while sliding"),
        }
    }

    assert!(held_ticks >= 28);
    assert!(slid);
    assert_eq!(player.rect().right(), 384.0);
}

#[test]
fn test_ledge_climb_snaps_on_top() {
    let fixture = Fixture::new();
    let map = fixture.map((8..=20).map(|y| (12, y)));
    let mut player = fixture.player(353.0, 275.0);
    let push_right = InputState {
        moving_right: true,
        ..Default::default()
    };

    step(&mut player, &push_right, &map);
    assert_eq!(player.wall_state(), WallState::Climbing);
    assert!(player.is_input_blocked());
    assert_eq!(player.anim_state(), AnimState::WallClimb);

    let frozen = player.rect().x;
    let mut ticks = 1;
    while player.is_climbing() && ticks < 120 {
        step(&mut player, &push_right, &map);
        ticks += 1;
        if player.is_climbing() {
            assert_eq!(player.rect().x, frozen);
            assert_eq!(player.velocity().y, 0.0);
        }
    }

    assert!(!player.is_climbing());
    assert!((59..=61).contains(&ticks), "climb took {} ticks", ticks);
    assert_eq!(player.rect().bottom(), 256.0);
    assert_eq!(player.rect().x, 394.0);
    assert!(player.on_ground());
    assert_eq!(player.wall_state(), WallState::None);
    assert!(!player.is_input_blocked());
    assert_eq!(player.anim_state(), AnimState::Idle);
    assert_eq!(player.animator().active().current_frame(), 0);

    // standing on the ledge afterwards
    step(&mut player, &InputState::default(), &map);
    assert!(player.on_ground());
    assert_eq!(player.rect().bottom(), 256.0);
}

#[test]
fn test_ledge_climb_facing_left_mirrors_snap() {
    let fixture = Fixture::new();
    let map = fixture.map((8..=20).map(|y| (5, y)));
    let mut player = fixture.player(193.0, 275.0);
    let push_left = InputState {
        moving_left: true,
        ..Default::default()
    };

    step(&mut player, &push_left, &map);
    assert_eq!(player.wall_state(), WallState::Climbing);
    assert!(!player.facing_right());

    for _ in 0..120 {
        if !player.is_climbing() {
            break;
        }
        step(&mut player, &push_left, &map);
    }

    assert!(!player.is_climbing());
    // tile right edge (192) minus the snap offset
    assert_eq!(player.rect().x, 182.0);
    assert_eq!(player.rect().bottom(), 256.0);
    assert!(player.on_ground());
    assert_eq!(player.anim_state(), AnimState::Idle);
}

#[test]
fn test_scene_steps_players_independently() {
    let fixture = Fixture::new();
    let mut scene = Scene::new(fixture.map(ground(10)), WorldPhysics::default());
    let walker = scene.spawn_player(fixture.player(100.0, 50.0));
    let jumper = scene.spawn_player(fixture.player(600.0, 50.0));

    for _ in 0..120 {
        scene.tick(DT);
    }
    scene.set_input(
        walker,
        InputState {
            moving_right: true,
            sprinting: true,
            ..Default::default()
        },
    );
    scene.set_input(jumper, jump());
    scene.tick(DT);

    let walker = scene.player(walker).unwrap();
    let jumper = scene.player(jumper).unwrap();
    assert!(walker.on_ground());
    assert_eq!(walker.anim_state(), AnimState::Run);
    assert!(!jumper.on_ground());
    assert_eq!(jumper.remaining_jumps(), 1);
}

#[test]
fn test_unregistered_variant_is_rejected() {
    let fixture = Fixture::new();
    let data = MapData::from_json(
        r#"{"tileSize":32,"tiles":[{"type":"lava","variant":1,"gridX":0,"gridY":0}]}"#,
    )
    .unwrap();

    let err = TileMap::from_map_data(&data, &fixture.registry).unwrap_err();
    assert!(matches!(err, WorldError::UnregisteredVariant { .. }));
    assert_eq!(fixture.assets.stats().texture_count, 1 + 9 * 4);
}
