// Scene: one shared tile map, any number of players, one fixed-step clock

use std::time::Duration;

use log::info;

use super::characters::{Player, SpriteDraw, WorldPhysics};
use crate::engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use crate::engine::input::InputState;
use crate::engine::tilemap::TileMap;

/// Index of a player inside its scene
pub type PlayerId = usize;

/// Owns the world and steps every player against it
///
/// The map is never mutated after construction; players only read it.
pub struct Scene {
    map: TileMap,
    world: WorldPhysics,
    players: Vec<Player>,
    inputs: Vec<InputState>,
    clock: GameLoop,
}

impl Scene {
    pub fn new(map: TileMap, world: WorldPhysics) -> Self {
        info!("Scene created with {} tiles", map.len());
        Self {
            map,
            world,
            players: Vec::new(),
            inputs: Vec::new(),
            clock: GameLoop::new(),
        }
    }

    /// Add a player, returns its id
    pub fn spawn_player(&mut self, player: Player) -> PlayerId {
        let id = self.players.len();
        let rect = player.rect();
        info!("Player {} spawned at ({}, {})", id, rect.x, rect.y);
        self.players.push(player);
        self.inputs.push(InputState::default());
        id
    }

    /// Set the input a player sees on every tick until changed
    pub fn set_input(&mut self, id: PlayerId, input: InputState) {
        if let Some(slot) = self.inputs.get_mut(id) {
            *slot = input;
        }
    }

    /// Run one fixed tick for every player
    pub fn tick(&mut self, dt: f32) {
        for (player, input) in self.players.iter_mut().zip(&self.inputs) {
            player.update(dt, input, &self.map, &self.world);
            player.update_animation(dt);
        }
    }

    /// Feed one rendered frame's duration; runs the due ticks and refreshes
    /// display positions. Returns the number of ticks run.
    pub fn frame(&mut self, frame_time: Duration) -> u32 {
        let steps = self.clock.advance(frame_time);
        for _ in 0..steps {
            self.tick(FIXED_TIMESTEP);
        }

        let alpha = self.clock.alpha();
        for player in &mut self.players {
            player.update_interpolation(alpha);
        }
        steps
    }

    /// Draw commands for every player in spawn order
    pub fn sprites(&self) -> Vec<SpriteDraw> {
        self.players.iter().map(Player::sprite_draw).collect()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn world(&self) -> &WorldPhysics {
        &self.world
    }

    pub fn clock(&self) -> &GameLoop {
        &self.clock
    }
}
