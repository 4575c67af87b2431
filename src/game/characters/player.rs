// Player entity: movement, collision and wall interaction
//
// Per tick: input -> vertical regime -> broad phase -> X move + resolve ->
// Y move in two half-steps + resolve -> wall state -> air time.

use glam::Vec2;
use log::{debug, trace};

use super::animation::{AnimationSet, Animator, RenderOffset};
use super::state::{AnimState, MovementFlags, WallState};
use super::stats::{PlayerStats, WorldPhysics};
use crate::engine::assets::TextureHandle;
use crate::engine::input::InputState;
use crate::engine::physics::{resolve_x, resolve_y, NeighborQuery, PhysicsBody, Rect};
use crate::engine::tilemap::{GridCell, PlacedTile, TileMap};

/// Where and how to draw the player's current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub frame: TextureHandle,
    pub x: f32,
    pub y: f32,
    pub width: i32,
    pub height: i32,
    /// Mirror horizontally (player faces left)
    pub flip_x: bool,
}

/// A player-controlled body
#[derive(Debug)]
pub struct Player {
    body: PhysicsBody,
    stats: PlayerStats,

    /// `x` is the run speed magnitude, `y` the signed vertical speed (down is positive)
    velocity: Vec2,
    speed_factor: f32,
    fall_factor: f32,
    terminal_velocity: f32,
    jump_transition_velocity: f32,

    // Movement flags
    is_moving: bool,
    facing_right: bool,
    sprinting: bool,
    on_ground: bool,
    on_air: bool,
    on_jump_transition: bool,
    is_jumping: bool,
    is_falling: bool,
    is_touching_side_wall: bool,

    // Wall interaction
    wall_state: WallState,
    holding_wall_timer: f32,
    climb_timer: f32,
    is_climbing: bool,
    climb_target: Option<PlacedTile>,
    blocking_input: bool,

    // Jumping
    remaining_jumps: u8,
    jump_handled: bool,
    air_time_frames: u32,

    neighbors: NeighborQuery,

    // Animation
    animator: Animator,
    lock_animation: bool,
    render_offset: RenderOffset,
}

impl Player {
    pub fn new(
        x: f32,
        y: f32,
        width: i32,
        height: i32,
        stats: PlayerStats,
        world: &WorldPhysics,
        animations: &AnimationSet,
    ) -> Self {
        let mut player = Self {
            body: PhysicsBody::new(x, y, width, height),
            velocity: Vec2::new(stats.run_speed, 0.0),
            speed_factor: 1.0,
            fall_factor: 1.0,
            terminal_velocity: stats.terminal_velocity(world),
            jump_transition_velocity: stats.jump_transition_velocity(world),
            remaining_jumps: stats.max_jumps,
            stats,

            is_moving: false,
            facing_right: true,
            sprinting: false,
            on_ground: false,
            on_air: false,
            on_jump_transition: false,
            is_jumping: false,
            is_falling: false,
            is_touching_side_wall: false,

            wall_state: WallState::None,
            holding_wall_timer: 0.0,
            climb_timer: 0.0,
            is_climbing: false,
            climb_target: None,
            blocking_input: false,

            jump_handled: false,
            air_time_frames: 0,

            neighbors: NeighborQuery::new(),

            animator: Animator::new(animations),
            lock_animation: false,
            render_offset: RenderOffset::default(),
        };
        player.update_render_offset();
        player
    }

    /// Advance the simulation by one fixed tick
    pub fn update(&mut self, dt: f32, input: &InputState, map: &TileMap, world: &WorldPhysics) {
        let direction = input.direction();
        self.apply_input(input);
        self.classify_vertical();

        let tile_size = map.tile_size();
        self.body.update_grid_pos(tile_size);
        self.neighbors.rebuild(&self.body, map);

        // Horizontal always precedes vertical
        self.body.prev.x = self.body.rect.x;
        self.body.rect.x += self.velocity.x * self.speed_factor * direction as f32 * dt;
        let (candidates, hits) = self.neighbors.candidates_and_hits();
        self.is_touching_side_wall = resolve_x(&mut self.body, candidates, hits);

        // Vertical, first half-step with the velocity at tick start
        self.body.prev.y = self.body.rect.y;
        if self.wall_state == WallState::Climbing {
            self.velocity.y = 0.0;
        }
        self.body.rect.y += self.velocity.y * dt / 2.0;
        self.resolve_vertical();

        // Second half-step with the velocity at tick end
        self.on_ground = false;
        let gravity = world.gravity * self.fall_factor * self.stats.gravity_factor;
        self.velocity.y = (self.velocity.y + gravity * dt).min(self.terminal_velocity);
        if self.wall_state == WallState::Climbing {
            self.velocity.y = 0.0;
        }
        self.body.rect.y += self.velocity.y * dt / 2.0;
        self.resolve_vertical();

        if self.update_wall_state(dt, tile_size) {
            return;
        }

        if self.on_ground {
            self.air_time_frames = 0;
            self.on_air = false;
        } else {
            self.air_time_frames += 1;
            self.on_air = true;
        }
        self.body.update_grid_pos(tile_size);
    }

    fn apply_input(&mut self, input: &InputState) {
        self.sprinting = input.sprinting;

        if self.blocking_input {
            self.speed_factor = 0.0;
            // a press during a blocked stretch is dropped, not deferred
            self.jump_handled = input.jump_pressed;
            return;
        }

        match input.direction() {
            1 => {
                self.is_moving = true;
                self.facing_right = true;
            }
            -1 => {
                self.is_moving = true;
                self.facing_right = false;
            }
            _ => self.is_moving = false,
        }

        if !input.jump_pressed {
            self.jump_handled = false;
        } else if !self.jump_handled {
            self.jump_handled = true;
            if self.remaining_jumps > 0 {
                self.jump();
            } else {
                trace!("Jump ignored: no jumps left");
            }
        }

        self.speed_factor = if input.sprinting {
            self.stats.sprint_multiplier
        } else {
            1.0
        };
    }

    fn jump(&mut self) {
        self.remaining_jumps = self.remaining_jumps.saturating_sub(1);
        self.on_ground = false;
        self.is_jumping = true;
        self.velocity.y = -self.stats.jump_velocity;
        debug!("Jump ({} left)", self.remaining_jumps);
    }

    fn classify_vertical(&mut self) {
        self.on_jump_transition = self.velocity.y.abs() < self.jump_transition_velocity
            && self.wall_state == WallState::None;
        self.is_jumping = self.velocity.y < 0.0 && !self.on_jump_transition;
        self.is_falling = self.velocity.y > 0.0 && !self.on_jump_transition;
        self.fall_factor = if self.is_falling {
            self.stats.fall_multiplier
        } else {
            1.0
        };
    }

    fn resolve_vertical(&mut self) {
        let (candidates, hits) = self.neighbors.candidates_and_hits();
        let contact = resolve_y(&mut self.body, &mut self.velocity.y, candidates, hits);
        self.on_ground = contact.grounded;
        if contact.grounded {
            self.remaining_jumps = self.stats.max_jumps;
        }
    }

    /// Returns true when a climb finished this tick and the update must stop
    fn update_wall_state(&mut self, dt: f32, tile_size: i32) -> bool {
        if self.wall_state != WallState::Climbing && self.can_wall_climb() {
            if let Some(target) = self.topmost_wall_tile() {
                debug!("Climb started onto tile {:?}", target.cell);
                self.is_climbing = true;
                self.climb_target = Some(target);
            }
        }

        if self.is_climbing {
            self.blocking_input = true;
            self.wall_state = WallState::Climbing;
            self.climb_timer += dt;

            if self.climb_timer >= self.stats.climb_duration {
                if let Some(target) = self.climb_target.take() {
                    self.finish_climb(target);
                    return true;
                }
            }
        } else if self.can_wall_interact(tile_size) {
            if self.wall_state == WallState::None {
                debug!("Wall hold");
                self.wall_state = WallState::Holding;
                self.holding_wall_timer = 0.0;
                self.climb_timer = 0.0;
            }

            self.holding_wall_timer += dt;
            if self.holding_wall_timer < self.stats.wall_hold_duration {
                self.velocity.y = 0.0;
            } else {
                if self.wall_state != WallState::Sliding {
                    debug!("Wall slide");
                }
                self.wall_state = WallState::Sliding;
                self.velocity.y = self.velocity.y.min(self.stats.wall_slide_speed);
            }
        } else {
            self.wall_state = WallState::None;
            self.holding_wall_timer = 0.0;
            self.climb_timer = 0.0;
        }

        false
    }

    /// Snap on top of the ledge and hand control back
    fn finish_climb(&mut self, target: PlacedTile) {
        let offset = self.stats.climb_snap_offset;
        let x = if self.facing_right {
            target.rect.left() + offset
        } else {
            target.rect.right() - offset
        };
        let y = target.rect.top() - self.body.rect.height() as f32;
        self.body.set_position(x, y);

        self.velocity.y = 0.0;
        self.wall_state = WallState::None;
        self.is_touching_side_wall = false;
        self.on_ground = true;
        self.on_air = false;
        self.air_time_frames = 0;
        self.is_climbing = false;
        self.blocking_input = false;
        self.climb_timer = 0.0;
        self.holding_wall_timer = 0.0;

        self.animator.force(AnimState::Idle);
        self.lock_animation = true;
        debug!("Climb finished at ({}, {})", x, y);
    }

    /// Highest candidate tile on the side the player faces
    fn topmost_wall_tile(&self) -> Option<PlacedTile> {
        let x = self.body.rect.x;
        let mut best: Option<PlacedTile> = None;

        for tile in self.neighbors.tiles() {
            let ahead = if self.facing_right {
                tile.rect.x > x
            } else {
                tile.rect.x < x
            };
            if ahead && best.map_or(true, |b| tile.rect.y < b.rect.y) {
                best = Some(*tile);
            }
        }

        best
    }

    fn can_wall_climb(&self) -> bool {
        if !self.is_touching_side_wall || self.on_ground {
            return false;
        }
        let (low, high) = self.stats.climb_band;
        let y = self.body.rect.y;
        self.topmost_wall_tile()
            .is_some_and(|top| y >= top.rect.y + low && y <= top.rect.y + high)
    }

    fn can_wall_interact(&self, tile_size: i32) -> bool {
        if !self.is_touching_side_wall || self.on_ground {
            return false;
        }
        let y = self.body.rect.y;
        self.topmost_wall_tile()
            .is_some_and(|top| top.rect.y <= y - tile_size as f32)
    }

    /// Blend the display position between the last two ticks
    pub fn update_interpolation(&mut self, alpha: f32) {
        self.body.interpolate(alpha);
    }

    /// Derive the animation state from this tick's physics and advance it
    pub fn update_animation(&mut self, dt: f32) {
        if self.lock_animation {
            self.animator.restart_and_sample(dt);
            self.lock_animation = false;
        } else {
            let next = self.movement_flags().animation_state();
            self.animator.update(next, dt);
        }
        self.update_render_offset();
    }

    fn update_render_offset(&mut self) {
        let asset = self.animator.active().asset();
        self.render_offset = RenderOffset::for_body(
            (self.body.rect.width(), self.body.rect.height()),
            asset.sprite_size,
            self.stats.sprite_scale,
            asset.render_offset,
        );
    }

    pub fn movement_flags(&self) -> MovementFlags {
        MovementFlags {
            wall_state: self.wall_state,
            on_air: self.on_air,
            on_jump_transition: self.on_jump_transition,
            is_jumping: self.is_jumping,
            is_moving: self.is_moving,
            sprinting: self.sprinting,
        }
    }

    /// Draw rect for the current frame; the offset is mirrored about the body when facing left
    pub fn sprite_draw(&self) -> SpriteDraw {
        let display = self.body.display_position();
        let offset = self.render_offset;
        let x = if self.facing_right {
            display.x + offset.x as f32
        } else {
            display.x + (self.body.rect.width() - offset.x - offset.w) as f32
        };

        SpriteDraw {
            frame: self.active_frame(),
            x,
            y: display.y + offset.y as f32,
            width: offset.w,
            height: offset.h,
            flip_x: !self.facing_right,
        }
    }

    /// Teleport (spawn/respawn) with zero vertical speed
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.body.set_position(x, y);
        self.velocity.y = 0.0;
    }

    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    pub fn body(&self) -> &PhysicsBody {
        &self.body
    }

    pub fn display_position(&self) -> Vec2 {
        self.body.display_position()
    }

    pub fn grid_cell(&self) -> GridCell {
        self.body.grid_cell()
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn on_air(&self) -> bool {
        self.on_air
    }

    pub fn air_time_frames(&self) -> u32 {
        self.air_time_frames
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn is_falling(&self) -> bool {
        self.is_falling
    }

    pub fn on_jump_transition(&self) -> bool {
        self.on_jump_transition
    }

    pub fn is_touching_side_wall(&self) -> bool {
        self.is_touching_side_wall
    }

    pub fn wall_state(&self) -> WallState {
        self.wall_state
    }

    pub fn holding_wall_timer(&self) -> f32 {
        self.holding_wall_timer
    }

    pub fn climb_timer(&self) -> f32 {
        self.climb_timer
    }

    pub fn is_climbing(&self) -> bool {
        self.is_climbing
    }

    pub fn is_input_blocked(&self) -> bool {
        self.blocking_input
    }

    pub fn remaining_jumps(&self) -> u8 {
        self.remaining_jumps
    }

    pub fn neighbors(&self) -> &NeighborQuery {
        &self.neighbors
    }

    pub fn anim_state(&self) -> AnimState {
        self.animator.state()
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn active_frame(&self) -> TextureHandle {
        self.animator.active().frame_handle()
    }

    pub fn render_offset(&self) -> RenderOffset {
        self.render_offset
    }
}
