// Character animation system
//
// An `AnimationAsset` is immutable and shared; each (entity, state) pair owns
// an `AnimationPlayer` that is reset whenever its state is entered.

use std::sync::Arc;

use log::{debug, info};

use super::state::{AnimState, AnimationStateMachine};
use crate::engine::assets::{AssetManager, SheetLayout, TextureHandle};

/// Errors raised while assembling animations
#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    #[error("No animation registered for state {0:?}")]
    MissingAnimation(AnimState),

    #[error("Animation {0} has no frames")]
    EmptyAnimation(String),

    #[error("Animation {name} is invalid: {reason}")]
    InvalidAnimation { name: String, reason: String },
}

/// Draw-rect adjustment, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOffset {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl RenderOffset {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Offset of the sprite relative to the body's top-left corner
    ///
    /// The scaled sprite is centred horizontally on the body and its bottom is
    /// aligned with the body's bottom; `asset` then nudges position and size.
    pub fn for_body(
        body_size: (i32, i32),
        sprite_size: (u32, u32),
        scale: f32,
        asset: RenderOffset,
    ) -> Self {
        let w = (sprite_size.0 as f32 * scale) as i32 + asset.w;
        let h = (sprite_size.1 as f32 * scale) as i32 + asset.h;
        Self {
            x: (body_size.0 - w) / 2 + asset.x,
            y: body_size.1 - h + asset.y,
            w,
            h,
        }
    }
}

/// Immutable frame sequence with timing
#[derive(Debug, Clone)]
pub struct AnimationAsset {
    pub name: String,
    pub frames: Vec<TextureHandle>,
    /// Seconds each frame stays on screen
    pub frame_duration: f32,
    pub looping: bool,
    /// Per-asset draw adjustment
    pub render_offset: RenderOffset,
    /// Unscaled pixel size of one frame
    pub sprite_size: (u32, u32),
}

impl AnimationAsset {
    pub fn new(
        name: &str,
        frames: Vec<TextureHandle>,
        fps: f32,
        looping: bool,
        sprite_size: (u32, u32),
    ) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::EmptyAnimation(name.to_string()));
        }
        if !(fps > 0.0) {
            return Err(AnimationError::InvalidAnimation {
                name: name.to_string(),
                reason: format!("frame rate must be positive, got {}", fps),
            });
        }

        Ok(Self {
            name: name.to_string(),
            frames,
            frame_duration: 1.0 / fps,
            looping,
            render_offset: RenderOffset::default(),
            sprite_size,
        })
    }

    pub fn with_render_offset(mut self, offset: RenderOffset) -> Self {
        self.render_offset = offset;
        self
    }

    /// Load numbered frames from a folder through the asset provider
    pub fn from_folder(
        assets: &mut AssetManager,
        folder: &str,
        frame_count: usize,
        fps: f32,
        looping: bool,
    ) -> anyhow::Result<Self> {
        let frames = assets.load_frame_folder(folder, frame_count)?;
        let sprite_size = frames
            .first()
            .and_then(|&frame| assets.texture_size(frame))
            .unwrap_or_default();
        Ok(Self::new(folder, frames, fps, looping, sprite_size)?)
    }

    /// Slice a sprite sheet through the asset provider
    pub fn from_sprite_sheet(
        assets: &mut AssetManager,
        name: &str,
        layout: SheetLayout,
        fps: f32,
        looping: bool,
    ) -> anyhow::Result<Self> {
        let frames = assets.load_sprite_sheet(name, layout)?;
        Ok(Self::new(
            name,
            frames,
            fps,
            looping,
            (layout.sprite_width, layout.sprite_height),
        )?)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frames.len() as f32 * self.frame_duration
    }
}

/// Playback cursor over one shared asset
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    asset: Arc<AnimationAsset>,
    elapsed: f32,
    current_frame: usize,
    finished: bool,
}

impl AnimationPlayer {
    pub fn new(asset: Arc<AnimationAsset>) -> Self {
        Self {
            asset,
            elapsed: 0.0,
            current_frame: 0,
            finished: false,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.current_frame = 0;
        self.finished = false;
    }

    /// Advance the clock and return the frame index to show
    ///
    /// Looping assets wrap; one-shot assets freeze on their last frame and
    /// report finished until reset.
    pub fn advance(&mut self, dt: f32) -> usize {
        self.elapsed += dt;

        let count = self.asset.frame_count();
        let raw = (self.elapsed / self.asset.frame_duration) as usize;

        if self.asset.looping {
            self.current_frame = raw % count;
        } else if self.finished || raw >= count {
            self.finished = true;
            self.current_frame = count - 1;
        } else {
            self.current_frame = raw;
        }

        self.current_frame
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn frame_handle(&self) -> TextureHandle {
        self.asset.frames[self.current_frame]
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn asset(&self) -> &AnimationAsset {
        &self.asset
    }
}

/// One asset per animation state, indexed by `AnimState::index`
#[derive(Debug, Clone)]
pub struct AnimationSet {
    assets: [Arc<AnimationAsset>; AnimState::COUNT],
}

impl AnimationSet {
    pub fn builder() -> AnimationSetBuilder {
        AnimationSetBuilder::default()
    }

    pub fn get(&self, state: AnimState) -> &Arc<AnimationAsset> {
        &self.assets[state.index()]
    }
}

#[derive(Debug, Default)]
pub struct AnimationSetBuilder {
    assets: [Option<Arc<AnimationAsset>>; AnimState::COUNT],
}

impl AnimationSetBuilder {
    pub fn insert(mut self, state: AnimState, asset: AnimationAsset) -> Self {
        self.assets[state.index()] = Some(Arc::new(asset));
        self
    }

    /// Every derivable state needs an asset. The reserved wall-jump state
    /// borrows the jump-start asset when none is given.
    pub fn build(mut self) -> Result<AnimationSet, AnimationError> {
        if self.assets[AnimState::WallJump.index()].is_none() {
            debug!("No wall_jump animation, reusing jump_start");
            self.assets[AnimState::WallJump.index()] =
                self.assets[AnimState::JumpStart.index()].clone();
        }

        let mut missing = None;
        let assets = std::array::from_fn(|i| match self.assets[i].take() {
            Some(asset) => asset,
            None => {
                missing.get_or_insert(AnimState::ALL[i]);
                Arc::new(placeholder())
            }
        });

        if let Some(state) = missing {
            return Err(AnimationError::MissingAnimation(state));
        }

        info!("Animation set ready ({} states)", AnimState::COUNT);
        Ok(AnimationSet { assets })
    }
}

// Filler for the array constructor; never escapes a failed build
fn placeholder() -> AnimationAsset {
    AnimationAsset {
        name: String::new(),
        frames: Vec::new(),
        frame_duration: 1.0,
        looping: true,
        render_offset: RenderOffset::default(),
        sprite_size: (0, 0),
    }
}

/// Animation state machine plus one player per state
#[derive(Debug)]
pub struct Animator {
    players: [AnimationPlayer; AnimState::COUNT],
    machine: AnimationStateMachine,
}

impl Animator {
    pub fn new(set: &AnimationSet) -> Self {
        Self {
            players: std::array::from_fn(|i| {
                AnimationPlayer::new(set.get(AnimState::ALL[i]).clone())
            }),
            machine: AnimationStateMachine::new(),
        }
    }

    pub fn state(&self) -> AnimState {
        self.machine.state()
    }

    pub fn active(&self) -> &AnimationPlayer {
        &self.players[self.machine.state().index()]
    }

    /// Switch to `next` if it differs, then advance the active player
    pub fn update(&mut self, next: AnimState, dt: f32) {
        if self.machine.transition(next) {
            debug!(
                "Animation {} -> {}",
                self.machine.previous_state().animation_name(),
                next.animation_name()
            );
            self.players[next.index()].reset();
        }
        self.machine.tick(dt);
        self.players[next.index()].advance(dt);
    }

    /// Enter `state` from frame zero even if it is already active
    pub fn force(&mut self, state: AnimState) {
        self.machine.force_transition(state);
        self.players[state.index()].reset();
    }

    /// Reset the active player and sample it once
    pub fn restart_and_sample(&mut self, dt: f32) {
        let state = self.machine.state();
        self.machine.force_transition(state);
        self.machine.tick(dt);
        let player = &mut self.players[state.index()];
        player.reset();
        player.advance(dt);
    }
}
