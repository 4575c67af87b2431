// Fixed-timestep clock
//
// Frame durations are accumulated and drained in fixed steps; the leftover
// fraction is exposed as `alpha()` for render interpolation.

use std::time::Duration;

use crate::core::math::clamp;

/// Target simulation rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of simulation steps per frame to prevent spiral of death
const MAX_PHYSICS_STEPS: u32 = 5;

/// Accumulator state for the fixed-step simulation
#[derive(Debug, Default)]
pub struct GameLoop {
    /// Time not yet consumed by fixed steps
    accumulator: Duration,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's duration, returns the number of fixed updates to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;
        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_PHYSICS_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }

        // Too far behind: drop the backlog instead of replaying it next frame
        if self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::debug!("Dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        self.update_count += updates as u64;
        updates
    }

    /// Interpolation alpha between the previous and current tick, in [0, 1]
    pub fn alpha(&self) -> f32 {
        clamp(
            self.accumulator.as_secs_f32() / FIXED_TIMESTEP_DURATION.as_secs_f32(),
            0.0,
            1.0,
        )
    }

    /// Frames fed through `advance`
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Fixed updates handed out so far
    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}
