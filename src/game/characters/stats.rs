// Tunable constants for the world and the player
//
// The baseline values reproduce the reference movement feel exactly; changing
// any of them changes jump arcs and wall behavior.

/// World-wide physics constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPhysics {
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Maximum downward speed before `gravity_factor` scaling (pixels/s)
    pub terminal_velocity: f32,
}

pub const BASE_WORLD: WorldPhysics = WorldPhysics {
    gravity: 600.0,
    terminal_velocity: 600.0,
};

impl Default for WorldPhysics {
    fn default() -> Self {
        BASE_WORLD
    }
}

/// Player movement tuning
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    // Movement
    /// Horizontal speed at `speed_factor == 1` (pixels/s)
    pub run_speed: f32,
    /// Speed factor while sprinting
    pub sprint_multiplier: f32,
    /// Upward speed given by a jump (pixels/s)
    pub jump_velocity: f32,
    /// Jumps available after landing
    pub max_jumps: u8,

    // Vertical
    /// Per-player gravity scale; also scales terminal velocity
    pub gravity_factor: f32,
    /// Gravity multiplier while falling
    pub fall_multiplier: f32,
    /// Fraction of terminal velocity below which vertical motion counts as the jump apex
    pub jump_transition_ratio: f32,

    // Wall interaction
    /// Seconds the player hangs on a wall before sliding
    pub wall_hold_duration: f32,
    /// Maximum downward speed while sliding (pixels/s)
    pub wall_slide_speed: f32,
    /// Seconds a ledge climb takes
    pub climb_duration: f32,
    /// How far past the ledge edge the player lands after a climb (pixels)
    pub climb_snap_offset: f32,
    /// Band below the ledge top, in pixels, where the body's top must sit to start a climb
    pub climb_band: (f32, f32),

    // Rendering
    /// Sprite magnification
    pub sprite_scale: f32,
}

pub const BASE_STATS: PlayerStats = PlayerStats {
    run_speed: 67.0 * 2.0,
    sprint_multiplier: 2.15,
    jump_velocity: 350.0,
    max_jumps: 2,

    gravity_factor: 1.0,
    fall_multiplier: 1.9,
    jump_transition_ratio: 0.3,

    wall_hold_duration: 0.5,
    wall_slide_speed: 80.0,
    climb_duration: 1.0,
    climb_snap_offset: 10.0,
    climb_band: (16.0, 32.0),

    sprite_scale: 2.0,
};

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl PlayerStats {
    /// Speed cap for this player under the given world
    pub fn terminal_velocity(&self, world: &WorldPhysics) -> f32 {
        world.terminal_velocity * self.gravity_factor
    }

    /// Vertical speed below which the player is in the weightless apex window
    pub fn jump_transition_velocity(&self, world: &WorldPhysics) -> f32 {
        self.terminal_velocity(world) * self.jump_transition_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_stats() {
        let stats = PlayerStats::default();
        assert_eq!(stats.run_speed, 134.0);
        assert_eq!(stats.max_jumps, 2);
        assert_eq!(stats.jump_velocity, 350.0);
    }

    #[test]
    fn test_derived_velocities() {
        let stats = PlayerStats::default();
        let world = WorldPhysics::default();
        assert_relative_eq!(stats.terminal_velocity(&world), 600.0);
        assert_relative_eq!(stats.jump_transition_velocity(&world), 180.0);
    }

    #[test]
    fn test_gravity_factor_scales_terminal_velocity() {
        let stats = PlayerStats {
            gravity_factor: 0.5,
            ..PlayerStats::default()
        };
        assert_relative_eq!(stats.terminal_velocity(&WorldPhysics::default()), 300.0);
    }
}
