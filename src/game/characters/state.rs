// Wall-interaction and animation state machines

/// Wall interaction, orthogonal to the animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WallState {
    #[default]
    None,
    /// Suspended against the wall
    Holding,
    /// Sliding down at a capped speed
    Sliding,
    /// Pulling up over a ledge; input is blocked
    Climbing,
}

/// Animation-visible state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Run,
    JumpStart,
    JumpFall,
    JumpTransition,
    WallContact,
    WallSlide,
    WallClimb,
    /// Reserved: never derived by the current movement model
    WallJump,
}

impl AnimState {
    pub const COUNT: usize = 10;

    pub const ALL: [AnimState; Self::COUNT] = [
        AnimState::Idle,
        AnimState::Walk,
        AnimState::Run,
        AnimState::JumpStart,
        AnimState::JumpFall,
        AnimState::JumpTransition,
        AnimState::WallContact,
        AnimState::WallSlide,
        AnimState::WallClimb,
        AnimState::WallJump,
    ];

    /// Position in `ALL`, used to index per-state arrays
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get the animation name for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Run => "run",
            Self::JumpStart => "jump_start",
            Self::JumpFall => "jump_fall",
            Self::JumpTransition => "jump_transition",
            Self::WallContact => "wall_contact",
            Self::WallSlide => "wall_slide",
            Self::WallClimb => "wall_climb",
            Self::WallJump => "wall_jump",
        }
    }

    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::JumpStart | Self::JumpFall | Self::JumpTransition)
    }

    pub fn is_on_wall(&self) -> bool {
        matches!(
            self,
            Self::WallContact | Self::WallSlide | Self::WallClimb | Self::WallJump
        )
    }
}

/// Physical flags the animation state is derived from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementFlags {
    pub wall_state: WallState,
    pub on_air: bool,
    pub on_jump_transition: bool,
    pub is_jumping: bool,
    pub is_moving: bool,
    pub sprinting: bool,
}

impl MovementFlags {
    /// Priority: wall state, then airborne, then grounded movement
    pub fn animation_state(&self) -> AnimState {
        match self.wall_state {
            WallState::Climbing => return AnimState::WallClimb,
            WallState::Holding => return AnimState::WallContact,
            WallState::Sliding => return AnimState::WallSlide,
            WallState::None => {}
        }

        if self.on_air {
            if self.on_jump_transition {
                AnimState::JumpTransition
            } else if self.is_jumping {
                AnimState::JumpStart
            } else {
                AnimState::JumpFall
            }
        } else if self.is_moving && self.sprinting {
            AnimState::Run
        } else if self.is_moving {
            AnimState::Walk
        } else {
            AnimState::Idle
        }
    }
}

/// Tracks the active animation state and how long it has been active
#[derive(Debug)]
pub struct AnimationStateMachine {
    current_state: AnimState,
    previous_state: AnimState,
    state_time: f32,
}

impl Default for AnimationStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationStateMachine {
    pub fn new() -> Self {
        Self {
            current_state: AnimState::Idle,
            previous_state: AnimState::Idle,
            state_time: 0.0,
        }
    }

    /// Get the current state
    pub fn state(&self) -> AnimState {
        self.current_state
    }

    /// Get the previous state
    pub fn previous_state(&self) -> AnimState {
        self.previous_state
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Transition to a new state. Returns true if the state changed.
    pub fn transition(&mut self, new_state: AnimState) -> bool {
        if self.current_state == new_state {
            return false;
        }
        self.force_transition(new_state);
        true
    }

    /// Force transition even to the same state (resets state time)
    pub fn force_transition(&mut self, new_state: AnimState) {
        self.previous_state = self.current_state;
        self.current_state = new_state;
        self.state_time = 0.0;
    }

    pub fn tick(&mut self, dt: f32) {
        self.state_time += dt;
    }
}
