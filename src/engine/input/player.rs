// Per-player input state management

use super::action::Action;
use std::collections::HashSet;

/// Boolean intents sampled once per simulation tick
///
/// `jump_pressed` is the held state of the jump button; the player turns the
/// rising edge into a single jump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub moving_left: bool,
    pub moving_right: bool,
    pub sprinting: bool,
    pub jump_pressed: bool,
}

impl InputState {
    /// Horizontal direction: -1, 0 or 1. Opposing keys cancel.
    pub fn direction(&self) -> i32 {
        (self.moving_right as i32) - (self.moving_left as i32)
    }
}

/// Tracks which actions one player is holding between ticks
#[derive(Debug)]
pub struct PlayerInput {
    /// Player ID
    player_id: usize,

    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions that were just pressed since the last tick
    just_pressed: HashSet<Action>,

    /// Actions that were just released since the last tick
    just_released: HashSet<Action>,
}

impl PlayerInput {
    /// Create a new player input state
    pub fn new(player_id: usize) -> Self {
        Self {
            player_id,
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    /// Get the player ID
    pub fn player_id(&self) -> usize {
        self.player_id
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed since the last tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released since the last tick
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Drop everything (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Sample the snapshot for the next tick and clear edge state
    pub fn snapshot(&mut self) -> InputState {
        let state = InputState {
            moving_left: self.is_pressed(Action::MoveLeft),
            moving_right: self.is_pressed(Action::MoveRight),
            sprinting: self.is_pressed(Action::Sprint),
            // a tap that starts and ends between two ticks still counts
            jump_pressed: self.is_pressed(Action::Jump) || self.just_pressed(Action::Jump),
        };
        self.just_pressed.clear();
        self.just_released.clear();
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_input_creation() {
        let input = PlayerInput::new(0);
        assert_eq!(input.player_id(), 0);
        assert!(!input.is_pressed(Action::Jump));
    }

    #[test]
    fn test_press_and_release() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        assert!(input.is_pressed(Action::Jump));
        assert!(input.just_pressed(Action::Jump));

        input.release(Action::Jump);
        assert!(!input.is_pressed(Action::Jump));
        assert!(input.just_released(Action::Jump));
    }

    #[test]
    fn test_release_unpressed_action() {
        let mut input = PlayerInput::new(0);
        input.release(Action::Jump);
        assert!(!input.just_released(Action::Jump));
    }

    #[test]
    fn test_direction() {
        let mut state = InputState::default();
        assert_eq!(state.direction(), 0);
        state.moving_right = true;
        assert_eq!(state.direction(), 1);
        state.moving_left = true;
        assert_eq!(state.direction(), 0);
        state.moving_right = false;
        assert_eq!(state.direction(), -1);
    }

    #[test]
    fn test_snapshot_reflects_held_actions() {
        let mut input = PlayerInput::new(0);
        input.press(Action::MoveRight);
        input.press(Action::Sprint);

        let state = input.snapshot();
        assert!(state.moving_right);
        assert!(state.sprinting);
        assert!(!state.jump_pressed);
        assert!(!input.just_pressed(Action::MoveRight));
    }

    #[test]
    fn test_tap_between_ticks_is_not_lost() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        input.release(Action::Jump);

        assert!(input.snapshot().jump_pressed);
        assert!(!input.snapshot().jump_pressed);
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        input.press(Action::MoveLeft);
        input.reset();

        assert_eq!(input.snapshot(), InputState::default());
    }
}
