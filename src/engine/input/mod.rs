// Input handling
//
// Device binding lives outside the simulation. The application translates its
// key/button events into `Action` presses on a `PlayerInput`, and once per
// fixed tick hands the simulation a plain `InputState` snapshot.

pub mod action;
pub mod player;

pub use action::Action;
pub use player::{InputState, PlayerInput};
