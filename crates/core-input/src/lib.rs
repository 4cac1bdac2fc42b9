//! core-input: turns per-tick controller state into a settled queue of
//! keystroke symbols and recognizes moves in it.
//!
//! Each tick the engine asks a [`ControllerState`] about every scannable
//! keystroke, merges simultaneous presses into compounds through the static
//! [`table`], and lets buffered symbols settle into the queue once they are
//! older than the buffer window. Settled symbols expire after the queue window.
//! [`PlayerInput`] bundles an engine with a controller and a [`MoveList`].

mod controller;
mod engine;
mod player;
pub mod table;

pub use controller::{AssertedKeystrokes, ControllerState};
pub use engine::{
    Clock, DEFAULT_BUFFERED_INPUT_EXPIRE, DEFAULT_QUEUED_INPUT_EXPIRE, EngineTimings,
    KeystrokeEngine,
};
pub use player::PlayerInput;

pub use core_keystroke::{Keystroke, Symbol, Vec2};
pub use core_moves::{MoveDefinition, MoveError, MoveList};
