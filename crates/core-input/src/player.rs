//! Per-player facade tying one controller, one engine and one move list together.

use crate::controller::ControllerState;
use crate::engine::{Clock, EngineTimings, KeystrokeEngine};
use core_keystroke::{Keystroke, Vec2, format_symbols};
use core_moves::{MoveError, MoveList};
use std::fmt;

#[derive(Debug)]
pub struct PlayerInput<C> {
    engine: KeystrokeEngine,
    moves: MoveList,
    controller: C,
}

impl<C: ControllerState> PlayerInput<C> {
    pub fn new(controller: C, clock: impl Clock + 'static) -> Self {
        Self::with_timings(controller, clock, EngineTimings::default())
    }

    pub fn with_timings(controller: C, clock: impl Clock + 'static, timings: EngineTimings) -> Self {
        Self {
            engine: KeystrokeEngine::with_timings(clock, timings),
            moves: MoveList::new(),
            controller,
        }
    }

    /// Poll the controller once. Call every frame unless the game is paused.
    pub fn update(&mut self, flipped: bool, facing: Vec2) {
        self.engine.update(&self.controller, flipped, facing);
    }

    /// `update` for characters that only ever face left or right.
    pub fn update_flipped(&mut self, flipped: bool) {
        self.update(flipped, Vec2::facing(flipped));
    }

    /// Next recognized move, if any. Each match is handed out once.
    pub fn get_next_move(&mut self) -> Option<&str> {
        self.engine.next_move(&self.moves)
    }

    pub fn clear(&mut self) {
        self.engine.clear();
    }

    pub fn add_move(&mut self, name: &str, keystrokes: &[Keystroke]) -> Result<(), MoveError> {
        self.moves.add_move(name, keystrokes)
    }

    pub fn remove_move(&mut self, name: &str, keystrokes: &[Keystroke]) -> Result<(), MoveError> {
        self.moves.remove_move(name, keystrokes)
    }

    pub fn moves(&self) -> &MoveList {
        &self.moves
    }

    pub fn moves_mut(&mut self) -> &mut MoveList {
        &mut self.moves
    }

    pub fn set_moves(&mut self, moves: MoveList) {
        self.moves = moves;
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    pub fn engine(&self) -> &KeystrokeEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut KeystrokeEngine {
        &mut self.engine
    }
}

/// Queued input as `"Down, Forward, A"`.
impl<C> fmt::Display for PlayerInput<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_symbols(self.engine.queued()))
    }
}
