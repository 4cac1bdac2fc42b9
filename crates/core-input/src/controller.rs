//! Controller-state seam between device adapters and the engine.

use core_keystroke::{Keystroke, Vec2};
use std::collections::BTreeSet;

/// Yes/no oracle asked once per scannable keystroke per tick.
///
/// Implementations resolve raw device state (sticks, buttons, keyboard
/// fallback) against the facing direction; the engine never sees that state.
pub trait ControllerState {
    fn check_keystroke(&self, keystroke: Keystroke, flipped: bool, facing: Vec2) -> bool;
}

impl<T: ControllerState + ?Sized> ControllerState for &T {
    fn check_keystroke(&self, keystroke: Keystroke, flipped: bool, facing: Vec2) -> bool {
        (**self).check_keystroke(keystroke, flipped, facing)
    }
}

impl<T: ControllerState + ?Sized> ControllerState for Box<T> {
    fn check_keystroke(&self, keystroke: Keystroke, flipped: bool, facing: Vec2) -> bool {
        (**self).check_keystroke(keystroke, flipped, facing)
    }
}

/// Controller whose asserted keystrokes are set directly, already resolved
/// for facing. Used for scripted replays and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssertedKeystrokes {
    asserted: BTreeSet<Keystroke>,
}

impl AssertedKeystrokes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, keystroke: Keystroke) {
        self.asserted.insert(keystroke);
    }

    pub fn release(&mut self, keystroke: Keystroke) {
        self.asserted.remove(&keystroke);
    }

    /// Replace the whole asserted set.
    pub fn set<I: IntoIterator<Item = Keystroke>>(&mut self, keystrokes: I) {
        self.asserted.clear();
        self.asserted.extend(keystrokes);
    }

    pub fn clear(&mut self) {
        self.asserted.clear();
    }

    pub fn is_asserted(&self, keystroke: Keystroke) -> bool {
        self.asserted.contains(&keystroke)
    }

    pub fn iter(&self) -> impl Iterator<Item = Keystroke> + '_ {
        self.asserted.iter().copied()
    }
}

impl FromIterator<Keystroke> for AssertedKeystrokes {
    fn from_iter<I: IntoIterator<Item = Keystroke>>(iter: I) -> Self {
        Self {
            asserted: iter.into_iter().collect(),
        }
    }
}

impl ControllerState for AssertedKeystrokes {
    fn check_keystroke(&self, keystroke: Keystroke, _flipped: bool, _facing: Vec2) -> bool {
        self.is_asserted(keystroke)
    }
}
