//! core-keystroke: symbolic controller keystrokes and timed symbols.
//!
//! A `Keystroke` is one discrete recognized input: a direction on the
//! primary source (left stick / dpad / keyboard), a direction on the secondary
//! source (right stick), a button press or release, or a compound produced by
//! combining simultaneous inputs. The declaration order is significant:
//! combination lookups sort operand pairs by it and the per-tick controller
//! scan walks it from the top down.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// -------------------------------------------------------------------------------------------------
// Keystroke Groups
// -------------------------------------------------------------------------------------------------
/// Explicit classification of every keystroke. Code that needs to treat a
/// family of keystrokes alike matches on this instead of comparing ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeystrokeGroup {
    /// Up / Down / Forward / Back / Neutral on the primary source.
    PrimaryDirection,
    /// The four ordinal right-stick directions plus right-stick neutral.
    SecondaryDirection,
    /// Button pressed this tick.
    Button,
    /// Shoulder resolved against the facing direction.
    RelativeShoulder,
    /// Button released this tick.
    Release,
    /// Right-stick diagonal (two secondary directions combined).
    SecondaryDiagonal,
    /// Button pressed together with a primary direction.
    ButtonDirection,
    /// Primary direction held together with a secondary direction or diagonal.
    DualStick,
}

impl KeystrokeGroup {
    /// True for groups produced only by combining other keystrokes.
    pub const fn is_compound(self) -> bool {
        matches!(
            self,
            KeystrokeGroup::SecondaryDiagonal
                | KeystrokeGroup::ButtonDirection
                | KeystrokeGroup::DualStick
        )
    }

    /// True for groups a controller adapter is asked about every tick.
    pub const fn is_scannable(self) -> bool {
        !self.is_compound()
    }
}

// -------------------------------------------------------------------------------------------------
// Keystroke
// -------------------------------------------------------------------------------------------------
macro_rules! keystrokes {
    ($($group:ident => [$($name:ident),* $(,)?]),* $(,)?) => {
        /// Closed, totally ordered set of symbolic keystrokes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum Keystroke {
            $($($name,)*)*
        }

        impl Keystroke {
            /// Every keystroke in declaration order.
            pub const ALL: &'static [Keystroke] = &[$($(Keystroke::$name,)*)*];

            /// Canonical name, identical to the variant identifier.
            pub const fn name(self) -> &'static str {
                match self {
                    $($(Keystroke::$name => stringify!($name),)*)*
                }
            }

            pub const fn group(self) -> KeystrokeGroup {
                match self {
                    $($(Keystroke::$name => KeystrokeGroup::$group,)*)*
                }
            }
        }
    };
}

keystrokes! {
    PrimaryDirection => [Up, Down, Forward, Back, Neutral],
    SecondaryDirection => [UpR, DownR, ForwardR, BackR, NeutralR],
    Button => [A, B, X, Y, LShoulder, RShoulder, LTrigger, RTrigger],
    RelativeShoulder => [ForwardShoulder, BackShoulder],
    Release => [
        ARelease,
        BRelease,
        XRelease,
        YRelease,
        LShoulderRelease,
        RShoulderRelease,
        LTriggerRelease,
        RTriggerRelease,
    ],
    SecondaryDiagonal => [UpForwardR, DownForwardR, UpBackR, DownBackR],
    ButtonDirection => [
        AUp, ADown, AForward, ABack,
        BUp, BDown, BForward, BBack,
        XUp, XDown, XForward, XBack,
        YUp, YDown, YForward, YBack,
        LShoulderUp, LShoulderDown, LShoulderForward, LShoulderBack,
        RShoulderUp, RShoulderDown, RShoulderForward, RShoulderBack,
        LTriggerUp, LTriggerDown, LTriggerForward, LTriggerBack,
        RTriggerUp, RTriggerDown, RTriggerForward, RTriggerBack,
    ],
    DualStick => [
        UpUp, UpUpForward, UpForward, UpDownForward, UpDown, UpDownBack, UpBack, UpUpBack,
        UpNeutral,
        ForwardUp, ForwardUpForward, ForwardForward, ForwardDownForward, ForwardDown,
        ForwardDownBack, ForwardBack, ForwardUpBack, ForwardNeutral,
        DownUp, DownUpForward, DownForward, DownDownForward, DownDown, DownDownBack, DownBack,
        DownUpBack, DownNeutral,
        BackUp, BackUpForward, BackForward, BackDownForward, BackDown, BackDownBack, BackBack,
        BackUpBack, BackNeutral,
        NeutralUp, NeutralUpForward, NeutralForward, NeutralDownForward, NeutralDown,
        NeutralDownBack, NeutralBack, NeutralUpBack, NeutralNeutral,
    ],
}

impl Keystroke {
    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    #[inline]
    pub const fn is_compound(self) -> bool {
        self.group().is_compound()
    }

    /// Keystrokes a controller adapter is polled for, highest ordinal first.
    ///
    /// The descending order matters: it decides which symbol is buffered first
    /// when several are asserted in the same tick, and therefore which
    /// combinations form.
    pub fn scan_order() -> impl Iterator<Item = Keystroke> {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .filter(|k| k.group().is_scannable())
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown keystroke name `{0}`")]
pub struct ParseKeystrokeError(pub String);

impl FromStr for Keystroke {
    type Err = ParseKeystrokeError;

    /// Parse a canonical keystroke name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseKeystrokeError(s.to_string()))
    }
}

// -------------------------------------------------------------------------------------------------
// Symbol
// -------------------------------------------------------------------------------------------------
/// One keystroke observed at a point in time (seconds on the caller's clock).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Symbol {
    pub time: f64,
    pub keystroke: Keystroke,
}

impl Symbol {
    pub const fn new(time: f64, keystroke: Keystroke) -> Self {
        Self { time, keystroke }
    }

    /// Overwrite both fields in place.
    pub fn set(&mut self, time: f64, keystroke: Keystroke) {
        self.time = time;
        self.keystroke = keystroke;
    }
}

/// Render a symbol list as `"Down, Forward, A"` for diagnostics.
pub fn format_symbols(symbols: &[Symbol]) -> String {
    let mut out = String::new();
    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(symbol.keystroke.name());
    }
    out
}

// -------------------------------------------------------------------------------------------------
// Facing direction
// -------------------------------------------------------------------------------------------------
/// Normalized 2D facing vector handed through to controller adapters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const UNIT_X: Vec2 = Vec2::new(1.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Facing vector for a character that only looks left or right.
    pub const fn facing(flipped: bool) -> Self {
        if flipped {
            Vec2::new(-1.0, 0.0)
        } else {
            Vec2::UNIT_X
        }
    }
}
