//! Process-wide combination and subsumption tables.
//!
//! Both tables are derived from one hand-authored rule list the first time
//! either is queried and are read-only afterwards.

use core_keystroke::Keystroke::{self, *};
use std::collections::BTreeSet;
use std::sync::LazyLock;

const BUTTONS: [Keystroke; 8] = [A, B, X, Y, LShoulder, RShoulder, LTrigger, RTrigger];

/// Right-stick inputs a primary direction can be held together with.
const SECONDARY: [Keystroke; 9] = [
    UpR,
    UpForwardR,
    ForwardR,
    DownForwardR,
    DownR,
    DownBackR,
    BackR,
    UpBackR,
    NeutralR,
];

const SECONDARY_DIAGONALS: [(Keystroke, Keystroke, Keystroke); 4] = [
    (UpR, ForwardR, UpForwardR),
    (UpR, BackR, UpBackR),
    (DownR, ForwardR, DownForwardR),
    (DownR, BackR, DownBackR),
];

/// Direction followed by its compound for each entry of `BUTTONS`.
const BUTTON_DIRECTIONS: [(Keystroke, [Keystroke; 8]); 4] = [
    (
        Up,
        [AUp, BUp, XUp, YUp, LShoulderUp, RShoulderUp, LTriggerUp, RTriggerUp],
    ),
    (
        Down,
        [
            ADown,
            BDown,
            XDown,
            YDown,
            LShoulderDown,
            RShoulderDown,
            LTriggerDown,
            RTriggerDown,
        ],
    ),
    (
        Forward,
        [
            AForward,
            BForward,
            XForward,
            YForward,
            LShoulderForward,
            RShoulderForward,
            LTriggerForward,
            RTriggerForward,
        ],
    ),
    (
        Back,
        [
            ABack,
            BBack,
            XBack,
            YBack,
            LShoulderBack,
            RShoulderBack,
            LTriggerBack,
            RTriggerBack,
        ],
    ),
];

/// Primary direction followed by its compound for each entry of `SECONDARY`.
const DUAL_STICK: [(Keystroke, [Keystroke; 9]); 5] = [
    (
        Up,
        [
            UpUp,
            UpUpForward,
            UpForward,
            UpDownForward,
            UpDown,
            UpDownBack,
            UpBack,
            UpUpBack,
            UpNeutral,
        ],
    ),
    (
        Down,
        [
            DownUp,
            DownUpForward,
            DownForward,
            DownDownForward,
            DownDown,
            DownDownBack,
            DownBack,
            DownUpBack,
            DownNeutral,
        ],
    ),
    (
        Forward,
        [
            ForwardUp,
            ForwardUpForward,
            ForwardForward,
            ForwardDownForward,
            ForwardDown,
            ForwardDownBack,
            ForwardBack,
            ForwardUpBack,
            ForwardNeutral,
        ],
    ),
    (
        Back,
        [
            BackUp,
            BackUpForward,
            BackForward,
            BackDownForward,
            BackDown,
            BackDownBack,
            BackBack,
            BackUpBack,
            BackNeutral,
        ],
    ),
    (
        Neutral,
        [
            NeutralUp,
            NeutralUpForward,
            NeutralForward,
            NeutralDownForward,
            NeutralDown,
            NeutralDownBack,
            NeutralBack,
            NeutralUpBack,
            NeutralNeutral,
        ],
    ),
];

/// Every `(lower, higher, combined)` rule. Operands of a rule always appear as
/// results of earlier rules or are not compounds at all.
fn rules() -> impl Iterator<Item = (Keystroke, Keystroke, Keystroke)> {
    let diagonals = SECONDARY_DIAGONALS.into_iter();
    let buttons = BUTTON_DIRECTIONS.into_iter().flat_map(|(dir, results)| {
        BUTTONS
            .into_iter()
            .zip(results)
            .map(move |(button, combined)| (dir, button, combined))
    });
    let sticks = DUAL_STICK.into_iter().flat_map(|(dir, results)| {
        SECONDARY
            .into_iter()
            .zip(results)
            .map(move |(secondary, combined)| (dir, secondary, combined))
    });
    diagonals.chain(buttons).chain(sticks)
}

struct Tables {
    /// `COUNT * COUNT` matrix indexed `[lower][higher]`, defaulting to `lower`.
    combined: Vec<Keystroke>,
    /// Every keystroke a compound subsumes, transitively.
    components: Vec<Vec<Keystroke>>,
}

impl Tables {
    fn build() -> Self {
        let n = Keystroke::COUNT;
        let mut combined = Vec::with_capacity(n * n);
        for lower in Keystroke::ALL {
            combined.extend(std::iter::repeat_n(*lower, n));
        }
        let mut components: Vec<Vec<Keystroke>> = vec![Vec::new(); n];

        for (lower, higher, result) in rules() {
            debug_assert!(lower < higher);
            combined[lower.ordinal() * n + higher.ordinal()] = result;

            let mut parts = BTreeSet::from([lower, higher]);
            parts.extend(components[lower.ordinal()].iter().copied());
            parts.extend(components[higher.ordinal()].iter().copied());
            components[result.ordinal()] = parts.into_iter().collect();
        }
        Self {
            combined,
            components,
        }
    }
}

static TABLES: LazyLock<Tables> = LazyLock::new(Tables::build);

/// Look up the combination of two keystrokes in either order.
///
/// Pairs without a rule yield the lower of the two operands, and
/// `combine(k, k) == k`.
pub fn combine(a: Keystroke, b: Keystroke) -> Keystroke {
    let (lower, higher) = if a <= b { (a, b) } else { (b, a) };
    TABLES.combined[lower.ordinal() * Keystroke::COUNT + higher.ordinal()]
}

/// `Some(compound)` only when a rule actually merges the pair.
pub fn try_combine(a: Keystroke, b: Keystroke) -> Option<Keystroke> {
    let combined = combine(a, b);
    (combined != a.min(b)).then_some(combined)
}

/// Keystrokes subsumed by `keystroke`, sorted; empty for anything that is not
/// a compound.
pub fn components(keystroke: Keystroke) -> &'static [Keystroke] {
    &TABLES.components[keystroke.ordinal()]
}

/// True when `candidate` is already implied by the buffered `existing` keystroke.
pub fn is_redundant(existing: Keystroke, candidate: Keystroke) -> bool {
    components(existing).contains(&candidate)
}
