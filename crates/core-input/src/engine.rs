//! Keystroke combination engine: per-tick buffering, combination, expiry and
//! migration of symbols into the settled queue.

use crate::controller::ControllerState;
use crate::table;
use core_keystroke::{Keystroke, Symbol, Vec2, format_symbols};
use core_moves::MoveList;
use smallvec::SmallVec;
use std::fmt;
use tracing::{debug, trace};

pub const DEFAULT_BUFFERED_INPUT_EXPIRE: f64 = 0.05;
pub const DEFAULT_QUEUED_INPUT_EXPIRE: f64 = 0.5;

// -------------------------------------------------------------------------------------------------
// Clock
// -------------------------------------------------------------------------------------------------
/// External monotonic time source in seconds. The engine never advances time
/// itself.
pub trait Clock {
    fn now(&self) -> f64;
}

impl<F> Clock for F
where
    F: Fn() -> f64,
{
    fn now(&self) -> f64 {
        self()
    }
}

// -------------------------------------------------------------------------------------------------
// Timings
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineTimings {
    /// Seconds a symbol may sit in the buffer waiting for simultaneous input.
    pub buffered_input_expire: f64,
    /// Seconds a settled symbol stays available for move matching.
    pub queued_input_expire: f64,
}

impl Default for EngineTimings {
    fn default() -> Self {
        Self {
            buffered_input_expire: DEFAULT_BUFFERED_INPUT_EXPIRE,
            queued_input_expire: DEFAULT_QUEUED_INPUT_EXPIRE,
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Engine
// -------------------------------------------------------------------------------------------------
pub struct KeystrokeEngine {
    clock: Box<dyn Clock>,
    timings: EngineTimings,
    buffered: SmallVec<[Symbol; 8]>,
    queued: Vec<Symbol>,
}

impl fmt::Debug for KeystrokeEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeystrokeEngine")
            .field("timings", &self.timings)
            .field("buffered", &self.buffered)
            .field("queued", &self.queued)
            .finish_non_exhaustive()
    }
}

impl KeystrokeEngine {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self::with_timings(clock, EngineTimings::default())
    }

    pub fn with_timings(clock: impl Clock + 'static, timings: EngineTimings) -> Self {
        Self {
            clock: Box::new(clock),
            timings,
            buffered: SmallVec::new(),
            queued: Vec::new(),
        }
    }

    pub fn timings(&self) -> EngineTimings {
        self.timings
    }

    pub fn set_buffer_expire(&mut self, seconds: f64) {
        self.timings.buffered_input_expire = seconds;
    }

    pub fn set_queue_expire(&mut self, seconds: f64) {
        self.timings.queued_input_expire = seconds;
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Symbols still waiting to be combined, oldest first.
    pub fn buffered(&self) -> &[Symbol] {
        &self.buffered
    }

    /// Settled symbols available for matching, oldest first.
    pub fn queued(&self) -> &[Symbol] {
        &self.queued
    }

    pub fn queued_mut(&mut self) -> &mut Vec<Symbol> {
        &mut self.queued
    }

    /// Advance one tick: drop stale queued symbols, buffer everything the
    /// controller asserts, then settle expired buffer entries into the queue.
    pub fn update<C>(&mut self, controller: &C, flipped: bool, facing: Vec2)
    where
        C: ControllerState + ?Sized,
    {
        let now = self.clock.now();
        self.expire_queued(now);

        // Highest ordinal first; this decides which pairs combine.
        for keystroke in Keystroke::scan_order() {
            if controller.check_keystroke(keystroke, flipped, facing) {
                self.buffer_keystroke(keystroke, now);
            }
        }

        self.settle_buffered(now);
    }

    /// Add `found` to the buffer unless an entry already covers it.
    ///
    /// The first buffered entry that duplicates, subsumes or combines with
    /// `found` decides the outcome. A combination replaces that entry and the
    /// compound is buffered again, since it may combine further.
    pub fn buffer_keystroke(&mut self, found: Keystroke, now: f64) {
        let mut found = found;
        'rescan: loop {
            for i in 0..self.buffered.len() {
                let existing = self.buffered[i].keystroke;
                if existing == found {
                    trace!(target: "input.buffer", keystroke = %found, "buffer_duplicate");
                    return;
                }
                if table::is_redundant(existing, found) {
                    trace!(target: "input.buffer", keystroke = %found, existing = %existing, "buffer_redundant");
                    return;
                }
                if let Some(combined) = table::try_combine(existing, found) {
                    trace!(
                        target: "input.buffer",
                        existing = %existing,
                        keystroke = %found,
                        combined = %combined,
                        "buffer_combine"
                    );
                    self.buffered.remove(i);
                    found = combined;
                    continue 'rescan;
                }
            }
            trace!(target: "input.buffer", keystroke = %found, time = now, "buffer_push");
            self.buffered.push(Symbol::new(now, found));
            return;
        }
    }

    fn expire_queued(&mut self, now: f64) {
        let cutoff = now - self.timings.queued_input_expire;
        let expired = self.queued.iter().take_while(|s| s.time <= cutoff).count();
        if expired > 0 {
            self.queued.drain(..expired);
            trace!(target: "input.queue", count = expired, remaining = self.queued.len(), "queue_expired");
        }
    }

    fn settle_buffered(&mut self, now: f64) {
        let cutoff = now - self.timings.buffered_input_expire;
        let expired = self.buffered.iter().take_while(|s| s.time <= cutoff).count();
        for symbol in self.buffered.drain(..expired) {
            if self.queued.iter().any(|q| q.keystroke == symbol.keystroke) {
                trace!(target: "input.queue", keystroke = %symbol.keystroke, "queue_duplicate_dropped");
                continue;
            }
            trace!(target: "input.queue", keystroke = %symbol.keystroke, time = symbol.time, "queue_migrate");
            self.queued.push(symbol);
        }
    }

    /// Drop all buffered and queued input, e.g. on pause or round reset.
    pub fn clear(&mut self) {
        debug!(
            target: "input.queue",
            buffered = self.buffered.len(),
            queued = self.queued.len(),
            "input_cleared"
        );
        self.buffered.clear();
        self.queued.clear();
    }

    /// Match the settled queue against `moves`, consuming the matched symbols.
    pub fn next_move<'m>(&mut self, moves: &'m MoveList) -> Option<&'m str> {
        moves.get_next_move(&mut self.queued)
    }

    /// Buffered keystroke names, for on-screen diagnostics.
    pub fn buffered_listing(&self) -> String {
        format_symbols(&self.buffered)
    }

    pub fn queued_listing(&self) -> String {
        format_symbols(&self.queued)
    }
}
