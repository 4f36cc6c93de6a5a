//! Tick-driven scheduled tasks owned by the game state.
//!
//! A timer is a plain value: dropping it cancels it, replacing it
//! reschedules it. Nothing runs in the background.

/// Fires every `period` ticks until dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval {
    period: u32,
    elapsed: u32,
}

impl Interval {
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            elapsed: 0,
        }
    }

    /// Advance by one tick. Returns true when the period completes.
    pub fn step(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    pub fn ticks_until_fire(&self) -> u32 {
        self.period - self.elapsed
    }
}

/// Fires once after `delay` ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct OneShot {
    remaining: u32,
}

impl OneShot {
    pub fn new(delay: u32) -> Self {
        Self { remaining: delay }
    }

    /// Advance by one tick. Returns true exactly once, on the tick the
    /// delay runs out.
    pub fn step(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}
