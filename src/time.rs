//! Simulation clock for the draw loop.
//!
//! Frames arrive at whatever rate the browser likes. The game only ever sees
//! whole ticks: `SimClock` keeps a running total of simulated milliseconds
//! and reports how many tick boundaries the latest frame crossed, so
//! `total_ticks` always equals simulated time divided by the tick length.

/// Ticks per simulated second. All game durations are expressed against this.
pub const TICKS_PER_SECOND: u32 = 10;

/// Longest frame gap (ms) counted as simulated time. A backgrounded tab
/// resumes with at most this much catch-up.
const MAX_FRAME_MS: f64 = 500.0;

pub struct SimClock {
    ms_per_tick: f64,
    /// Simulated milliseconds since start, long gaps clamped.
    sim_ms: f64,
    pub total_ticks: u64,
    last_frame: Option<f64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::with_rate(TICKS_PER_SECOND)
    }

    pub fn with_rate(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            sim_ms: 0.0,
            total_ticks: 0,
            last_frame: None,
        }
    }

    /// Feed the frame timestamp (`performance.now()`), returning the ticks
    /// to run this frame. The first frame only sets the reference point.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let gap = self
            .last_frame
            .map_or(0.0, |prev| (now_ms - prev).clamp(0.0, MAX_FRAME_MS));
        self.last_frame = Some(now_ms);
        self.sim_ms += gap;

        let due = (self.sim_ms / self.ms_per_tick) as u64;
        let ticks = due.saturating_sub(self.total_ticks);
        self.total_ticks = self.total_ticks.max(due);
        ticks as u32
    }

    /// Whole simulated seconds since the clock started.
    #[cfg(test)]
    pub fn elapsed_secs(&self) -> u64 {
        self.total_ticks / TICKS_PER_SECOND as u64
    }
}
