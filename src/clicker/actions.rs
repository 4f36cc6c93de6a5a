//! Semantic action IDs for Ruble Clicker click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

pub const CLICK_RUBLE: u16 = 0;
pub const SHOW_CARD: u16 = 1;

// ── Purchases (base + index into Purchase::all()) ───────────────
pub const BUY_BASE: u16 = 100;

pub const RESET_PROGRESS: u16 = 900;
