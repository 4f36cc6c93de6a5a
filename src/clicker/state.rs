/// Ruble Clicker game state definitions.

use super::config::ClickerConfig;
use super::timer::{Interval, OneShot};
use crate::time::TICKS_PER_SECOND;

/// Maximum number of notifications kept in the log.
const MAX_LOG: usize = 50;

/// Things the player can buy. Display order matches the upgrade panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Purchase {
    Automation,
    DoubleBoost,
    ClickBoost,
    PremiumBorder,
    Haptic,
}

impl Purchase {
    pub fn all() -> &'static [Purchase] {
        &[
            Purchase::Automation,
            Purchase::DoubleBoost,
            Purchase::ClickBoost,
            Purchase::PremiumBorder,
            Purchase::Haptic,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Purchase::Automation => "Автокликер",
            Purchase::DoubleBoost => "X2 клики",
            Purchase::ClickBoost => "+₽ за клик",
            Purchase::PremiumBorder => "Золотая рамка",
            Purchase::Haptic => "Вибро-Клик",
        }
    }

    /// Keyboard shortcut ('1'..'5').
    pub fn key(&self) -> char {
        match self {
            Purchase::Automation => '1',
            Purchase::DoubleBoost => '2',
            Purchase::ClickBoost => '3',
            Purchase::PremiumBorder => '4',
            Purchase::Haptic => '5',
        }
    }

    pub fn from_key(key: char) -> Option<Purchase> {
        Purchase::all().iter().copied().find(|p| p.key() == key)
    }
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Full state of a clicker session.
pub struct ClickerState {
    /// Primary currency.
    pub clicks: u64,
    /// Always `clicks / clicks_per_currency`. Written only by `recompute_currency`.
    pub currency: u64,
    /// Number of automation tiers bought; index of the next tier.
    pub automation_level: usize,
    pub click_multiplier: u64,
    pub double_active: bool,
    pub premium_border_owned: bool,
    pub haptic_owned: bool,

    /// Runs while `automation_level > 0`.
    pub automation_timer: Option<Interval>,
    /// Pending reversion of `double_active`.
    pub double_timer: Option<OneShot>,

    /// Floating ₽ icon position in percent (10..90) of the click panel.
    pub icon_pos: (u8, u8),
    /// Ticks left on the haptic feedback pulse.
    pub haptic_pulse: u32,
    /// Set by the first reset request, cleared by anything else.
    pub reset_armed: bool,
    pub log: Vec<LogEntry>,
    pub rng_state: u32,
}

/// Fold a millisecond timestamp (`Date.now()`) into an rng seed. Current
/// timestamps are far above `u32::MAX`, so the high bits are mixed in
/// instead of truncated away.
pub fn seed_from_millis(ms: f64) -> u32 {
    let ms = ms as u64;
    (ms ^ (ms >> 32)) as u32
}

impl ClickerState {
    pub fn new() -> Self {
        Self::with_seed(0x2545_F491)
    }

    pub fn with_seed(seed: u32) -> Self {
        Self {
            clicks: 0,
            currency: 0,
            automation_level: 0,
            click_multiplier: 1,
            double_active: false,
            premium_border_owned: false,
            haptic_owned: false,
            automation_timer: None,
            double_timer: None,
            icon_pos: (50, 50),
            haptic_pulse: 0,
            reset_armed: false,
            log: Vec::new(),
            // xorshift gets stuck on zero
            rng_state: seed.max(1),
        }
    }

    /// Clicks gained by one manual click.
    pub fn click_gain(&self) -> u64 {
        let boost = if self.double_active { 2 } else { 1 };
        self.click_multiplier.saturating_mul(boost)
    }

    pub fn recompute_currency(&mut self, config: &ClickerConfig) {
        self.currency = self.clicks / config.clicks_per_currency.max(1);
    }

    pub fn is_maxed(&self, config: &ClickerConfig) -> bool {
        self.automation_level >= config.catalog.len()
    }

    /// Clicks per second coming from automation.
    pub fn automation_rate(&self, config: &ClickerConfig) -> u64 {
        config
            .active_tier(self.automation_level)
            .map(|t| t.rate)
            .unwrap_or(0)
    }

    /// Seconds left on the ×2 boost, rounded up.
    pub fn double_secs_left(&self) -> u32 {
        self.double_timer
            .as_ref()
            .map(|t| t.remaining().div_ceil(TICKS_PER_SECOND))
            .unwrap_or(0)
    }

    /// Start, replace or stop the automation timer to match the level.
    pub fn reschedule_automation(&mut self, config: &ClickerConfig) {
        self.automation_timer = if self.automation_level > 0 {
            Some(Interval::new(config.automation_period_ticks()))
        } else {
            None
        };
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    /// xorshift32.
    pub fn next_random(&mut self) -> u32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_defaults() {
        let s = ClickerState::new();
        assert_eq!(s.clicks, 0);
        assert_eq!(s.currency, 0);
        assert_eq!(s.automation_level, 0);
        assert_eq!(s.click_multiplier, 1);
        assert!(!s.double_active);
        assert!(s.automation_timer.is_none());
        assert!(s.double_timer.is_none());
    }

    #[test]
    fn click_gain_doubles_while_boosted() {
        let mut s = ClickerState::new();
        s.click_multiplier = 3;
        assert_eq!(s.click_gain(), 3);
        s.double_active = true;
        assert_eq!(s.click_gain(), 6);
    }

    #[test]
    fn currency_floors() {
        let cfg = ClickerConfig::default();
        let mut s = ClickerState::new();
        s.clicks = 19;
        s.recompute_currency(&cfg);
        assert_eq!(s.currency, 1);
        s.clicks = 20;
        s.recompute_currency(&cfg);
        assert_eq!(s.currency, 2);
    }

    #[test]
    fn reschedule_follows_level() {
        let cfg = ClickerConfig::default();
        let mut s = ClickerState::new();
        s.reschedule_automation(&cfg);
        assert!(s.automation_timer.is_none());
        s.automation_level = 2;
        s.reschedule_automation(&cfg);
        assert_eq!(
            s.automation_timer.as_ref().map(|t| t.ticks_until_fire()),
            Some(10)
        );
    }

    #[test]
    fn purchase_keys_roundtrip() {
        for p in Purchase::all() {
            assert_eq!(Purchase::from_key(p.key()), Some(*p));
        }
        assert_eq!(Purchase::from_key('9'), None);
    }

    #[test]
    fn log_is_capped() {
        let mut s = ClickerState::new();
        for i in 0..60 {
            s.add_log(&format!("msg {}", i), false);
        }
        assert_eq!(s.log.len(), MAX_LOG);
        assert_eq!(s.log[0].text, "msg 10");
    }

    #[test]
    fn sessions_started_at_different_times_get_different_seeds() {
        let a = seed_from_millis(1_760_000_000_000.0);
        let b = seed_from_millis(1_790_000_123_456.0);
        assert_ne!(a, u32::MAX);
        assert_ne!(a, b);
        assert_ne!(
            ClickerState::with_seed(a).next_random(),
            ClickerState::with_seed(b).next_random()
        );
        // one millisecond apart is enough
        assert_ne!(
            seed_from_millis(1_760_000_000_000.0),
            seed_from_millis(1_760_000_000_001.0)
        );
    }

    #[test]
    fn rng_zero_seed_still_advances() {
        let mut s = ClickerState::with_seed(0);
        let a = s.next_random();
        let b = s.next_random();
        assert_ne!(a, 0);
        assert_ne!(a, b);
    }
}
