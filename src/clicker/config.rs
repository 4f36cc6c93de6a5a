//! Tunable rules for the clicker: the automation catalog and upgrade prices.
//!
//! Everything here is fixed at startup and only read afterwards.

use crate::time::TICKS_PER_SECOND;

/// One automation tier. Tiers are bought strictly in catalog order.
#[derive(Clone, Debug, PartialEq)]
pub struct AutomationTier {
    /// Price in clicks.
    pub cost: u64,
    /// Clicks granted on every automation tick.
    pub rate: u64,
    pub label: &'static str,
}

#[derive(Clone, Debug)]
pub struct ClickerConfig {
    pub catalog: Vec<AutomationTier>,
    /// How many clicks make one unit of currency.
    pub clicks_per_currency: u64,
    pub double_boost_cost: u64,
    pub double_boost_secs: u32,
    pub click_boost_cost: u64,
    pub premium_border_cost: u64,
    pub haptic_cost: u64,
    /// Seconds between two automation ticks.
    pub automation_period_secs: u32,
    /// Ticks the haptic pulse stays visible after a click.
    pub haptic_pulse_ticks: u32,
    pub storage_key: &'static str,
}

impl Default for ClickerConfig {
    fn default() -> Self {
        Self {
            catalog: vec![
                AutomationTier { cost: 10, rate: 5, label: "Базовый" },
                AutomationTier { cost: 50, rate: 15, label: "Продвинутый" },
                AutomationTier { cost: 100, rate: 35, label: "Профи" },
                AutomationTier { cost: 500, rate: 50, label: "Эксперт" },
                AutomationTier { cost: 1000, rate: 75, label: "Мастер" },
            ],
            clicks_per_currency: 10,
            double_boost_cost: 300,
            double_boost_secs: 30,
            click_boost_cost: 200,
            premium_border_cost: 500,
            haptic_cost: 150,
            automation_period_secs: 1,
            haptic_pulse_ticks: 1,
            storage_key: "rubleClickerGame",
        }
    }
}

impl ClickerConfig {
    /// Tier that would be bought next, if any remain.
    pub fn next_tier(&self, level: usize) -> Option<&AutomationTier> {
        self.catalog.get(level)
    }

    /// Tier currently producing, i.e. the last one bought.
    pub fn active_tier(&self, level: usize) -> Option<&AutomationTier> {
        level.checked_sub(1).and_then(|i| self.catalog.get(i))
    }

    pub fn double_boost_ticks(&self) -> u32 {
        self.double_boost_secs * TICKS_PER_SECOND
    }

    pub fn automation_period_ticks(&self) -> u32 {
        (self.automation_period_secs * TICKS_PER_SECOND).max(1)
    }

    /// Clicks that must be spent to pay `cost` currency.
    pub fn currency_to_clicks(&self, cost: u64) -> u64 {
        cost.saturating_mul(self.clicks_per_currency)
    }
}
