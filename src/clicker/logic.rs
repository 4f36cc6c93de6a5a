//! Ruble Clicker game rules — pure functions over `ClickerState`, fully testable.
//!
//! Every function that touches `clicks` finishes with `recompute_currency`.
//! Persistence is the caller's business (see `ClickerGame`).

use super::config::ClickerConfig;
use super::error::{PurchaseError, PurchaseResult};
use super::state::{ClickerState, Purchase};
use super::timer::OneShot;

/// Manual click. Returns the number of clicks gained.
pub fn register_click(state: &mut ClickerState, config: &ClickerConfig) -> u64 {
    let gain = state.click_gain();
    state.clicks = state.clicks.saturating_add(gain);
    state.recompute_currency(config);

    // Re-roll the floating icon inside 10..90%.
    let x = 10 + (state.next_random() % 81) as u8;
    let y = 10 + (state.next_random() % 81) as u8;
    state.icon_pos = (x, y);

    if state.haptic_owned {
        state.haptic_pulse = config.haptic_pulse_ticks;
    }
    gain
}

/// Buy the next automation tier, paid in clicks. Returns the new level.
pub fn purchase_automation(
    state: &mut ClickerState,
    config: &ClickerConfig,
) -> PurchaseResult<usize> {
    let tier = config
        .next_tier(state.automation_level)
        .ok_or(PurchaseError::MaxLevel)?;
    if state.clicks < tier.cost {
        return Err(PurchaseError::InsufficientClicks {
            need: tier.cost,
            have: state.clicks,
        });
    }
    state.clicks -= tier.cost;
    state.recompute_currency(config);
    state.automation_level += 1;
    state.reschedule_automation(config);
    log::info!(
        "automation upgraded to level {} ({})",
        state.automation_level,
        tier.label
    );
    Ok(state.automation_level)
}

/// Pay `cost` currency by removing the equivalent clicks.
fn spend_currency(state: &mut ClickerState, config: &ClickerConfig, cost: u64) -> PurchaseResult<()> {
    if state.currency < cost {
        return Err(PurchaseError::InsufficientFunds {
            need: cost,
            have: state.currency,
        });
    }
    // currency >= cost implies clicks >= cost * ratio
    state.clicks -= config.currency_to_clicks(cost);
    state.recompute_currency(config);
    Ok(())
}

/// Temporary ×2 on manual clicks.
pub fn purchase_double_boost(state: &mut ClickerState, config: &ClickerConfig) -> PurchaseResult<()> {
    if state.double_active {
        return Err(PurchaseError::AlreadyActive);
    }
    spend_currency(state, config, config.double_boost_cost)?;
    state.double_active = true;
    state.double_timer = Some(OneShot::new(config.double_boost_ticks()));
    log::info!("double boost active for {}s", config.double_boost_secs);
    Ok(())
}

/// Permanent +1 clicks per manual click. Returns the new multiplier.
pub fn purchase_click_boost(state: &mut ClickerState, config: &ClickerConfig) -> PurchaseResult<u64> {
    spend_currency(state, config, config.click_boost_cost)?;
    state.click_multiplier = state.click_multiplier.saturating_add(1);
    log::info!("click multiplier is now {}", state.click_multiplier);
    Ok(state.click_multiplier)
}

pub fn purchase_premium_border(state: &mut ClickerState, config: &ClickerConfig) -> PurchaseResult<()> {
    if state.premium_border_owned {
        return Err(PurchaseError::AlreadyOwned);
    }
    spend_currency(state, config, config.premium_border_cost)?;
    state.premium_border_owned = true;
    Ok(())
}

pub fn purchase_haptic(state: &mut ClickerState, config: &ClickerConfig) -> PurchaseResult<()> {
    if state.haptic_owned {
        return Err(PurchaseError::AlreadyOwned);
    }
    spend_currency(state, config, config.haptic_cost)?;
    state.haptic_owned = true;
    Ok(())
}

/// Dispatch a purchase by kind.
pub fn purchase(state: &mut ClickerState, config: &ClickerConfig, kind: Purchase) -> PurchaseResult<()> {
    match kind {
        Purchase::Automation => purchase_automation(state, config).map(|_| ()),
        Purchase::DoubleBoost => purchase_double_boost(state, config),
        Purchase::ClickBoost => purchase_click_boost(state, config).map(|_| ()),
        Purchase::PremiumBorder => purchase_premium_border(state, config),
        Purchase::Haptic => purchase_haptic(state, config),
    }
}

/// Cost of `kind` and whether it is paid in clicks (`true`) or currency.
/// `None` once the purchase can no longer be made at all.
pub fn price(state: &ClickerState, config: &ClickerConfig, kind: Purchase) -> Option<(u64, bool)> {
    match kind {
        Purchase::Automation => config.next_tier(state.automation_level).map(|t| (t.cost, true)),
        Purchase::DoubleBoost => Some((config.double_boost_cost, false)),
        Purchase::ClickBoost => Some((config.click_boost_cost, false)),
        Purchase::PremiumBorder if state.premium_border_owned => None,
        Purchase::PremiumBorder => Some((config.premium_border_cost, false)),
        Purchase::Haptic if state.haptic_owned => None,
        Purchase::Haptic => Some((config.haptic_cost, false)),
    }
}

/// Whether `purchase` would currently succeed.
pub fn can_afford(state: &ClickerState, config: &ClickerConfig, kind: Purchase) -> bool {
    if kind == Purchase::DoubleBoost && state.double_active {
        return false;
    }
    match price(state, config, kind) {
        Some((cost, true)) => state.clicks >= cost,
        Some((cost, false)) => state.currency >= cost,
        None => false,
    }
}

/// One automation payout. Returns the clicks added (0 without automation).
pub fn automation_tick(state: &mut ClickerState, config: &ClickerConfig) -> u64 {
    let rate = state.automation_rate(config);
    if rate == 0 {
        return 0;
    }
    state.clicks = state.clicks.saturating_add(rate);
    state.recompute_currency(config);
    rate
}

/// Advance all timers by `delta_ticks`. Returns true if any persisted
/// field changed.
pub fn advance(state: &mut ClickerState, config: &ClickerConfig, delta_ticks: u32) -> bool {
    let mut changed = false;
    for _ in 0..delta_ticks {
        let automation_fired = match state.automation_timer.as_mut() {
            Some(timer) => timer.step(),
            None => false,
        };
        if automation_fired && automation_tick(state, config) > 0 {
            changed = true;
        }

        let boost_expired = match state.double_timer.as_mut() {
            Some(timer) => timer.step(),
            None => false,
        };
        if boost_expired {
            state.double_timer = None;
            state.double_active = false;
            state.add_log("X2 клики закончились", false);
            log::debug!("double boost expired");
        }

        state.haptic_pulse = state.haptic_pulse.saturating_sub(1);
    }
    changed
}

/// Back to a fresh game. Pending timers are dropped with the old state,
/// so a running boost can never fire into the new one.
pub fn reset(state: &mut ClickerState) {
    let seed = state.next_random();
    *state = ClickerState::with_seed(seed);
}

/// Format an integer with thousands separators: 1234567 → "1,234,567".
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
