//! Profitability projection.
//!
//! Pure, synchronous arithmetic over parsed specs, a reward entry and the
//! user inputs. No I/O and no shared state, so it is safe to call on every
//! slider tick from any number of render cycles.
//!
//! Inputs are assumed validated (finite, non-negative); see
//! [`crate::validation`] for the caller-facing checks.

use crate::types::{
    AlgorithmRewardEntry, BreakEven, CalculatorInputs, HashrateSpec, PowerSpec,
    ProfitabilityResult,
};

pub const HOURS_PER_DAY: f64 = 24.0;
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Compute daily/monthly/yearly projections for one miner.
///
/// ```text
/// daily_power_kwh   = watts / 1000 * 24
/// daily_cost        = daily_power_kwh * electricity price
/// daily_coins       = hashrate * reward per unit per day
/// daily_revenue     = daily_coins * (override ?? reference price)
/// daily_profit      = daily_revenue - daily_cost
/// ```
///
/// The hashrate value multiplies the reward rate as given. Its unit is not
/// reconciled with the reward entry's unit.
pub fn compute_projection(
    hashrate: &HashrateSpec,
    power: &PowerSpec,
    reward: &AlgorithmRewardEntry,
    inputs: &CalculatorInputs,
    hardware_price_usd: f64,
) -> ProfitabilityResult {
    let daily_power_kwh = (power.watts / 1000.0) * HOURS_PER_DAY;
    let daily_electricity_cost_usd = daily_power_kwh * inputs.electricity_cost_usd_per_kwh;

    let daily_coin_earnings = hashrate.value * reward.reward_per_unit_per_day;
    let coin_price = inputs
        .coin_price_override_usd
        .unwrap_or(reward.reference_coin_price_usd);
    let daily_revenue_usd = daily_coin_earnings * coin_price;

    let daily_profit_usd = daily_revenue_usd - daily_electricity_cost_usd;
    let monthly_profit_usd = daily_profit_usd * DAYS_PER_MONTH;
    let yearly_profit_usd = daily_profit_usd * DAYS_PER_YEAR;
    let is_profitable = daily_profit_usd > 0.0;

    ProfitabilityResult {
        daily_power_kwh,
        daily_electricity_cost_usd,
        daily_coin_earnings,
        daily_revenue_usd,
        daily_profit_usd,
        monthly_profit_usd,
        yearly_profit_usd,
        break_even_days: break_even(hardware_price_usd, daily_profit_usd),
        roi_percent: roi_percent(hardware_price_usd, yearly_profit_usd),
        is_profitable,
    }
}

/// Days until cumulative profit covers the hardware price.
///
/// Free hardware pays off immediately; no profit never pays off.
pub fn break_even(hardware_price_usd: f64, daily_profit_usd: f64) -> BreakEven {
    if daily_profit_usd.is_nan() || daily_profit_usd <= 0.0 {
        return BreakEven::Never;
    }
    if hardware_price_usd <= 0.0 {
        return BreakEven::Days(0);
    }

    let days = (hardware_price_usd / daily_profit_usd).ceil();
    if !days.is_finite() || days >= u64::MAX as f64 {
        return BreakEven::Never;
    }
    BreakEven::Days(days as u64)
}

/// Annual return as a percentage of hardware price. Zero when there is no
/// yearly profit or no price to divide by.
pub fn roi_percent(hardware_price_usd: f64, yearly_profit_usd: f64) -> f64 {
    if yearly_profit_usd > 0.0 && hardware_price_usd > 0.0 {
        (yearly_profit_usd / hardware_price_usd) * 100.0
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
