//! Display formatting for projection figures.
//!
//! Currency and duration strings as the storefront renders them
//! (`$1,234.56`, `$1.2k`, `"Never"`, `"3.1 years"`). Non-finite values
//! never reach the page: they render as `"N/A"`.

use serde::Serialize;

use crate::types::{BreakEven, HashrateSpec, ProfitabilityResult};

/// Break-even spans longer than this render in years.
pub const YEARS_THRESHOLD_DAYS: u64 = 730;
/// Break-even spans longer than this (and not in years) render in months.
pub const MONTHS_THRESHOLD_DAYS: u64 = 60;

const NOT_AVAILABLE: &str = "N/A";

/// `$1,234.56`; negatives as `-$12.34`.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Abbreviated currency: `$1.2k`, `$3.4M`, `$5.6B`; below 1 000 as [`format_usd`].
pub fn format_usd_compact(amount: f64) -> String {
    if !amount.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    const SUFFIXES: &[(f64, &str)] = &[(1e3, "k"), (1e6, "M"), (1e9, "B")];

    let abs = amount.abs();
    // Decide on the rounded figure so 999.999 is "$1.0k", not "$1,000.00".
    if (abs * 100.0).round() < 100_000.0 {
        return format_usd(amount);
    }

    let mut idx = 0;
    while idx + 1 < SUFFIXES.len() && (abs / SUFFIXES[idx].0 * 10.0).round() >= 10_000.0 {
        idx += 1;
    }
    let (divisor, suffix) = SUFFIXES[idx];
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${:.1}{suffix}", abs / divisor)
}

/// `"Never"`, `"N days"`, `"X.Y months"` (> 60 days) or `"X.Y years"` (> 730 days).
pub fn format_break_even(break_even: BreakEven) -> String {
    match break_even {
        BreakEven::Never => "Never".to_string(),
        BreakEven::Days(days) if days > YEARS_THRESHOLD_DAYS => {
            format!("{:.1} years", days as f64 / 365.0)
        }
        BreakEven::Days(days) if days > MONTHS_THRESHOLD_DAYS => {
            format!("{:.1} months", days as f64 / 30.0)
        }
        BreakEven::Days(1) => "1 day".to_string(),
        BreakEven::Days(days) => format!("{days} days"),
    }
}

/// `"42.5%"`.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{value:.1}%")
}

/// `"234 TH/s"`, `"3.68 GH/s"` (two decimals max, trailing zeros trimmed).
pub fn format_hashrate(spec: &HashrateSpec) -> String {
    let formatted = format!("{:.2}", spec.value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, spec.unit)
}

/// Insert thousands separators into a string of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Formatted projection
// ---------------------------------------------------------------------------

/// Every display string for one projection, ready for the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedProjection {
    pub daily_revenue: String,
    pub daily_electricity_cost: String,
    pub daily_profit: String,
    pub monthly_profit: String,
    pub yearly_profit: String,
    pub yearly_profit_compact: String,
    pub break_even: String,
    pub roi: String,
}

impl From<&ProfitabilityResult> for FormattedProjection {
    fn from(r: &ProfitabilityResult) -> Self {
        Self {
            daily_revenue: format_usd(r.daily_revenue_usd),
            daily_electricity_cost: format_usd(r.daily_electricity_cost_usd),
            daily_profit: format_usd(r.daily_profit_usd),
            monthly_profit: format_usd(r.monthly_profit_usd),
            yearly_profit: format_usd(r.yearly_profit_usd),
            yearly_profit_compact: format_usd_compact(r.yearly_profit_usd),
            break_even: format_break_even(r.break_even_days),
            roi: format_percent(r.roi_percent),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
