//! Shared types for the HASHPROFIT engine.
//!
//! These types form the data model used across all modules: parsed
//! hardware specs, reward table entries, calculator inputs, and the
//! derived profitability result.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Hashrate
// ---------------------------------------------------------------------------

/// Hashrate unit as printed on catalog spec sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashrateUnit {
    #[serde(rename = "TH/s")]
    TeraHash,
    #[serde(rename = "GH/s")]
    GigaHash,
    #[serde(rename = "MH/s")]
    MegaHash,
    #[serde(rename = "KH/s")]
    KiloHash,
    #[serde(rename = "KSol/s")]
    KiloSol,
    #[serde(rename = "H/s")]
    Hash,
}

impl HashrateUnit {
    /// All known units (useful for iteration).
    pub const ALL: &'static [HashrateUnit] = &[
        HashrateUnit::TeraHash,
        HashrateUnit::GigaHash,
        HashrateUnit::MegaHash,
        HashrateUnit::KiloHash,
        HashrateUnit::KiloSol,
        HashrateUnit::Hash,
    ];

    /// Display label, e.g. `"TH/s"`.
    pub fn label(&self) -> &'static str {
        match self {
            HashrateUnit::TeraHash => "TH/s",
            HashrateUnit::GigaHash => "GH/s",
            HashrateUnit::MegaHash => "MH/s",
            HashrateUnit::KiloHash => "KH/s",
            HashrateUnit::KiloSol => "KSol/s",
            HashrateUnit::Hash => "H/s",
        }
    }
}

impl fmt::Display for HashrateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parse a unit token (case-insensitive, `/s` optional).
impl std::str::FromStr for HashrateUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let token = lower.strip_suffix("/s").unwrap_or(&lower);
        match token {
            "th" => Ok(HashrateUnit::TeraHash),
            "gh" => Ok(HashrateUnit::GigaHash),
            "mh" => Ok(HashrateUnit::MegaHash),
            "kh" => Ok(HashrateUnit::KiloHash),
            "ksol" => Ok(HashrateUnit::KiloSol),
            "h" => Ok(HashrateUnit::Hash),
            _ => Err(anyhow::anyhow!("Unknown hashrate unit: {s}")),
        }
    }
}

/// Parsed hashrate, e.g. `234 TH/s`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HashrateSpec {
    /// Always finite and non-negative.
    pub value: f64,
    pub unit: HashrateUnit,
}

impl HashrateSpec {
    /// The safe zero returned for unparseable catalog strings.
    pub const ZERO: Self = Self {
        value: 0.0,
        unit: HashrateUnit::TeraHash,
    };

    pub fn new(value: f64, unit: HashrateUnit) -> Self {
        Self { value, unit }
    }
}

impl Default for HashrateSpec {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for HashrateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

// ---------------------------------------------------------------------------
// Power
// ---------------------------------------------------------------------------

/// Parsed wall power draw.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PowerSpec {
    pub watts: f64,
}

impl PowerSpec {
    pub const ZERO: Self = Self { watts: 0.0 };

    pub fn new(watts: f64) -> Self {
        Self { watts }
    }
}

impl fmt::Display for PowerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}W", self.watts)
    }
}

// ---------------------------------------------------------------------------
// Reward table entry
// ---------------------------------------------------------------------------

/// Static reward figures for one proof-of-work algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmRewardEntry {
    /// Coins earned per `unit` of hashrate per day.
    pub reward_per_unit_per_day: f64,
    /// Reference coin price in USD, valid as of the table date.
    pub reference_coin_price_usd: f64,
    /// Hashrate unit the reward is quoted against.
    pub unit: HashrateUnit,
    /// Ticker of the mined coin, e.g. "BTC".
    pub coin_symbol: String,
}

// ---------------------------------------------------------------------------
// Calculator inputs
// ---------------------------------------------------------------------------

/// User-adjustable inputs. Owned by the UI, passed in on every recompute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInputs {
    pub electricity_cost_usd_per_kwh: f64,
    /// Replaces the reference coin price when set.
    #[serde(default)]
    pub coin_price_override_usd: Option<f64>,
}

impl CalculatorInputs {
    pub fn new(electricity_cost_usd_per_kwh: f64) -> Self {
        Self {
            electricity_cost_usd_per_kwh,
            coin_price_override_usd: None,
        }
    }

    pub fn with_coin_price(mut self, price_usd: f64) -> Self {
        self.coin_price_override_usd = Some(price_usd);
        self
    }
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self::new(0.08)
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Break-even horizon. `Never` replaces the infinite/NaN day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakEven {
    Days(u64),
    Never,
}

impl BreakEven {
    pub fn days(&self) -> Option<u64> {
        match self {
            BreakEven::Days(d) => Some(*d),
            BreakEven::Never => None,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, BreakEven::Never)
    }
}

impl fmt::Display for BreakEven {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakEven::Days(d) => write!(f, "{d} days"),
            BreakEven::Never => write!(f, "Never"),
        }
    }
}

/// Derived projection. Recomputed on every input change, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityResult {
    pub daily_power_kwh: f64,
    pub daily_electricity_cost_usd: f64,
    pub daily_coin_earnings: f64,
    pub daily_revenue_usd: f64,
    pub daily_profit_usd: f64,
    pub monthly_profit_usd: f64,
    pub yearly_profit_usd: f64,
    pub break_even_days: BreakEven,
    pub roi_percent: f64,
    pub is_profitable: bool,
}

impl fmt::Display for ProfitabilityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "revenue ${:.2}/day | power ${:.2}/day | profit ${:.2}/day | break-even {} | ROI {:.1}%",
            self.daily_revenue_usd,
            self.daily_electricity_cost_usd,
            self.daily_profit_usd,
            self.break_even_days,
            self.roi_percent,
        )
    }
}

// ---------------------------------------------------------------------------
// Catalog listing
// ---------------------------------------------------------------------------

/// A product as the catalog store supplies it. Strings are free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinerListing {
    #[serde(default)]
    pub name: Option<String>,
    pub hashrate: String,
    pub power: String,
    pub algorithm: String,
    /// Hardware price in USD.
    pub price: f64,
}

impl MinerListing {
    /// Label for logs: the name when present, else the hashrate string.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.hashrate)
    }

    /// Helper to build a test/sample listing with sensible defaults.
    #[cfg(test)]
    pub fn sample() -> Self {
        MinerListing {
            name: Some("Antminer S21 XP".to_string()),
            hashrate: "100 TH/s".to_string(),
            power: "3500W".to_string(),
            algorithm: "SHA256".to_string(),
            price: 4_000.0,
        }
    }
}

/// Where the coin price used in a projection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSourceKind {
    /// Dated reference price from the reward table.
    Reference,
    /// Explicit caller override.
    Override,
    /// Live quote from the price feed.
    Live,
}

impl fmt::Display for PriceSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSourceKind::Reference => write!(f, "reference"),
            PriceSourceKind::Override => write!(f, "override"),
            PriceSourceKind::Live => write!(f, "live"),
        }
    }
}

/// Engine output for one catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinerProjection {
    pub listing: MinerListing,
    pub hashrate: HashrateSpec,
    pub power: PowerSpec,
    /// Table key actually used (after default fallback).
    pub algorithm: String,
    pub reward: AlgorithmRewardEntry,
    pub coin_price_usd: f64,
    pub price_source: PriceSourceKind,
    pub result: ProfitabilityResult,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
