//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Secrets (the price feed API key) are referenced by env-var name in the
//! config and resolved at runtime via `std::env::var`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;

use crate::calculator::rewards::{RewardOverride, RewardTable};

/// Upper bound for `price_feed.max_quote_age_secs` (one week).
pub const MAX_QUOTE_AGE_SECS: u64 = 7 * 24 * 60 * 60;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub calculator: CalculatorConfig,
    pub price_feed: PriceFeedConfig,
    pub server: ServerConfig,
    /// Reward table replacements/additions applied at load time.
    #[serde(default)]
    pub rewards: Vec<RewardOverride>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CalculatorConfig {
    /// Electricity price used when a request supplies none ($/kWh).
    pub default_electricity_cost: f64,
    /// Slider lower bound ($/kWh). UI hint only; not enforced by the engine.
    pub min_electricity_cost: f64,
    /// Slider upper bound ($/kWh).
    pub max_electricity_cost: f64,
    /// Date of the reward figures when `[[rewards]]` overrides are supplied.
    #[serde(default)]
    pub reward_table_as_of: Option<NaiveDate>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            default_electricity_cost: 0.08,
            min_electricity_cost: 0.01,
            max_electricity_cost: 0.25,
            reward_table_as_of: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PriceFeedConfig {
    pub enabled: bool,
    #[serde(default)]
    pub base_url: Option<String>,
    pub refresh_interval_secs: u64,
    /// Quotes older than this fall back to the reference price.
    pub max_quote_age_secs: u64,
    /// Env var holding an optional CoinGecko demo API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        config.check()?;
        Ok(config)
    }

    /// Reject configurations the calculator cannot use.
    fn check(&self) -> Result<()> {
        let c = &self.calculator;
        if !c.default_electricity_cost.is_finite() || c.default_electricity_cost < 0.0 {
            anyhow::bail!(
                "calculator.default_electricity_cost must be a non-negative number, got {}",
                c.default_electricity_cost
            );
        }
        if c.min_electricity_cost > c.max_electricity_cost {
            anyhow::bail!(
                "calculator.min_electricity_cost ({}) exceeds max_electricity_cost ({})",
                c.min_electricity_cost,
                c.max_electricity_cost
            );
        }

        let max_age = self.price_feed.max_quote_age_secs;
        if max_age > MAX_QUOTE_AGE_SECS {
            anyhow::bail!(
                "price_feed.max_quote_age_secs ({max_age}) exceeds {MAX_QUOTE_AGE_SECS}"
            );
        }

        for r in &self.rewards {
            let e = &r.entry;
            if !e.reward_per_unit_per_day.is_finite() || e.reward_per_unit_per_day < 0.0 {
                anyhow::bail!(
                    "rewards.{}: reward_per_unit_per_day must be a non-negative number, got {}",
                    r.algorithm,
                    e.reward_per_unit_per_day
                );
            }
            if !e.reference_coin_price_usd.is_finite() || e.reference_coin_price_usd < 0.0 {
                anyhow::bail!(
                    "rewards.{}: reference_coin_price_usd must be a non-negative number, got {}",
                    r.algorithm,
                    e.reference_coin_price_usd
                );
            }
        }
        Ok(())
    }

    /// Built-in reward table with the configured overrides applied.
    pub fn reward_table(&self) -> RewardTable {
        RewardTable::builtin()
            .clone()
            .with_overrides(&self.rewards, self.calculator.reward_table_as_of)
    }

    /// Resolve an environment variable name to its value.
    /// Useful for loading secrets referenced in the config.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        std::env::var(env_name)
            .with_context(|| format!("Environment variable not set: {env_name}"))
    }
}
