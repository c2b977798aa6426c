//! Algorithm reward table.
//!
//! Maps a proof-of-work algorithm to coins earned per unit of hashrate per
//! day and a reference coin price. The figures are dated configuration,
//! not live data: reference prices drift from the market, and callers that
//! need current prices inject them through the coin price override.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

use crate::types::{AlgorithmRewardEntry, HashrateUnit};

/// Entry used for unknown algorithms.
pub const DEFAULT_ALGORITHM: &str = "SHA256";

/// Date the built-in reference prices and reward rates were taken.
const BUILTIN_AS_OF: (i32, u32, u32) = (2025, 1, 15);

// ---------------------------------------------------------------------------
// Built-in table
// ---------------------------------------------------------------------------

struct RewardSeed {
    algorithm: &'static str,
    reward_per_unit_per_day: f64,
    reference_coin_price_usd: f64,
    unit: HashrateUnit,
    coin_symbol: &'static str,
}

const BUILTIN_REWARDS: &[RewardSeed] = &[
    RewardSeed {
        algorithm: "SHA256",
        reward_per_unit_per_day: 0.000_004_35,
        reference_coin_price_usd: 98_000.0,
        unit: HashrateUnit::TeraHash,
        coin_symbol: "BTC",
    },
    RewardSeed {
        algorithm: "Scrypt",
        reward_per_unit_per_day: 0.021,
        reference_coin_price_usd: 105.0,
        unit: HashrateUnit::GigaHash,
        coin_symbol: "LTC",
    },
    RewardSeed {
        algorithm: "KHeavyHash",
        reward_per_unit_per_day: 6.2,
        reference_coin_price_usd: 0.12,
        unit: HashrateUnit::TeraHash,
        coin_symbol: "KAS",
    },
    RewardSeed {
        algorithm: "Ethash",
        reward_per_unit_per_day: 0.000_042,
        reference_coin_price_usd: 26.0,
        unit: HashrateUnit::MegaHash,
        coin_symbol: "ETC",
    },
    RewardSeed {
        algorithm: "Blake3",
        reward_per_unit_per_day: 0.43,
        reference_coin_price_usd: 1.2,
        unit: HashrateUnit::TeraHash,
        coin_symbol: "ALPH",
    },
    RewardSeed {
        algorithm: "Equihash",
        reward_per_unit_per_day: 0.000_19,
        reference_coin_price_usd: 50.0,
        unit: HashrateUnit::KiloSol,
        coin_symbol: "ZEC",
    },
    RewardSeed {
        algorithm: "RandomX",
        reward_per_unit_per_day: 0.000_25,
        reference_coin_price_usd: 200.0,
        unit: HashrateUnit::KiloHash,
        coin_symbol: "XMR",
    },
];

/// Alternate spellings seen in catalog data. Matching stays exact.
const ALIASES: &[(&str, &str)] = &[
    ("SHA-256", "SHA256"),
    ("SHA256d", "SHA256"),
    ("sha256", "SHA256"),
    ("scrypt", "Scrypt"),
    ("kHeavyHash", "KHeavyHash"),
    ("Kaspa", "KHeavyHash"),
    ("Etchash", "Ethash"),
    ("ethash", "Ethash"),
    ("BLAKE3", "Blake3"),
    ("blake3", "Blake3"),
    ("equihash", "Equihash"),
    ("randomx", "RandomX"),
];

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// Operator-supplied replacement or addition, loaded from `[[rewards]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardOverride {
    pub algorithm: String,
    #[serde(flatten)]
    pub entry: AlgorithmRewardEntry,
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Immutable algorithm → reward mapping.
#[derive(Debug, Clone)]
pub struct RewardTable {
    entries: HashMap<String, AlgorithmRewardEntry>,
    aliases: HashMap<String, String>,
    as_of: NaiveDate,
}

impl RewardTable {
    /// Build the table from the compiled-in figures.
    pub fn new() -> Self {
        let entries = BUILTIN_REWARDS
            .iter()
            .map(|seed| {
                (
                    seed.algorithm.to_string(),
                    AlgorithmRewardEntry {
                        reward_per_unit_per_day: seed.reward_per_unit_per_day,
                        reference_coin_price_usd: seed.reference_coin_price_usd,
                        unit: seed.unit,
                        coin_symbol: seed.coin_symbol.to_string(),
                    },
                )
            })
            .collect();
        let aliases = ALIASES
            .iter()
            .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
            .collect();
        let (y, m, d) = BUILTIN_AS_OF;

        Self {
            entries,
            aliases,
            as_of: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        }
    }

    /// Process-wide built-in table, initialised on first use.
    pub fn builtin() -> &'static RewardTable {
        static TABLE: OnceLock<RewardTable> = OnceLock::new();
        TABLE.get_or_init(RewardTable::new)
    }

    /// Apply operator overrides. Alias names replace their canonical entry.
    pub fn with_overrides(mut self, overrides: &[RewardOverride], as_of: Option<NaiveDate>) -> Self {
        for o in overrides {
            let key = self
                .aliases
                .get(&o.algorithm)
                .cloned()
                .unwrap_or_else(|| o.algorithm.clone());
            debug!(
                algorithm = %key,
                coin = %o.entry.coin_symbol,
                reward = o.entry.reward_per_unit_per_day,
                "Reward table override"
            );
            self.entries.insert(key, o.entry.clone());
        }
        if let Some(date) = as_of {
            self.as_of = date;
        }
        self
    }

    /// Date the reference figures were taken.
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Resolve `algorithm` (exact, case-sensitive) to its table key and entry.
    ///
    /// Unknown names fall back to [`DEFAULT_ALGORITHM`].
    pub fn resolve(&self, algorithm: &str) -> (&str, &AlgorithmRewardEntry) {
        if let Some((key, entry)) = self.entries.get_key_value(self.canonical(algorithm)) {
            return (key.as_str(), entry);
        }

        debug!(algorithm, fallback = DEFAULT_ALGORITHM, "Unknown algorithm");
        self.default_entry()
    }

    /// Entry for `algorithm`, or the default entry.
    pub fn lookup(&self, algorithm: &str) -> &AlgorithmRewardEntry {
        self.resolve(algorithm).1
    }

    /// Whether `algorithm` resolves without falling back.
    pub fn contains(&self, algorithm: &str) -> bool {
        self.entries.contains_key(self.canonical(algorithm))
    }

    /// All canonical entries, sorted by algorithm name.
    pub fn entries(&self) -> Vec<(&str, &AlgorithmRewardEntry)> {
        let mut all: Vec<_> = self.entries.iter().map(|(k, v)| (k.as_str(), v)).collect();
        all.sort_by(|a, b| a.0.cmp(b.0));
        all
    }

    /// Distinct coin symbols in the table (price feed subscription list).
    pub fn coin_symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self
            .entries
            .values()
            .map(|e| e.coin_symbol.clone())
            .collect();
        symbols.sort();
        symbols.dedup();
        symbols
    }

    fn canonical<'a>(&'a self, algorithm: &'a str) -> &'a str {
        self.aliases
            .get(algorithm)
            .map(String::as_str)
            .unwrap_or(algorithm)
    }

    fn default_entry(&self) -> (&str, &AlgorithmRewardEntry) {
        match self.entries.get_key_value(DEFAULT_ALGORITHM) {
            Some((key, entry)) => (key.as_str(), entry),
            // Seeds always contain SHA256 and overrides never remove entries.
            None => Self::builtin().default_entry(),
        }
    }
}

impl Default for RewardTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up `algorithm` in the built-in table (unknown → SHA256/BTC).
pub fn lookup_reward(algorithm: &str) -> &'static AlgorithmRewardEntry {
    RewardTable::builtin().lookup(algorithm)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
