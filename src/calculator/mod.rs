//! Profitability engine: unit parsing, reward lookup and projection.

pub mod projection;
pub mod rewards;
pub mod units;

use tracing::{debug, info};

use crate::types::{CalculatorInputs, MinerListing, MinerProjection, PriceSourceKind};
use crate::validation::InputError;
use projection::compute_projection;
use rewards::RewardTable;
use units::{parse_hashrate, parse_power};

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Pipelines validation → spec parsing → reward lookup → projection for
/// catalog listings.
///
/// Holds only the immutable reward table, so one instance can be shared
/// across request handlers without locking.
#[derive(Debug, Clone, Default)]
pub struct ProfitabilityEngine {
    rewards: RewardTable,
}

impl ProfitabilityEngine {
    pub fn new(rewards: RewardTable) -> Self {
        Self { rewards }
    }

    /// Access the reward table.
    pub fn rewards(&self) -> &RewardTable {
        &self.rewards
    }

    /// Project a single listing using the inputs as given.
    pub fn evaluate(
        &self,
        listing: &MinerListing,
        inputs: &CalculatorInputs,
    ) -> Result<MinerProjection, InputError> {
        self.evaluate_with(listing, inputs, |_| None)
    }

    /// Project a single listing, consulting `live_price(coin_symbol)` when the
    /// inputs carry no explicit override.
    ///
    /// Price precedence: explicit override → live quote → reference price.
    pub fn evaluate_with<F>(
        &self,
        listing: &MinerListing,
        inputs: &CalculatorInputs,
        live_price: F,
    ) -> Result<MinerProjection, InputError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        inputs.validate()?;
        listing.validate()?;

        let hashrate = parse_hashrate(&listing.hashrate);
        let power = parse_power(&listing.power);
        let (algorithm, reward) = self.rewards.resolve(&listing.algorithm);

        let (effective_inputs, price_source) = match inputs.coin_price_override_usd {
            Some(_) => (*inputs, PriceSourceKind::Override),
            None => match live_price(&reward.coin_symbol) {
                Some(quote) => (inputs.with_coin_price(quote), PriceSourceKind::Live),
                None => (*inputs, PriceSourceKind::Reference),
            },
        };
        // Live quotes come from outside the validation boundary.
        effective_inputs.validate()?;

        let result = compute_projection(&hashrate, &power, reward, &effective_inputs, listing.price);
        let coin_price_usd = effective_inputs
            .coin_price_override_usd
            .unwrap_or(reward.reference_coin_price_usd);

        debug!(
            listing = listing.label(),
            algorithm,
            hashrate = %hashrate,
            power = %power,
            coin_price = coin_price_usd,
            price_source = %price_source,
            daily_profit = format!("${:.2}", result.daily_profit_usd),
            break_even = %result.break_even_days,
            "Projection computed"
        );

        Ok(MinerProjection {
            listing: listing.clone(),
            hashrate,
            power,
            algorithm: algorithm.to_string(),
            reward: reward.clone(),
            coin_price_usd,
            price_source,
            result,
        })
    }

    /// Project every listing and order by daily profit, best first.
    pub fn rank(
        &self,
        listings: &[MinerListing],
        inputs: &CalculatorInputs,
    ) -> Result<Vec<MinerProjection>, InputError> {
        self.rank_with(listings, inputs, |_| None)
    }

    /// [`rank`](Self::rank) with live quotes (see [`evaluate_with`](Self::evaluate_with)).
    ///
    /// Ties keep catalog order.
    pub fn rank_with<F>(
        &self,
        listings: &[MinerListing],
        inputs: &CalculatorInputs,
        live_price: F,
    ) -> Result<Vec<MinerProjection>, InputError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        let mut projections = listings
            .iter()
            .map(|listing| self.evaluate_with(listing, inputs, &live_price))
            .collect::<Result<Vec<_>, _>>()?;

        projections.sort_by(|a, b| {
            b.result
                .daily_profit_usd
                .partial_cmp(&a.result.daily_profit_usd)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        info!(
            listings = listings.len(),
            profitable = projections.iter().filter(|p| p.result.is_profitable).count(),
            electricity = inputs.electricity_cost_usd_per_kwh,
            best = projections.first().map(|p| p.listing.label()).unwrap_or("-"),
            "Listings ranked"
        );

        Ok(projections)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
