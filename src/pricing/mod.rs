//! Live coin prices.
//!
//! Defines the `PriceSource` trait and the `PriceBook` that holds the last
//! fetched quotes. Live prices are only ever used as the coin price
//! override; the reward table keeps its dated reference prices.

pub mod coingecko;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Abstraction over external price APIs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch USD prices keyed by coin symbol. Unknown symbols are omitted.
    async fn fetch_prices(&self, symbols: &[String]) -> Result<HashMap<String, f64>>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Price book
// ---------------------------------------------------------------------------

/// A single timestamped quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceQuote {
    pub usd: f64,
    pub fetched_at: DateTime<Utc>,
}

/// Latest quote per coin symbol.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PriceBook {
    quotes: HashMap<String, PriceQuote>,
}

impl PriceBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record fetched prices. Non-finite or negative prices are dropped.
    /// Returns the number of quotes accepted.
    pub fn update(&mut self, prices: HashMap<String, f64>, fetched_at: DateTime<Utc>) -> usize {
        let mut accepted = 0;
        for (symbol, usd) in prices {
            if !usd.is_finite() || usd < 0.0 {
                warn!(symbol = %symbol, usd, "Discarding invalid quote");
                continue;
            }
            self.quotes.insert(symbol, PriceQuote { usd, fetched_at });
            accepted += 1;
        }
        accepted
    }

    /// Price for `symbol` if a quote exists and is no older than `max_age`.
    pub fn quote(&self, symbol: &str, max_age: Duration, now: DateTime<Utc>) -> Option<f64> {
        let q = self.quotes.get(symbol)?;
        if now - q.fetched_at > max_age {
            debug!(symbol, fetched_at = %q.fetched_at, "Quote too old");
            return None;
        }
        Some(q.usd)
    }

    pub fn get(&self, symbol: &str) -> Option<&PriceQuote> {
        self.quotes.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// Fetch `symbols` from `source` and merge them into `book`.
///
/// On failure the previous quotes stay in place and the error is returned.
pub async fn refresh_price_book(
    source: &dyn PriceSource,
    book: &RwLock<PriceBook>,
    symbols: &[String],
) -> Result<usize> {
    let prices = match source.fetch_prices(symbols).await {
        Ok(p) => p,
        Err(e) => {
            warn!(source = source.name(), error = %e, "Price refresh failed, keeping previous quotes");
            return Err(e);
        }
    };

    let requested = symbols.len();
    let accepted = book.write().await.update(prices, Utc::now());

    info!(
        source = source.name(),
        requested,
        accepted,
        "Price book refreshed"
    );
    Ok(accepted)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
