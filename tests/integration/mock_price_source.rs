//! Mock price source for integration testing.
//!
//! Provides a deterministic `PriceSource` that serves fixed quotes from
//! memory and can be told to fail.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use hashprofit::pricing::PriceSource;

/// A mock price feed. Quotes and failure mode are controllable from test code.
pub struct MockPriceSource {
    prices: Arc<Mutex<HashMap<String, f64>>>,
    force_error: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<usize>>,
}

impl MockPriceSource {
    pub fn new(prices: &[(&str, f64)]) -> Self {
        Self {
            prices: Arc::new(Mutex::new(
                prices.iter().map(|(s, p)| (s.to_string(), *p)).collect(),
            )),
            force_error: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Replace one quote.
    pub fn set_price(&self, symbol: &str, usd: f64) {
        self.prices.lock().unwrap().insert(symbol.to_string(), usd);
    }

    /// Force all subsequent fetches to return an error.
    pub fn set_error(&self, msg: &str) {
        *self.force_error.lock().unwrap() = Some(msg.to_string());
    }

    pub fn clear_error(&self) {
        *self.force_error.lock().unwrap() = None;
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    async fn fetch_prices(&self, symbols: &[String]) -> Result<HashMap<String, f64>> {
        *self.calls.lock().unwrap() += 1;
        if let Some(msg) = self.force_error.lock().unwrap().clone() {
            return Err(anyhow!(msg));
        }
        let prices = self.prices.lock().unwrap();
        Ok(symbols
            .iter()
            .filter_map(|s| prices.get(s).map(|p| (s.clone(), *p)))
            .collect())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
