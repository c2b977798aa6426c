//! CoinGecko price source.
//!
//! API: `https://api.coingecko.com/api/v3/simple/price?ids=..&vs_currencies=usd`
//! Auth: optional demo key via `x-cg-demo-api-key` header.
//! Rate limit: ~30 req/min on the public tier, so refreshes are minutes apart.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use tracing::debug;

use super::PriceSource;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Coin symbol → CoinGecko coin id.
const COIN_IDS: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("LTC", "litecoin"),
    ("KAS", "kaspa"),
    ("ETC", "ethereum-classic"),
    ("ALPH", "alephium"),
    ("ZEC", "zcash"),
    ("XMR", "monero"),
    ("DASH", "dash"),
];

/// `{"bitcoin": {"usd": 98000.0}, ...}`
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

pub struct CoinGeckoSource {
    http: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl CoinGeckoSource {
    pub fn new(base_url: Option<String>, api_key: Option<SecretString>) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent("HASHPROFIT/0.1.0")
            .build()
            .context("Failed to build CoinGecko HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
        })
    }

    /// CoinGecko id for a ticker symbol.
    fn coin_id(symbol: &str) -> Option<&'static str> {
        COIN_IDS
            .iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(symbol))
            .map(|(_, id)| *id)
    }

    fn build_url(&self, ids: &[&str]) -> String {
        format!(
            "{}/simple/price?ids={}&vs_currencies=usd",
            self.base_url,
            urlencoding::encode(&ids.join(","))
        )
    }

    /// Map a `simple/price` body back to the requested symbols.
    fn map_response(body: &SimplePriceResponse, requested: &[(&str, &'static str)]) -> HashMap<String, f64> {
        requested
            .iter()
            .filter_map(|(symbol, id)| {
                body.get(*id)
                    .and_then(|currencies| currencies.get("usd"))
                    .map(|usd| (symbol.to_string(), *usd))
            })
            .collect()
    }
}

#[async_trait]
impl PriceSource for CoinGeckoSource {
    async fn fetch_prices(&self, symbols: &[String]) -> Result<HashMap<String, f64>> {
        let requested: Vec<(&str, &'static str)> = symbols
            .iter()
            .filter_map(|s| match Self::coin_id(s) {
                Some(id) => Some((s.as_str(), id)),
                None => {
                    debug!(symbol = %s, "No CoinGecko id for symbol");
                    None
                }
            })
            .collect();

        if requested.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<&str> = requested.iter().map(|(_, id)| *id).collect();
        let url = self.build_url(&ids);

        let mut req = self.http.get(&url);
        if let Some(key) = &self.api_key {
            req = req.header("x-cg-demo-api-key", key.expose_secret().as_str());
        }

        let resp = req.send().await.context("CoinGecko request failed")?;
        if !resp.status().is_success() {
            let status = resp.status();
            anyhow::bail!("CoinGecko API error: {status}");
        }

        let body: SimplePriceResponse = resp
            .json()
            .await
            .context("Failed to parse CoinGecko response")?;

        Ok(Self::map_response(&body, &requested))
    }

    fn name(&self) -> &'static str {
        "coingecko"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
