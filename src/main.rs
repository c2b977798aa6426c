//! HASHPROFIT: mining hardware profitability engine
//!
//! Entry point. Loads configuration, initialises structured logging,
//! starts the calculator API, and keeps the live price book fresh
//! until shutdown.

use anyhow::Result;
use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use hashprofit::api;
use hashprofit::api::routes::ApiState;
use hashprofit::calculator::ProfitabilityEngine;
use hashprofit::config::AppConfig;
use hashprofit::pricing::coingecko::CoinGeckoSource;
use hashprofit::pricing::{refresh_price_book, PriceSource};

const BANNER: &str = r#"
  _   _    _    ____  _   _ ____  ____   ___  _____ ___ _____
 | | | |  / \  / ___|| | | |  _ \|  _ \ / _ \|  ___|_ _|_   _|
 | |_| | / _ \ \___ \| |_| | |_) | |_) | | | | |_   | |  | |
 |  _  |/ ___ \ ___) |  _  |  __/|  _ <| |_| |  _|  | |  | |
 |_| |_/_/   \_\____/|_| |_|_|   |_| \_\\___/|_|   |___| |_|

  Mining hardware profitability engine
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cfg = AppConfig::load("config.toml")?;

    init_logging();

    println!("{BANNER}");
    info!(
        port = cfg.server.port,
        default_electricity = cfg.calculator.default_electricity_cost,
        price_feed = cfg.price_feed.enabled,
        reward_overrides = cfg.rewards.len(),
        "HASHPROFIT starting up"
    );

    // -- Initialise components -------------------------------------------

    let rewards = cfg.reward_table();
    info!(
        algorithms = rewards.entries().len(),
        as_of = %rewards.as_of(),
        "Reward table loaded (reference prices are not live)"
    );
    let symbols = rewards.coin_symbols();

    let state = Arc::new(ApiState::new(
        ProfitabilityEngine::new(rewards),
        cfg.calculator.clone(),
        cfg.price_feed.max_quote_age_secs,
    ));

    let price_source: Option<Box<dyn PriceSource>> = if cfg.price_feed.enabled {
        let api_key = cfg
            .price_feed
            .api_key_env
            .as_deref()
            .and_then(|env| AppConfig::resolve_env(env).ok())
            .map(SecretString::new);
        if api_key.is_none() {
            info!("No CoinGecko API key configured, using the public tier");
        }
        let source: Box<dyn PriceSource> =
            Box::new(CoinGeckoSource::new(cfg.price_feed.base_url.clone(), api_key)?);
        Some(source)
    } else {
        warn!("Price feed disabled; projections use reference prices unless overridden");
        None
    };

    // -- API server ------------------------------------------------------

    let mut server = tokio::spawn(api::serve(state.clone(), cfg.server.port));

    // -- Main loop -------------------------------------------------------

    let refresh_secs = cfg.price_feed.refresh_interval_secs.max(1);
    let mut interval = tokio::time::interval(Duration::from_secs(refresh_secs));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(
        refresh_secs,
        "Entering main loop. Press Ctrl+C to stop."
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Some(source) = &price_source {
                    // Failure is logged inside; previous quotes stay valid
                    // until they age out.
                    if let Ok(n) = refresh_price_book(source.as_ref(), &state.price_book, &symbols).await {
                        if n == 0 {
                            warn!("Price refresh returned no usable quotes");
                        }
                    }
                }
            }
            res = &mut server => {
                match res {
                    Ok(Ok(())) => info!("API server stopped."),
                    Ok(Err(e)) => {
                        error!(error = %e, "API server failed");
                        return Err(e);
                    }
                    Err(e) => {
                        error!(error = %e, "API server task panicked");
                        return Err(e.into());
                    }
                }
                break;
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received.");
                break;
            }
        }
    }

    let quotes = state.price_book.read().await.len();
    info!(quotes, "HASHPROFIT shut down cleanly.");

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hashprofit=info"));

    let json_logging = std::env::var("HASHPROFIT_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
