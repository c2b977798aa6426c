//! Live price feed flowing into projections.

use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use hashprofit::pricing::{refresh_price_book, PriceBook};
use hashprofit::types::{CalculatorInputs, MinerListing, PriceSourceKind};
use hashprofit::ProfitabilityEngine;

use crate::mock_price_source::MockPriceSource;

fn s21() -> MinerListing {
    MinerListing {
        name: Some("Antminer S21".to_string()),
        hashrate: "100 TH/s".to_string(),
        power: "3500W".to_string(),
        algorithm: "SHA256".to_string(),
        price: 4_000.0,
    }
}

fn symbols() -> Vec<String> {
    ProfitabilityEngine::default().rewards().coin_symbols()
}

#[tokio::test]
async fn test_refresh_then_evaluate_uses_live_quote() {
    let source = MockPriceSource::new(&[("BTC", 50_000.0), ("LTC", 80.0)]);
    let book = RwLock::new(PriceBook::new());

    let accepted = refresh_price_book(&source, &book, &symbols()).await.unwrap();
    assert_eq!(accepted, 2);

    let engine = ProfitabilityEngine::default();
    let guard = book.read().await;
    let now = Utc::now();
    let projection = engine
        .evaluate_with(&s21(), &CalculatorInputs::new(0.08), |sym| {
            guard.quote(sym, Duration::minutes(30), now)
        })
        .unwrap();

    assert_eq!(projection.price_source, PriceSourceKind::Live);
    assert_eq!(projection.coin_price_usd, 50_000.0);
    assert!((projection.result.daily_revenue_usd - 21.75).abs() < 1e-9);
}

#[tokio::test]
async fn test_explicit_override_beats_live_quote() {
    let source = MockPriceSource::new(&[("BTC", 50_000.0)]);
    let book = RwLock::new(PriceBook::new());
    refresh_price_book(&source, &book, &symbols()).await.unwrap();

    let engine = ProfitabilityEngine::default();
    let guard = book.read().await;
    let now = Utc::now();
    let projection = engine
        .evaluate_with(
            &s21(),
            &CalculatorInputs::new(0.08).with_coin_price(120_000.0),
            |sym| guard.quote(sym, Duration::minutes(30), now),
        )
        .unwrap();

    assert_eq!(projection.price_source, PriceSourceKind::Override);
    assert_eq!(projection.coin_price_usd, 120_000.0);
}

#[tokio::test]
async fn test_stale_quote_falls_back_to_reference() {
    let source = MockPriceSource::new(&[("BTC", 50_000.0)]);
    let book = RwLock::new(PriceBook::new());
    refresh_price_book(&source, &book, &symbols()).await.unwrap();

    let engine = ProfitabilityEngine::default();
    let guard = book.read().await;
    let later = Utc::now() + Duration::hours(2);
    let projection = engine
        .evaluate_with(&s21(), &CalculatorInputs::new(0.08), |sym| {
            guard.quote(sym, Duration::minutes(30), later)
        })
        .unwrap();

    assert_eq!(projection.price_source, PriceSourceKind::Reference);
    assert_eq!(projection.coin_price_usd, 98_000.0);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_quotes() {
    let source = MockPriceSource::new(&[("BTC", 60_000.0)]);
    let book = RwLock::new(PriceBook::new());
    refresh_price_book(&source, &book, &symbols()).await.unwrap();

    source.set_price("BTC", 10.0);
    source.set_error("rate limited");
    assert!(refresh_price_book(&source, &book, &symbols()).await.is_err());
    assert_eq!(book.read().await.get("BTC").unwrap().usd, 60_000.0);

    source.clear_error();
    refresh_price_book(&source, &book, &symbols()).await.unwrap();
    assert_eq!(book.read().await.get("BTC").unwrap().usd, 10.0);
    assert_eq!(source.calls(), 3);
}

#[test]
fn test_invalid_live_quotes_are_discarded() {
    let source = MockPriceSource::new(&[("BTC", f64::NAN), ("KAS", -1.0), ("XMR", 180.0)]);
    let book = RwLock::new(PriceBook::new());

    let accepted = tokio_test::block_on(refresh_price_book(&source, &book, &symbols())).unwrap();
    assert_eq!(accepted, 1);

    let guard = book.blocking_read();
    assert!(guard.get("BTC").is_none());
    assert!(guard.get("KAS").is_none());
    assert_eq!(guard.get("XMR").unwrap().usd, 180.0);
}

#[tokio::test]
async fn test_rank_with_live_quotes_reorders() {
    let engine = ProfitabilityEngine::default();
    let catalog = vec![
        s21(),
        MinerListing {
            name: Some("KS5".to_string()),
            hashrate: "20 TH/s".to_string(),
            power: "3000W".to_string(),
            algorithm: "kHeavyHash".to_string(),
            price: 3_000.0,
        },
    ];
    let inputs = CalculatorInputs::new(0.08);

    let reference = engine.rank(&catalog, &inputs).unwrap();
    assert_eq!(reference[0].listing.name.as_deref(), Some("Antminer S21"));

    let source = MockPriceSource::new(&[("KAS", 1.0)]);
    let book = RwLock::new(PriceBook::new());
    refresh_price_book(&source, &book, &symbols()).await.unwrap();
    let guard = book.read().await;
    let now = Utc::now();
    let live = engine
        .rank_with(&catalog, &inputs, |sym| guard.quote(sym, Duration::minutes(30), now))
        .unwrap();

    assert_eq!(live[0].listing.name.as_deref(), Some("KS5"));
    assert_eq!(live[0].price_source, PriceSourceKind::Live);
    assert_eq!(live[1].price_source, PriceSourceKind::Reference);
}
