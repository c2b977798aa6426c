//! End-to-end projection scenarios through the public API.

use hashprofit::format::format_break_even;
use hashprofit::types::{
    BreakEven, CalculatorInputs, HashrateUnit, MinerListing, PriceSourceKind,
};
use hashprofit::{compute_projection, lookup_reward, parse_hashrate, parse_power, ProfitabilityEngine};

fn listing(name: &str, hashrate: &str, power: &str, algorithm: &str, price: f64) -> MinerListing {
    MinerListing {
        name: Some(name.to_string()),
        hashrate: hashrate.to_string(),
        power: power.to_string(),
        algorithm: algorithm.to_string(),
        price,
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_parse_examples() {
    let h = parse_hashrate("234 TH/s");
    assert_eq!(h.value, 234.0);
    assert_eq!(h.unit, HashrateUnit::TeraHash);

    let garbage = parse_hashrate("garbage");
    assert_eq!(garbage.value, 0.0);
    assert_eq!(garbage.unit, HashrateUnit::TeraHash);

    assert_eq!(parse_power("3250W").watts, 3250.0);
    assert_eq!(parse_power("n/a").watts, 0.0);
}

#[test]
fn test_reference_miner_scenario() {
    let result = compute_projection(
        &parse_hashrate("100 TH/s"),
        &parse_power("3500W"),
        lookup_reward("SHA256"),
        &CalculatorInputs::new(0.08),
        4_000.0,
    );

    assert!(close(result.daily_power_kwh, 84.0));
    assert!(close(result.daily_electricity_cost_usd, 6.72));
    assert!(close(result.daily_coin_earnings, 0.000435));
    assert!(close(result.daily_revenue_usd, 42.63));
    assert!((result.daily_profit_usd - 35.91).abs() < 1e-6);
    assert!(result.is_profitable);
    assert_eq!(result.break_even_days, BreakEven::Days(112));
}

#[test]
fn test_expensive_power_flips_sign_near_break_even() {
    let reward = lookup_reward("SHA256");
    let h = parse_hashrate("100 TH/s");
    let p = parse_power("3500W");

    let at_050 = compute_projection(&h, &p, reward, &CalculatorInputs::new(0.50), 4_000.0);
    assert!(close(at_050.daily_electricity_cost_usd, 42.0));
    assert!(at_050.is_profitable);

    let above = compute_projection(&h, &p, reward, &CalculatorInputs::new(0.51), 4_000.0);
    assert!(!above.is_profitable);
    assert!(above.daily_profit_usd < 0.0);
    assert_eq!(above.break_even_days, BreakEven::Never);
    assert_eq!(format_break_even(above.break_even_days), "Never");
}

#[test]
fn test_free_hardware_breaks_even_immediately() {
    let result = compute_projection(
        &parse_hashrate("100 TH/s"),
        &parse_power("3500W"),
        lookup_reward("SHA256"),
        &CalculatorInputs::new(0.08),
        0.0,
    );
    assert_eq!(result.break_even_days, BreakEven::Days(0));
    assert_eq!(result.roi_percent, 0.0);
}

#[test]
fn test_unknown_algorithm_uses_sha256_figures() {
    let engine = ProfitabilityEngine::default();
    let projection = engine
        .evaluate(
            &listing("mystery", "100 TH/s", "3500W", "NotAnAlgorithm", 4_000.0),
            &CalculatorInputs::new(0.08),
        )
        .unwrap();
    assert_eq!(projection.algorithm, "SHA256");
    assert_eq!(projection.reward.coin_symbol, "BTC");
    assert!((projection.result.daily_profit_usd - 35.91).abs() < 1e-6);
}

#[test]
fn test_unparseable_listing_still_projects() {
    let engine = ProfitabilityEngine::default();
    let projection = engine
        .evaluate(
            &listing("broken", "coming soon", "tbd", "SHA256", 1_000.0),
            &CalculatorInputs::new(0.08),
        )
        .unwrap();
    assert_eq!(projection.result.daily_revenue_usd, 0.0);
    assert_eq!(projection.result.daily_electricity_cost_usd, 0.0);
    assert!(!projection.result.is_profitable);
    assert!(projection.result.break_even_days.is_never());
}

#[test]
fn test_override_price_changes_revenue_only() {
    let engine = ProfitabilityEngine::default();
    let miner = listing("S21", "100 TH/s", "3500W", "SHA256", 4_000.0);

    let base = engine.evaluate(&miner, &CalculatorInputs::new(0.08)).unwrap();
    let doubled = engine
        .evaluate(&miner, &CalculatorInputs::new(0.08).with_coin_price(196_000.0))
        .unwrap();

    assert_eq!(doubled.price_source, PriceSourceKind::Override);
    assert!(close(doubled.result.daily_revenue_usd, base.result.daily_revenue_usd * 2.0));
    assert!(close(
        doubled.result.daily_electricity_cost_usd,
        base.result.daily_electricity_cost_usd
    ));
}

#[test]
fn test_rank_mixed_catalog() {
    let engine = ProfitabilityEngine::default();
    let catalog = vec![
        listing("L7", "9.5 GH/s", "3425W", "Scrypt", 6_000.0),
        listing("S21 XP", "270 TH/s", "3645W", "SHA-256", 7_500.0),
        listing("S19", "95 TH/s", "3250W", "SHA256", 900.0),
        listing("Z15", "840 ksol/s", "2780W", "Equihash", 4_000.0),
    ];

    let ranked = engine.rank(&catalog, &CalculatorInputs::new(0.08)).unwrap();
    assert_eq!(ranked.len(), 4);
    for pair in ranked.windows(2) {
        assert!(pair[0].result.daily_profit_usd >= pair[1].result.daily_profit_usd);
    }
    assert_eq!(ranked[0].listing.name.as_deref(), Some("S21 XP"));
    assert_eq!(ranked[0].algorithm, "SHA256");
}

#[test]
fn test_no_nan_escapes_for_catalog_strings() {
    let engine = ProfitabilityEngine::default();
    let inputs = CalculatorInputs::new(0.12);
    for (h, p) in [
        ("0 TH/s", "0W"),
        ("", ""),
        ("1e400 TH/s", "3500W"),
        ("100TH/s", "3.5kW"),
        ("  42 gh  ", "1,200 W"),
    ] {
        let projection = engine
            .evaluate(&listing("x", h, p, "SHA256", 2_000.0), &inputs)
            .unwrap();
        let r = &projection.result;
        for v in [
            r.daily_power_kwh,
            r.daily_electricity_cost_usd,
            r.daily_coin_earnings,
            r.daily_revenue_usd,
            r.daily_profit_usd,
            r.monthly_profit_usd,
            r.yearly_profit_usd,
            r.roi_percent,
        ] {
            assert!(!v.is_nan(), "NaN for ({h:?}, {p:?})");
        }
    }
}
