//! Unit parsing for free-form catalog spec strings.
//!
//! Catalog data is hand-entered ("234 TH/s", "S19 Pro 110TH", "3250W",
//! "3.5 kW") and not guaranteed well-formed. Parsing degrades to a zero
//! value instead of failing so the calculator never crashes on bad data.

use tracing::debug;

use crate::types::{HashrateSpec, HashrateUnit, PowerSpec};

// ---------------------------------------------------------------------------
// Unit tokens
// ---------------------------------------------------------------------------

/// Hashrate tokens, longest first so `KSol` wins over `KH`/`H`.
const HASHRATE_TOKENS: &[(&str, HashrateUnit)] = &[
    ("ksol", HashrateUnit::KiloSol),
    ("th", HashrateUnit::TeraHash),
    ("gh", HashrateUnit::GigaHash),
    ("mh", HashrateUnit::MegaHash),
    ("kh", HashrateUnit::KiloHash),
    ("h", HashrateUnit::Hash),
];

/// Power tokens with their multiplier to watts.
const POWER_TOKENS: &[(&str, f64)] = &[("kw", 1000.0), ("w", 1.0)];

// ---------------------------------------------------------------------------
// Parsers
// ---------------------------------------------------------------------------

/// Extract the first `<number> <unit>[/s]` hashrate from `raw`.
///
/// Returns [`HashrateSpec::ZERO`] (0 TH/s) when nothing matches.
pub fn parse_hashrate(raw: &str) -> HashrateSpec {
    let mut pos = 0;
    while let Some((value, end)) = next_number(raw, pos) {
        if let Some(unit) = match_token(&raw[end..], HASHRATE_TOKENS) {
            return HashrateSpec::new(value, unit);
        }
        pos = end;
    }

    debug!(raw, "Unparseable hashrate, defaulting to 0 TH/s");
    HashrateSpec::ZERO
}

/// Extract the first `<number> W` (or `kW`) power figure from `raw`.
///
/// Returns [`PowerSpec::ZERO`] when nothing matches.
pub fn parse_power(raw: &str) -> PowerSpec {
    let mut pos = 0;
    while let Some((value, end)) = next_number(raw, pos) {
        if let Some(multiplier) = match_token(&raw[end..], POWER_TOKENS) {
            let watts = value * multiplier;
            if watts.is_finite() {
                return PowerSpec::new(watts);
            }
        }
        pos = end;
    }

    debug!(raw, "Unparseable power, defaulting to 0 W");
    PowerSpec::ZERO
}

// ---------------------------------------------------------------------------
// Scanning helpers
// ---------------------------------------------------------------------------

/// Find the next `digits[.digits]` run at or after byte `from`.
///
/// Returns the parsed value and the byte index just past the number.
/// Runs that overflow to a non-finite `f64` are skipped.
fn next_number(raw: &str, from: usize) -> Option<(f64, usize)> {
    let bytes = raw.as_bytes();
    let mut start = from;

    loop {
        while start < bytes.len() && !bytes[start].is_ascii_digit() {
            start += 1;
        }
        if start >= bytes.len() {
            return None;
        }

        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        // Fractional part only when a digit follows the dot.
        if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
            end += 1;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
        }

        match raw[start..end].parse::<f64>() {
            Ok(value) if value.is_finite() => return Some((value, end)),
            _ => start = end,
        }
    }
}

/// Match one of `tokens` (case-insensitive) after optional whitespace.
fn match_token<T: Copy>(rest: &str, tokens: &[(&str, T)]) -> Option<T> {
    let trimmed = rest.trim_start();
    tokens.iter().find_map(|(token, value)| {
        trimmed
            .get(..token.len())
            .filter(|head| head.eq_ignore_ascii_case(token))
            .map(|_| *value)
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
