//! HASHPROFIT: mining hardware profitability engine
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod validation;
pub mod calculator;
pub mod format;
pub mod pricing;
pub mod api;

pub use calculator::projection::compute_projection;
pub use calculator::rewards::lookup_reward;
pub use calculator::units::{parse_hashrate, parse_power};
pub use calculator::ProfitabilityEngine;
