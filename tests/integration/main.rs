//! Integration tests for the public calculator surface.

mod mock_price_source;
mod scenarios;
mod live_pricing;
