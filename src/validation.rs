//! Caller-facing input validation.
//!
//! The projection calculator assumes finite, non-negative inputs. Anything
//! coming from a user (slider, text box, API body) passes through here first;
//! violations are rejected, never clamped.

use crate::types::{CalculatorInputs, MinerListing};

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("Electricity cost must not be negative: {0}")]
    NegativeElectricityCost(f64),

    #[error("Electricity cost must be a finite number")]
    NonFiniteElectricityCost,

    #[error("Coin price override must not be negative: {0}")]
    NegativeCoinPrice(f64),

    #[error("Coin price override must be a finite number")]
    NonFiniteCoinPrice,

    #[error("Hardware price must not be negative: {0}")]
    NegativeHardwarePrice(f64),

    #[error("Hardware price must be a finite number")]
    NonFiniteHardwarePrice,
}

impl CalculatorInputs {
    /// Check electricity cost and the optional coin price override.
    pub fn validate(&self) -> Result<(), InputError> {
        let cost = self.electricity_cost_usd_per_kwh;
        if !cost.is_finite() {
            return Err(InputError::NonFiniteElectricityCost);
        }
        if cost < 0.0 {
            return Err(InputError::NegativeElectricityCost(cost));
        }

        if let Some(price) = self.coin_price_override_usd {
            if !price.is_finite() {
                return Err(InputError::NonFiniteCoinPrice);
            }
            if price < 0.0 {
                return Err(InputError::NegativeCoinPrice(price));
            }
        }

        Ok(())
    }
}

/// Check a catalog hardware price before it reaches break-even / ROI.
pub fn validate_hardware_price(price_usd: f64) -> Result<(), InputError> {
    if !price_usd.is_finite() {
        return Err(InputError::NonFiniteHardwarePrice);
    }
    if price_usd < 0.0 {
        return Err(InputError::NegativeHardwarePrice(price_usd));
    }
    Ok(())
}

impl MinerListing {
    pub fn validate(&self) -> Result<(), InputError> {
        validate_hardware_price(self.price)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
