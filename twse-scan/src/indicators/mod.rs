//! Technical indicators module
//!
//! Provides technical analysis indicators using the `ta` crate.

pub mod bias;
pub mod ema;
pub mod engine;
pub mod macd;
pub mod sma;

pub use bias::*;
pub use ema::*;
pub use engine::*;
pub use macd::*;
pub use sma::*;

use crate::error::MarketDataError;

/// Indicator trait for all indicators
pub trait Indicator {
    /// Get the name of the indicator
    fn name(&self) -> &str;

    /// Update indicator with new value
    fn update(&mut self, value: f64);

    /// Get current indicator value
    fn value(&self) -> Option<f64>;

    /// Check if indicator is ready (has enough data)
    fn is_ready(&self) -> bool;
}

/// Map a `ta` construction error onto the crate's error type
pub(crate) fn invalid_period(name: &str, period: usize, err: ta::errors::TaError) -> MarketDataError {
    MarketDataError::InvalidConfig(format!("{} period {}: {:?}", name, period, err))
}
