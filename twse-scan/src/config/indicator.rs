//! Indicator engine configuration

use crate::error::MarketDataError;
use serde::{Deserialize, Serialize};

/// Which series the indicator engine produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Simple moving average windows (e.g., 5, 10, 20, 60)
    pub ma_windows: Vec<usize>,
    /// Windows whose moving average gets a bias ratio
    pub bias_windows: Vec<usize>,
    /// MACD fast EMA span
    pub macd_fast: usize,
    /// MACD slow EMA span
    pub macd_slow: usize,
    /// MACD signal EMA span
    pub macd_signal: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_windows: vec![5, 10, 20, 60],
            bias_windows: vec![20, 60],
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

impl IndicatorConfig {
    /// Reject zero-length windows and spans
    pub fn validate(&self) -> Result<(), MarketDataError> {
        if let Some(w) = self
            .ma_windows
            .iter()
            .chain(self.bias_windows.iter())
            .find(|w| **w == 0)
        {
            return Err(MarketDataError::InvalidConfig(format!(
                "moving average window must be positive, got {}",
                w
            )));
        }
        for (name, span) in [
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ] {
            if span == 0 {
                return Err(MarketDataError::InvalidConfig(format!(
                    "{} must be positive",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Every window the engine must average: MA windows plus bias windows, deduplicated
    pub fn all_windows(&self) -> Vec<usize> {
        let mut windows: Vec<usize> = self
            .ma_windows
            .iter()
            .chain(self.bias_windows.iter())
            .copied()
            .collect();
        windows.sort_unstable();
        windows.dedup();
        windows
    }
}
