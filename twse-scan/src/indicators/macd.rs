//! MACD (Moving Average Convergence Divergence) indicator

use crate::error::MarketDataError;
use crate::indicators::{invalid_period, Indicator};
use serde::Serialize;
use ta::indicators::{MovingAverageConvergenceDivergence, MovingAverageConvergenceDivergenceOutput};
use ta::Next;

/// MACD indicator wrapper
///
/// All three EMAs are first-value seeded, so every output is defined from the
/// first bar.
#[derive(Debug)]
pub struct MACD {
    inner: MovingAverageConvergenceDivergence,
    last_output: Option<MovingAverageConvergenceDivergenceOutput>,
}

impl MACD {
    /// Create new MACD indicator
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Result<Self, MarketDataError> {
        let inner = MovingAverageConvergenceDivergence::new(fast_period, slow_period, signal_period)
            .map_err(|e| {
                invalid_period(
                    "MACD",
                    fast_period.min(slow_period).min(signal_period),
                    e,
                )
            })?;
        Ok(Self {
            inner,
            last_output: None,
        })
    }

    /// Get MACD line value (fast EMA - slow EMA)
    pub fn macd(&self) -> Option<f64> {
        self.last_output.as_ref().map(|o| o.macd)
    }

    /// Get signal line value
    pub fn signal(&self) -> Option<f64> {
        self.last_output.as_ref().map(|o| o.signal)
    }

    /// Get histogram value (MACD - Signal)
    pub fn histogram(&self) -> Option<f64> {
        self.last_output.as_ref().map(|o| o.histogram)
    }
}

impl Indicator for MACD {
    fn name(&self) -> &str {
        "MACD"
    }

    fn update(&mut self, value: f64) {
        self.last_output = Some(self.inner.next(value));
    }

    fn value(&self) -> Option<f64> {
        self.macd()
    }

    fn is_ready(&self) -> bool {
        self.last_output.is_some()
    }
}

/// MACD lines, parallel to the input
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MacdSeries {
    /// Difference line (fast EMA - slow EMA)
    pub dif: Vec<f64>,
    /// EMA of the difference line
    pub signal: Vec<f64>,
    /// Oscillator (dif - signal)
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    pub fn len(&self) -> usize {
        self.dif.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dif.is_empty()
    }
}

/// Calculate MACD from a series of values
pub fn calculate_macd(
    values: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdSeries, MarketDataError> {
    let mut macd = MACD::new(fast_period, slow_period, signal_period)?;
    let mut series = MacdSeries {
        dif: Vec::with_capacity(values.len()),
        signal: Vec::with_capacity(values.len()),
        histogram: Vec::with_capacity(values.len()),
    };

    for &value in values {
        macd.update(value);
        if let (Some(dif), Some(signal), Some(histogram)) = (macd.macd(), macd.signal(), macd.histogram()) {
            series.dif.push(dif);
            series.signal.push(signal);
            series.histogram.push(histogram);
        }
    }

    Ok(series)
}
