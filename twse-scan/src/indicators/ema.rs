//! EMA (Exponential Moving Average) indicator

use crate::error::MarketDataError;
use crate::indicators::{invalid_period, Indicator};
use ta::indicators::ExponentialMovingAverage;
use ta::Next;

/// EMA indicator wrapper
///
/// Seeded with the first value (`ema[0] = v[0]`), then
/// `ema[i] = v[i] * a + ema[i-1] * (1 - a)` with `a = 2 / (span + 1)`.
/// Defined from the first update on.
#[derive(Debug)]
pub struct EMA {
    inner: ExponentialMovingAverage,
    last_value: Option<f64>,
}

impl EMA {
    /// Create new EMA indicator
    pub fn new(period: usize) -> Result<Self, MarketDataError> {
        Ok(Self {
            inner: ExponentialMovingAverage::new(period)
                .map_err(|e| invalid_period("EMA", period, e))?,
            last_value: None,
        })
    }
}

impl Indicator for EMA {
    fn name(&self) -> &str {
        "EMA"
    }

    fn update(&mut self, value: f64) {
        self.last_value = Some(self.inner.next(value));
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.last_value.is_some()
    }
}

/// Calculate EMA from a series of values
pub fn calculate_ema(values: &[f64], period: usize) -> Result<Vec<f64>, MarketDataError> {
    let mut ema = EMA::new(period)?;
    let mut results = Vec::with_capacity(values.len());

    for &value in values {
        ema.update(value);
        if let Some(v) = ema.value() {
            results.push(v);
        }
    }

    Ok(results)
}
