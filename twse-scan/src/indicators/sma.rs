//! SMA (Simple Moving Average) indicator

use crate::error::MarketDataError;
use crate::indicators::{invalid_period, Indicator};
use ta::indicators::SimpleMovingAverage;
use ta::Next;

/// SMA indicator wrapper
///
/// `ta` averages over however many values it has seen; this wrapper withholds
/// the value until a full window is available.
#[derive(Debug)]
pub struct SMA {
    inner: SimpleMovingAverage,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl SMA {
    /// Create new SMA indicator
    pub fn new(period: usize) -> Result<Self, MarketDataError> {
        Ok(Self {
            inner: SimpleMovingAverage::new(period).map_err(|e| invalid_period("SMA", period, e))?,
            period,
            update_count: 0,
            last_value: None,
        })
    }
}

impl Indicator for SMA {
    fn name(&self) -> &str {
        "SMA"
    }

    fn update(&mut self, value: f64) {
        let sma_value = self.inner.next(value);
        self.update_count += 1;
        if self.update_count >= self.period {
            self.last_value = Some(sma_value);
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.update_count >= self.period
    }
}

/// Calculate SMA from a series of values; `None` until `period` values are in
pub fn calculate_sma(values: &[f64], period: usize) -> Result<Vec<Option<f64>>, MarketDataError> {
    let mut sma = SMA::new(period)?;
    let mut results = Vec::with_capacity(values.len());

    for &value in values {
        sma.update(value);
        results.push(sma.value());
    }

    Ok(results)
}
