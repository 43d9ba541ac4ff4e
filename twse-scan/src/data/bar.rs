//! Daily OHLCV bar structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Trading date (exchange local)
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume in shares
    pub volume: f64,
}

impl DailyBar {
    /// Create a new bar
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Date-ordered sequence of bars for one symbol
#[derive(Debug, Clone, Default, Serialize)]
pub struct BarSeries {
    bars: Vec<DailyBar>,
}

impl BarSeries {
    /// Create new empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from bars in any order; the series is kept ascending by date
    /// and a later bar for an already-seen date replaces the earlier one.
    pub fn from_vec(mut bars: Vec<DailyBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        let mut deduped: Vec<DailyBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => deduped.push(bar),
            }
        }
        Self { bars: deduped }
    }

    /// Append a bar; bars dated on or before the last bar are ignored
    pub fn push(&mut self, bar: DailyBar) -> bool {
        if let Some(last) = self.bars.last() {
            if bar.date <= last.date {
                return false;
            }
        }
        self.bars.push(bar);
        true
    }

    /// Get number of bars
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if series is empty
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get last bar
    pub fn last(&self) -> Option<&DailyBar> {
        self.bars.last()
    }

    /// Get close prices as vector
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Get dates as vector
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }
}

impl From<Vec<DailyBar>> for BarSeries {
    fn from(bars: Vec<DailyBar>) -> Self {
        Self::from_vec(bars)
    }
}
