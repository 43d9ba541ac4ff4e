//! Indicator engine: all chart series for one symbol in one pass

use crate::config::IndicatorConfig;
use crate::data::BarSeries;
use crate::error::MarketDataError;
use crate::indicators::{calculate_bias, calculate_macd, calculate_sma, MacdSeries};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Indicator series aligned to bar dates
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndicatorSeries {
    pub dates: Vec<NaiveDate>,
    pub closes: Vec<f64>,
    /// SMA by window length
    pub moving_averages: BTreeMap<usize, Vec<Option<f64>>>,
    /// Bias ratio by moving average window
    pub bias: BTreeMap<usize, Vec<Option<f64>>>,
    pub macd: MacdSeries,
}

/// One date's worth of indicator values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub close: f64,
    pub moving_averages: Vec<(usize, Option<f64>)>,
    pub bias: Vec<(usize, Option<f64>)>,
    pub dif: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn moving_average(&self, window: usize) -> Option<&[Option<f64>]> {
        self.moving_averages.get(&window).map(Vec::as_slice)
    }

    pub fn bias_ratio(&self, window: usize) -> Option<&[Option<f64>]> {
        self.bias.get(&window).map(Vec::as_slice)
    }

    /// Values at index `i`; `None` past the end of any core series
    pub fn point(&self, i: usize) -> Option<IndicatorPoint> {
        let date = *self.dates.get(i)?;
        let pick = |map: &BTreeMap<usize, Vec<Option<f64>>>| {
            map.iter()
                .map(|(w, values)| (*w, values.get(i).copied().flatten()))
                .collect::<Vec<_>>()
        };
        Some(IndicatorPoint {
            date,
            close: *self.closes.get(i)?,
            moving_averages: pick(&self.moving_averages),
            bias: pick(&self.bias),
            dif: *self.macd.dif.get(i)?,
            signal: *self.macd.signal.get(i)?,
            histogram: *self.macd.histogram.get(i)?,
        })
    }

    /// Most recent values
    pub fn latest(&self) -> Option<IndicatorPoint> {
        self.len().checked_sub(1).and_then(|i| self.point(i))
    }

    /// The last `n` points, oldest first
    pub fn tail(&self, n: usize) -> Vec<IndicatorPoint> {
        let start = self.len().saturating_sub(n);
        (start..self.len()).filter_map(|i| self.point(i)).collect()
    }
}

/// Computes [`IndicatorSeries`] for a validated [`IndicatorConfig`]
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    /// Create an engine; zero windows or spans are rejected here
    pub fn new(config: IndicatorConfig) -> Result<Self, MarketDataError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Compute every configured series. An empty input gives an empty result.
    pub fn compute(&self, bars: &BarSeries) -> Result<IndicatorSeries, MarketDataError> {
        let closes = bars.closes();

        let mut averages = BTreeMap::new();
        for window in self.config.all_windows() {
            averages.insert(window, calculate_sma(&closes, window)?);
        }

        let mut bias = BTreeMap::new();
        for &window in &self.config.bias_windows {
            if let Some(ma) = averages.get(&window) {
                bias.insert(window, calculate_bias(&closes, ma));
            }
        }

        // Bias-only windows are computed for the ratio but not reported as averages
        averages.retain(|window, _| self.config.ma_windows.contains(window));

        let macd = calculate_macd(
            &closes,
            self.config.macd_fast,
            self.config.macd_slow,
            self.config.macd_signal,
        )?;

        debug!(
            "Computed indicators over {} bars ({} averages, {} bias series)",
            closes.len(),
            averages.len(),
            bias.len()
        );

        Ok(IndicatorSeries {
            dates: bars.dates(),
            closes,
            moving_averages: averages,
            bias,
            macd,
        })
    }
}

/// Convenience wrapper: validate, then compute
pub fn compute_indicators(
    bars: &BarSeries,
    config: &IndicatorConfig,
) -> Result<IndicatorSeries, MarketDataError> {
    IndicatorEngine::new(config.clone())?.compute(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DailyBar;
    use chrono::Duration;

    fn bars(closes: &[f64]) -> BarSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| DailyBar::new(start + Duration::days(i as i64), c, c, c, c, 1000.0))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_empty_input_gives_empty_series() {
        let series = compute_indicators(&BarSeries::new(), &IndicatorConfig::default()).unwrap();
        assert!(series.is_empty());
        assert!(series.macd.is_empty());
        assert!(series.moving_averages.values().all(Vec::is_empty));
        assert!(series.bias.values().all(Vec::is_empty));
        assert!(series.latest().is_none());
    }

    #[test]
    fn test_series_are_parallel() {
        let closes: Vec<f64> = (1..=80).map(|i| 100.0 + i as f64).collect();
        let series = compute_indicators(&bars(&closes), &IndicatorConfig::default()).unwrap();

        assert_eq!(series.len(), 80);
        for window in [5, 10, 20, 60] {
            let ma = series.moving_average(window).unwrap();
            assert_eq!(ma.len(), 80);
            assert!(ma[..window - 1].iter().all(Option::is_none));
            assert!(ma[window - 1..].iter().all(Option::is_some));
        }
        for window in [20, 60] {
            assert_eq!(series.bias_ratio(window).unwrap().len(), 80);
        }
        assert_eq!(series.macd.len(), 80);
    }

    #[test]
    fn test_bias_against_window() {
        let config = IndicatorConfig {
            ma_windows: vec![5],
            bias_windows: vec![5],
            ..Default::default()
        };
        let series = compute_indicators(&bars(&[10.0, 20.0, 30.0, 40.0, 50.0]), &config).unwrap();
        let ma = series.moving_average(5).unwrap();
        assert!((ma[4].unwrap() - 30.0).abs() < 1e-9);

        let bias = series.bias_ratio(5).unwrap();
        assert_eq!(bias[3], None);
        let expected = (50.0 - 30.0) / 30.0 * 100.0;
        assert!((bias[4].unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_bias_only_window_not_reported_as_average() {
        let config = IndicatorConfig {
            ma_windows: vec![5],
            bias_windows: vec![3],
            ..Default::default()
        };
        let series = compute_indicators(&bars(&[1.0, 2.0, 3.0, 4.0, 5.0]), &config).unwrap();
        assert!(series.moving_average(3).is_none());
        assert!(series.bias_ratio(3).is_some());
    }

    #[test]
    fn test_latest_and_tail() {
        let series = compute_indicators(&bars(&[1.0, 2.0, 3.0]), &IndicatorConfig::default()).unwrap();
        let latest = series.latest().unwrap();
        assert_eq!(latest.close, 3.0);
        assert_eq!(latest.date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert!(latest.moving_averages.iter().all(|(_, v)| v.is_none()));

        let tail = series.tail(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].close, 2.0);
        assert_eq!(series.tail(10).len(), 3);
    }

    #[test]
    fn test_mismatched_series_do_not_panic() {
        let mut series = compute_indicators(&bars(&[1.0, 2.0, 3.0]), &IndicatorConfig::default()).unwrap();
        series.macd.signal.truncate(1);
        series.closes.truncate(2);

        assert!(series.point(0).is_some());
        assert!(series.point(1).is_none());
        assert!(series.point(2).is_none());
        assert!(series.latest().is_none());
        assert_eq!(series.tail(3).len(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = IndicatorConfig {
            macd_fast: 0,
            ..Default::default()
        };
        assert!(IndicatorEngine::new(config).is_err());
    }
}
