//! Per-symbol chart stage

use crate::config::IndicatorConfig;
use crate::data::{BarInterval, BarSeries, HistoryRange};
use crate::indicators::{IndicatorEngine, IndicatorSeries};
use crate::outcome::ScanOutcome;
use crate::provider::HistoryProvider;
use crate::ranking::RankedSelection;
use serde::Serialize;
use tracing::{info, warn};

/// Bars and indicators for one symbol
#[derive(Debug, Clone, Serialize)]
pub struct StockChart {
    pub symbol: String,
    pub range: HistoryRange,
    pub bars: BarSeries,
    pub indicators: IndicatorSeries,
}

impl StockChart {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Fetch history for `symbol` and compute its indicators.
///
/// A symbol the provider does not know gives an empty chart, not a failure.
pub async fn load_chart<H>(
    provider: &H,
    symbol: &str,
    range: HistoryRange,
    config: &IndicatorConfig,
) -> ScanOutcome<StockChart>
where
    H: HistoryProvider + ?Sized,
{
    let engine = match IndicatorEngine::new(config.clone()) {
        Ok(engine) => engine,
        Err(e) => return ScanOutcome::Failed(e),
    };

    let bars = match provider.fetch_bars(symbol, range, BarInterval::Daily).await {
        Ok(bars) => BarSeries::from_vec(bars),
        Err(e) => {
            warn!("{} history for {} unavailable: {}", provider.name(), symbol, e);
            return ScanOutcome::Failed(e);
        }
    };

    if bars.is_empty() {
        info!("No history for {} over {}", symbol, range);
    }

    match engine.compute(&bars) {
        Ok(indicators) => ScanOutcome::Data(StockChart {
            symbol: symbol.to_string(),
            range,
            bars,
            indicators,
        }),
        Err(e) => ScanOutcome::Failed(e),
    }
}

/// Chart every symbol of a selection, one after another, in selection order
pub async fn chart_selection<H>(
    provider: &H,
    selection: &RankedSelection,
    range: HistoryRange,
    config: &IndicatorConfig,
) -> Vec<(String, ScanOutcome<StockChart>)>
where
    H: HistoryProvider + ?Sized,
{
    let mut charts = Vec::with_capacity(selection.len());
    for row in &selection.rows {
        let outcome = load_chart(provider, &row.symbol, range, config).await;
        charts.push((row.symbol.clone(), outcome));
    }
    charts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DailyBar;
    use crate::error::MarketDataError;
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate};

    struct FakeHistory;

    #[async_trait]
    impl HistoryProvider for FakeHistory {
        fn name(&self) -> &'static str {
            "FAKE"
        }

        async fn fetch_bars(
            &self,
            symbol: &str,
            _range: HistoryRange,
            _interval: BarInterval,
        ) -> Result<Vec<DailyBar>, MarketDataError> {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            match symbol {
                "2330" => Ok((0..30)
                    .rev()
                    .map(|i| {
                        let c = 500.0 + i as f64;
                        DailyBar::new(start + Duration::days(i), c, c, c, c, 1.0)
                    })
                    .collect()),
                "DOWN" => Err(MarketDataError::Transport("connection reset".to_string())),
                _ => Ok(Vec::new()),
            }
        }
    }

    #[tokio::test]
    async fn test_load_chart_sorts_bars() {
        let outcome = load_chart(&FakeHistory, "2330", HistoryRange::SixMonths, &IndicatorConfig::default()).await;
        let chart = outcome.into_data().unwrap();
        assert_eq!(chart.bars.len(), 30);
        assert_eq!(chart.indicators.len(), 30);
        assert_eq!(chart.indicators.closes[0], 500.0);
        assert!(chart.indicators.dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_unknown_symbol_gives_empty_chart() {
        let outcome = load_chart(&FakeHistory, "0000", HistoryRange::SixMonths, &IndicatorConfig::default()).await;
        let chart = outcome.into_data().unwrap();
        assert!(chart.is_empty());
        assert!(chart.indicators.is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_is_failed_outcome() {
        let outcome = load_chart(&FakeHistory, "DOWN", HistoryRange::SixMonths, &IndicatorConfig::default()).await;
        assert!(matches!(outcome, ScanOutcome::Failed(MarketDataError::Transport(_))));
    }
}
