//! Indicator table for one symbol

use crate::report::fmt_opt;
use crate::scanner::StockChart;
use std::fmt::Write;

/// Render the last `tail` rows of a chart's indicator series
pub fn format_chart(chart: &StockChart, tail: usize) -> String {
    let mut out = format!("\n{} ({} daily bars, {})\n", chart.symbol, chart.bars.len(), chart.range);
    if chart.indicators.is_empty() {
        out.push_str("No history available.\n");
        return out;
    }

    let ma_windows: Vec<usize> = chart.indicators.moving_averages.keys().copied().collect();
    let bias_windows: Vec<usize> = chart.indicators.bias.keys().copied().collect();

    let _ = write!(out, "{:<10} {:>9}", "Date", "Close");
    for w in &ma_windows {
        let _ = write!(out, " {:>9}", format!("MA{}", w));
    }
    for w in &bias_windows {
        let _ = write!(out, " {:>8}", format!("BIAS{}", w));
    }
    let _ = writeln!(out, " {:>8} {:>8} {:>8}", "DIF", "MACD", "OSC");

    for point in chart.indicators.tail(tail) {
        let _ = write!(out, "{:<10} {:>9.2}", point.date, point.close);
        for (_, v) in &point.moving_averages {
            let _ = write!(out, " {:>9}", fmt_opt(*v, 2));
        }
        for (_, v) in &point.bias {
            let _ = write!(out, " {:>8}", fmt_opt(*v, 2));
        }
        let _ = writeln!(
            out,
            " {:>8.3} {:>8.3} {:>8.3}",
            point.dif, point.signal, point.histogram
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndicatorConfig;
    use crate::data::{BarSeries, DailyBar, HistoryRange};
    use crate::indicators::compute_indicators;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn test_format_chart() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars: BarSeries = (0..25)
            .map(|i| {
                let c = 100.0 + i as f64;
                DailyBar::new(start + Duration::days(i), c, c, c, c, 1.0)
            })
            .collect::<Vec<_>>()
            .into();
        let indicators = compute_indicators(&bars, &IndicatorConfig::default()).unwrap();
        let chart = StockChart {
            symbol: "2330".to_string(),
            range: HistoryRange::SixMonths,
            bars,
            indicators,
        };

        let text = format_chart(&chart, 3);
        assert!(text.contains("MA20"));
        assert!(text.contains("BIAS60"));
        assert!(text.contains("2024-01-25"));
        assert!(!text.contains("2024-01-22"));
    }

    #[test]
    fn test_format_empty_chart() {
        let chart = StockChart {
            symbol: "0000".to_string(),
            range: HistoryRange::OneYear,
            bars: BarSeries::new(),
            indicators: Default::default(),
        };
        assert!(format_chart(&chart, 5).contains("No history available."));
    }
}
