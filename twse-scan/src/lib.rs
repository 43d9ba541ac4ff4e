//! TWSE-Scan: a momentum scanner for the Taiwan Stock Exchange
//!
//! This crate turns the exchange's daily `MI_INDEX` report into a short list
//! of high-turnover, high-momentum stocks and computes chart indicators for
//! them using:
//! - [reqwest](https://github.com/seanmonstar/reqwest) for the report and history feeds
//! - [ta-rs](https://github.com/greyblake/ta-rs) for technical analysis
//!
//! # Features
//!
//! - **Snapshot Loading**: Big5/UTF-8 CSV report parsing and percent-change derivation
//! - **Ranking**: Turnover top-N with a strict momentum threshold
//! - **Technical Indicators**: SMA, bias ratio, EMA, MACD
//! - **Providers**: TWSE report source and Yahoo chart history behind traits
//!
//! # Example
//!
//! ```no_run
//! use twse_scan::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let http = HttpSettings::default();
//!     let scanner = Scanner::new(TwseReportSource::new(&http)?, ScanConfig::default());
//!     if let ScanOutcome::Data(selection) = scanner.scan(default_scan_date()).await {
//!         let history = YahooHistoryProvider::new(&http)?;
//!         let charts = chart_selection(&history, &selection, HistoryRange::TwoYears, &IndicatorConfig::default()).await;
//!         println!("{} charts", charts.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod outcome;
pub mod provider;
pub mod ranking;
pub mod report;
pub mod scanner;
pub mod snapshot;

// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{HttpSettings, IndicatorConfig, ScanConfig};
    pub use crate::data::{default_scan_date, BarInterval, BarSeries, DailyBar, HistoryRange};
    pub use crate::error::MarketDataError;
    pub use crate::indicators::{
        compute_indicators, IndicatorEngine, IndicatorPoint, IndicatorSeries, MacdSeries,
    };
    pub use crate::outcome::{NoDataReason, ScanOutcome};
    pub use crate::provider::{HistoryProvider, SnapshotSource, TwseReportSource, YahooHistoryProvider};
    pub use crate::ranking::{rank_rows, rank_snapshot, sector_breakdown, RankedSelection, SectorSummary};
    pub use crate::report::{format_chart, SelectionReport};
    pub use crate::scanner::{chart_selection, load_chart, Scanner, StockChart};
    pub use crate::snapshot::{
        decode_report, parse_report, ChangeDirection, PriceChange, Snapshot, SnapshotRow,
    };

    pub use anyhow::{Context, Result};
}

/// Result type alias
pub type Result<T> = anyhow::Result<T>;
