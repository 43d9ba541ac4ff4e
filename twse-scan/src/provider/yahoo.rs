//! Yahoo Finance daily history provider.
//!
//! Bare TWSE codes are listed on Yahoo with a `.TW` suffix.

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use tracing::{debug, info, warn};
use yahoo_finance_api as yahoo;

use crate::config::HttpSettings;
use crate::data::{BarInterval, DailyBar, HistoryRange};
use crate::error::MarketDataError;
use crate::provider::{within_timeout, HistoryProvider};

/// Taipei is UTC+8 with no daylight saving
const TAIPEI_OFFSET_SECS: i64 = 8 * 3600;

/// Daily bars through `yahoo_finance_api`
pub struct YahooHistoryProvider {
    connector: yahoo::YahooConnector,
    timeout_secs: u64,
}

impl YahooHistoryProvider {
    pub fn new(settings: &HttpSettings) -> crate::Result<Self> {
        let connector = yahoo::YahooConnector::new().context("Failed to initialize Yahoo connector")?;
        Ok(Self {
            connector,
            timeout_secs: settings.timeout_secs,
        })
    }
}

/// Map an exchange code to Yahoo's listing symbol; symbols that already
/// carry a suffix or are indices pass through.
pub fn yahoo_symbol(symbol: &str) -> String {
    let symbol = symbol.trim();
    if symbol.contains('.') || symbol.starts_with('^') {
        symbol.to_string()
    } else {
        format!("{}.TW", symbol.to_uppercase())
    }
}

/// Unknown symbols and empty ranges become an empty history; a failed fetch
/// keeps its HTTP status when the message carries one.
fn history_or_error(err: yahoo::YahooError, symbol: &str) -> Result<Vec<DailyBar>, MarketDataError> {
    match err {
        yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult => {
            debug!("Yahoo has no history for {}", symbol);
            Ok(Vec::new())
        }
        yahoo::YahooError::FetchFailed(message) => {
            let status = message
                .split_whitespace()
                .next()
                .and_then(|code| code.parse::<u16>().ok());
            match status {
                Some(404) => {
                    debug!("Yahoo has no listing for {}", symbol);
                    Ok(Vec::new())
                }
                Some(code) => Err(MarketDataError::HttpStatus(code)),
                None => Err(MarketDataError::Transport(message)),
            }
        }
        other => Err(MarketDataError::Transport(other.to_string())),
    }
}

/// Build a bar dated in exchange-local time; `None` for non-finite prices or
/// an out-of-range timestamp.
fn local_bar(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Option<DailyBar> {
    if ![open, high, low, close].iter().all(|v| v.is_finite()) {
        return None;
    }
    let date = local_date(timestamp, TAIPEI_OFFSET_SECS)?;
    Some(DailyBar::new(date, open, high, low, close, volume))
}

fn local_date(ts: i64, offset_secs: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts + offset_secs, 0).map(|dt| dt.date_naive())
}

#[async_trait]
impl HistoryProvider for YahooHistoryProvider {
    fn name(&self) -> &'static str {
        "YAHOO"
    }

    async fn fetch_bars(
        &self,
        symbol: &str,
        range: HistoryRange,
        interval: BarInterval,
    ) -> Result<Vec<DailyBar>, MarketDataError> {
        let ysym = yahoo_symbol(symbol);
        info!("Fetching {} history for {} ({})", range, ysym, interval.as_str());

        let request = self
            .connector
            .get_quote_range(&ysym, interval.as_str(), range.as_str());
        let response = match within_timeout(self.timeout_secs, request).await? {
            Ok(response) => response,
            Err(e) => return history_or_error(e, &ysym),
        };

        let quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(e) => return history_or_error(e, &ysym),
        };

        let total = quotes.len();
        let bars: Vec<DailyBar> = quotes
            .iter()
            .filter_map(|q| local_bar(q.timestamp as i64, q.open, q.high, q.low, q.close, q.volume as f64))
            .collect();
        if bars.len() < total {
            warn!("Skipped {} unusable quotes for {}", total - bars.len(), ysym);
        }

        debug!("Received {} bars for {}", bars.len(), ysym);
        Ok(bars)
    }
}
