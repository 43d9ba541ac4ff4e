//! Data providers
//!
//! The scan needs two outside feeds: the exchange's daily report and a daily
//! bar history per symbol. Both sit behind traits so the pipeline can run
//! against in-memory fakes.

pub mod twse;
pub mod yahoo;

pub use twse::*;
pub use yahoo::*;

use crate::config::HttpSettings;
use crate::data::{BarInterval, DailyBar, HistoryRange};
use crate::error::MarketDataError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::future::Future;
use std::time::Duration;

/// Source of the exchange-wide daily report
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Fetch the decoded report text for `date`
    async fn fetch_report(&self, date: NaiveDate) -> Result<String, MarketDataError>;
}

/// Source of daily bar history for one symbol
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Fetch bars ascending by date; an unknown symbol yields an empty vector
    async fn fetch_bars(
        &self,
        symbol: &str,
        range: HistoryRange,
        interval: BarInterval,
    ) -> Result<Vec<DailyBar>, MarketDataError>;
}

/// Build the shared HTTP client
pub(crate) fn build_client(settings: &HttpSettings) -> crate::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .user_agent(settings.user_agent.as_str())
        .danger_accept_invalid_certs(settings.accept_invalid_certs)
        .build()?;
    Ok(client)
}

/// Classify a reqwest failure
pub(crate) fn classify_error(err: reqwest::Error, timeout_secs: u64) -> MarketDataError {
    if err.is_timeout() {
        MarketDataError::Timeout(timeout_secs)
    } else if let Some(status) = err.status() {
        MarketDataError::HttpStatus(status.as_u16())
    } else {
        MarketDataError::Transport(err.to_string())
    }
}

/// Bound a request that has no client-level timeout of its own
pub(crate) async fn within_timeout<F>(timeout_secs: u64, request: F) -> Result<F::Output, MarketDataError>
where
    F: Future,
{
    tokio::time::timeout(Duration::from_secs(timeout_secs), request)
        .await
        .map_err(|_| MarketDataError::Timeout(timeout_secs))
}
