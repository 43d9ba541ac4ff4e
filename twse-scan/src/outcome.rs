//! Typed stage results
//!
//! Every stage of the scan returns one of three outcomes instead of raising:
//! data, a legitimate absence of data (e.g. a non-trading day), or a failure
//! with its cause. Callers usually render the last two the same way but can
//! still tell them apart in logs.

use crate::error::MarketDataError;
use std::fmt;

/// Why a well-formed request produced nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoDataReason {
    /// Body shorter than the minimum report length (holiday or placeholder page)
    ShortReport { len: usize, min: usize },
    /// Header found but no security rows followed it
    NoRows,
}

impl fmt::Display for NoDataReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoDataReason::ShortReport { len, min } => write!(
                f,
                "report has {} characters, below the {} expected for a trading day",
                len, min
            ),
            NoDataReason::NoRows => f.write_str("report contains no security rows"),
        }
    }
}

/// Result of a scan stage
#[derive(Debug, Clone)]
pub enum ScanOutcome<T> {
    Data(T),
    NoData(NoDataReason),
    Failed(MarketDataError),
}

impl<T> ScanOutcome<T> {
    /// Transform the payload, keeping absence and failure as they are
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ScanOutcome<U> {
        match self {
            ScanOutcome::Data(data) => ScanOutcome::Data(f(data)),
            ScanOutcome::NoData(reason) => ScanOutcome::NoData(reason),
            ScanOutcome::Failed(err) => ScanOutcome::Failed(err),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ScanOutcome::Data(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            ScanOutcome::Data(data) => Some(data),
            _ => None,
        }
    }

    /// Short machine-readable status: "ok", "no_data" or "error"
    pub fn status(&self) -> &'static str {
        match self {
            ScanOutcome::Data(_) => "ok",
            ScanOutcome::NoData(_) => "no_data",
            ScanOutcome::Failed(_) => "error",
        }
    }

    /// Human-readable reason when there is no payload
    pub fn unavailable_reason(&self) -> Option<String> {
        match self {
            ScanOutcome::Data(_) => None,
            ScanOutcome::NoData(reason) => Some(reason.to_string()),
            ScanOutcome::Failed(err) => Some(err.to_string()),
        }
    }
}

impl<T> From<MarketDataError> for ScanOutcome<T> {
    fn from(err: MarketDataError) -> Self {
        ScanOutcome::Failed(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_keeps_absence() {
        let outcome: ScanOutcome<u32> = ScanOutcome::NoData(NoDataReason::NoRows);
        let mapped = outcome.map(|v| v * 2);
        assert_eq!(mapped.status(), "no_data");
        assert!(mapped.data().is_none());

        let mapped = ScanOutcome::Data(21).map(|v| v * 2);
        assert_eq!(mapped.into_data(), Some(42));
    }

    #[test]
    fn test_failure_reason() {
        let outcome: ScanOutcome<()> = MarketDataError::Timeout(15).into();
        assert_eq!(outcome.status(), "error");
        assert_eq!(outcome.unavailable_reason().as_deref(), Some("Request timed out after 15s"));
    }
}
