//! Snapshot row structures

use crate::snapshot::change::{derive_change, ChangeDirection};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

const NEWS_SEARCH_URL: &str = "https://www.google.com/search";

/// One traded security on the scan date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    /// Security code (e.g., "2330")
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Industry sector
    pub sector: String,
    /// Closing price
    pub close: Option<f64>,
    /// Traded value in TWD
    pub turnover: Option<f64>,
    /// Unsigned price change as reported
    pub change_magnitude: Option<f64>,
    pub direction: ChangeDirection,
    /// Price change with the direction applied
    pub signed_change: Option<f64>,
    /// Change relative to the previous close, in percent
    pub percent_change: Option<f64>,
}

impl SnapshotRow {
    /// Build a row and derive its signed and percent change
    pub fn new(
        symbol: String,
        name: String,
        sector: String,
        close: Option<f64>,
        turnover: Option<f64>,
        change_magnitude: Option<f64>,
        direction: ChangeDirection,
    ) -> Self {
        let change = derive_change(direction, change_magnitude, close);
        Self {
            symbol,
            name,
            sector,
            close,
            turnover,
            change_magnitude,
            direction,
            signed_change: change.signed,
            percent_change: change.percent,
        }
    }

    /// Google News search for this security
    pub fn news_search_url(&self) -> Option<String> {
        let query = format!("{} {} 新聞", self.symbol, self.name);
        Url::parse_with_params(NEWS_SEARCH_URL, &[("q", query.as_str()), ("tbm", "nws")])
            .ok()
            .map(String::from)
    }
}

/// All rows parsed from one day's report
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub rows: Vec<SnapshotRow>,
}

impl Snapshot {
    pub fn new(date: NaiveDate, rows: Vec<SnapshotRow>) -> Self {
        Self { date, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, symbol: &str) -> Option<&SnapshotRow> {
        self.rows.iter().find(|r| r.symbol == symbol)
    }
}
