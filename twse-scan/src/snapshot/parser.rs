//! `MI_INDEX` report parser
//!
//! The CSV download is several tables stacked in one file: index levels,
//! advance/decline counts and finally the per-security table. Only the last
//! one is wanted, so everything before its header line is dropped. Fields are
//! quoted, numbers carry thousands separators and some codes are written as
//! `="0050"` to stop spreadsheets from eating leading zeros.

use crate::config::ScanConfig;
use crate::error::MarketDataError;
use crate::outcome::{NoDataReason, ScanOutcome};
use crate::snapshot::change::ChangeDirection;
use crate::snapshot::row::SnapshotRow;
use csv::{ReaderBuilder, StringRecord};
use std::borrow::Cow;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Token that identifies the security table's header line
pub const HEADER_MARKER: &str = "\"證券代號\"";

/// Column names in the security table
pub mod columns {
    pub const SYMBOL: &str = "證券代號";
    pub const NAME: &str = "證券名稱";
    pub const SECTOR: &str = "產業別";
    pub const TURNOVER: &str = "成交金額";
    pub const CLOSE: &str = "收盤價";
    pub const DIRECTION: &str = "漲跌(+/-)";
    pub const CHANGE: &str = "漲跌價差";
}

/// Decode a report body: UTF-8 when valid, Big5 otherwise
pub fn decode_report(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (text, _, had_errors) = encoding_rs::BIG5.decode(bytes);
            if had_errors {
                warn!("Report body contained bytes invalid in both UTF-8 and Big5");
            }
            text
        }
    }
}

/// Strip quotes, thousands separators, the spreadsheet `=` prefix and whitespace
pub fn clean_field(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| *c != '"' && *c != ',').collect();
    let trimmed = cleaned.trim();
    trimmed.strip_prefix('=').unwrap_or(trimmed).trim().to_string()
}

/// Coerce a field to a number; placeholders such as `--` become `None`
pub fn parse_number(raw: &str) -> Option<f64> {
    clean_field(raw)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Column positions resolved from the header line
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    symbol: usize,
    name: usize,
    turnover: usize,
    close: usize,
    change: usize,
    sector: Option<usize>,
    direction: Option<usize>,
}

impl ColumnIndex {
    fn resolve(header: &StringRecord) -> Result<Self, MarketDataError> {
        let names: Vec<String> = header.iter().map(clean_field).collect();
        let find = |name: &str| names.iter().position(|n| n == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| MarketDataError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            symbol: require(columns::SYMBOL)?,
            name: require(columns::NAME)?,
            turnover: require(columns::TURNOVER)?,
            close: require(columns::CLOSE)?,
            change: require(columns::CHANGE)?,
            sector: find(columns::SECTOR),
            direction: find(columns::DIRECTION),
        })
    }

    /// Highest index a data record must reach
    fn required_width(&self) -> usize {
        [self.symbol, self.name, self.turnover, self.close, self.change]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// Parse a decoded report into snapshot rows.
///
/// Never fails hard: short bodies and empty tables come back as
/// [`ScanOutcome::NoData`], structural problems as [`ScanOutcome::Failed`].
/// Rows whose numbers do not parse are kept with those fields undefined.
pub fn parse_report(text: &str, config: &ScanConfig) -> ScanOutcome<Vec<SnapshotRow>> {
    let len = text.chars().count();
    if len < config.min_report_len {
        debug!("Report too short ({} < {})", len, config.min_report_len);
        return ScanOutcome::NoData(NoDataReason::ShortReport {
            len,
            min: config.min_report_len,
        });
    }

    let table = match text.find(HEADER_MARKER) {
        // Start at the beginning of the marker's line
        Some(pos) => {
            let line_start = text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
            &text[line_start..]
        }
        None => return ScanOutcome::Failed(MarketDataError::MissingHeader(HEADER_MARKER.to_string())),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(table.as_bytes());

    let header = match reader.headers() {
        Ok(header) => header.clone(),
        Err(e) => return ScanOutcome::Failed(e.into()),
    };
    let index = match ColumnIndex::resolve(&header) {
        Ok(index) => index,
        Err(e) => return ScanOutcome::Failed(e),
    };
    let width = index.required_width();

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable report record: {}", e);
                skipped += 1;
                continue;
            }
        };

        // Remarks and trailer lines are narrower than the table
        if record.len() < width {
            skipped += 1;
            continue;
        }

        let field = |i: usize| record.get(i).unwrap_or("");
        let symbol = clean_field(field(index.symbol));
        if symbol.is_empty() {
            skipped += 1;
            continue;
        }
        if !seen.insert(symbol.clone()) {
            debug!("Duplicate symbol {} in report, keeping first", symbol);
            continue;
        }

        let sector = index
            .sector
            .map(|i| clean_field(field(i)))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| config.default_sector.clone());
        let direction = ChangeDirection::from_field(index.direction.map(|i| field(i)));

        rows.push(SnapshotRow::new(
            symbol,
            clean_field(field(index.name)),
            sector,
            parse_number(field(index.close)),
            parse_number(field(index.turnover)),
            parse_number(field(index.change)),
            direction,
        ));
    }

    debug!("Parsed {} rows ({} skipped)", rows.len(), skipped);

    if rows.is_empty() {
        return ScanOutcome::NoData(NoDataReason::NoRows);
    }
    ScanOutcome::Data(rows)
}
