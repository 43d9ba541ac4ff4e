//! Snapshot scanner

use crate::config::ScanConfig;
use crate::outcome::ScanOutcome;
use crate::provider::SnapshotSource;
use crate::ranking::{rank_snapshot, RankedSelection};
use crate::snapshot::{parse_report, Snapshot};
use chrono::NaiveDate;
use tracing::{error, info, warn};

/// Runs the snapshot stage against a report source
#[derive(Debug, Clone)]
pub struct Scanner<S> {
    source: S,
    config: ScanConfig,
}

impl<S: SnapshotSource> Scanner<S> {
    /// Create new scanner
    pub fn new(source: S, config: ScanConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Fetch and parse the report for `date`
    pub async fn load_snapshot(&self, date: NaiveDate) -> ScanOutcome<Snapshot> {
        self.load_snapshot_with(date, &self.config).await
    }

    async fn load_snapshot_with(&self, date: NaiveDate, config: &ScanConfig) -> ScanOutcome<Snapshot> {
        let text = match self.source.fetch_report(date).await {
            Ok(text) => text,
            Err(e) => {
                if e.is_transport() {
                    warn!("{} report for {} unreachable: {}", self.source.name(), date, e);
                } else {
                    error!("{} report for {} rejected: {}", self.source.name(), date, e);
                }
                return ScanOutcome::Failed(e);
            }
        };

        let outcome = parse_report(&text, config).map(|rows| Snapshot::new(date, rows));
        match &outcome {
            ScanOutcome::Data(snapshot) => info!("Loaded {} rows for {}", snapshot.len(), date),
            ScanOutcome::NoData(reason) => info!("No data for {}: {}", date, reason),
            ScanOutcome::Failed(e) => warn!("Report for {} could not be parsed: {}", date, e),
        }
        outcome
    }

    /// Scan `date` with the scanner's own configuration
    pub async fn scan(&self, date: NaiveDate) -> ScanOutcome<RankedSelection> {
        self.scan_with(date, &self.config).await
    }

    /// Scan `date` with a one-off configuration (e.g. per-request overrides)
    pub async fn scan_with(&self, date: NaiveDate, config: &ScanConfig) -> ScanOutcome<RankedSelection> {
        let outcome = self
            .load_snapshot_with(date, config)
            .await
            .map(|snapshot| rank_snapshot(&snapshot, config.top_n, config.min_change_pct));

        if let ScanOutcome::Data(selection) = &outcome {
            info!(
                "Selected {} of top {} by turnover above {:.2}% on {}: {:?}",
                selection.len(),
                selection.top_n,
                selection.min_change_pct,
                date,
                selection.symbols()
            );
        }
        outcome
    }
}
