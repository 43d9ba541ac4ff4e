//! Scan configuration

use serde::{Deserialize, Serialize};

/// Sector assigned when the report carries no sector column
pub const UNCLASSIFIED_SECTOR: &str = "一般股票";

/// Reports shorter than this are placeholder pages, not trading data
pub const MIN_REPORT_LEN: usize = 500;

/// Snapshot scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Number of rows kept after sorting by turnover
    pub top_n: usize,
    /// Percent change a row must strictly exceed (e.g., 3.0 = 3%)
    pub min_change_pct: f64,
    /// Minimum report length in characters
    pub min_report_len: usize,
    /// Sector used when the report has no sector column
    pub default_sector: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            top_n: 30,
            min_change_pct: 3.0,
            min_report_len: MIN_REPORT_LEN,
            default_sector: UNCLASSIFIED_SECTOR.to_string(),
        }
    }
}
