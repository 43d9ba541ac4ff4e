//! Turnover ranking with a momentum filter

use crate::snapshot::{Snapshot, SnapshotRow};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

/// Rows that made the top-N by turnover and beat the change threshold
#[derive(Debug, Clone, Serialize)]
pub struct RankedSelection {
    /// Scan date
    pub date: NaiveDate,
    /// Rows in the snapshot before ranking
    pub scanned: usize,
    /// Top-N cut used
    pub top_n: usize,
    /// Percent change threshold used
    pub min_change_pct: f64,
    /// Selected rows, turnover descending
    pub rows: Vec<SnapshotRow>,
}

impl RankedSelection {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.symbol.as_str()).collect()
    }
}

/// Descending turnover; rows without a turnover sort after all others
fn by_turnover_desc(a: &SnapshotRow, b: &SnapshotRow) -> Ordering {
    match (a.turnover, b.turnover) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort by turnover (stable on ties), keep the first `top_n`, then keep rows
/// whose percent change is strictly above `min_change_pct`.
pub fn rank_rows(rows: &[SnapshotRow], top_n: usize, min_change_pct: f64) -> Vec<SnapshotRow> {
    let mut ranked: Vec<&SnapshotRow> = rows.iter().collect();
    ranked.sort_by(|a, b| by_turnover_desc(a, b));

    ranked
        .into_iter()
        .take(top_n)
        .filter(|row| row.percent_change.is_some_and(|pct| pct > min_change_pct))
        .cloned()
        .collect()
}

/// Rank a whole snapshot
pub fn rank_snapshot(snapshot: &Snapshot, top_n: usize, min_change_pct: f64) -> RankedSelection {
    RankedSelection {
        date: snapshot.date,
        scanned: snapshot.len(),
        top_n,
        min_change_pct,
        rows: rank_rows(&snapshot.rows, top_n, min_change_pct),
    }
}
