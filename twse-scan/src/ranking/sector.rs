//! Per-sector aggregation of a selection (the treemap view)

use crate::snapshot::SnapshotRow;
use serde::Serialize;
use std::collections::HashMap;

/// Aggregate figures for one sector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorSummary {
    pub sector: String,
    /// Number of selected rows in the sector
    pub count: usize,
    /// Sum of defined turnover values
    pub turnover: f64,
    /// Mean of defined percent changes
    pub mean_change_pct: Option<f64>,
    /// Symbols in selection order
    pub symbols: Vec<String>,
}

/// Group rows by sector, largest total turnover first; equal totals keep
/// first-appearance order.
pub fn sector_breakdown(rows: &[SnapshotRow]) -> Vec<SectorSummary> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<&str, Vec<&SnapshotRow>> = HashMap::new();

    for row in rows {
        let entry = groups.entry(row.sector.as_str()).or_default();
        if entry.is_empty() {
            order.push(row.sector.clone());
        }
        entry.push(row);
    }

    let mut summaries: Vec<SectorSummary> = order
        .into_iter()
        .map(|sector| {
            let members = groups.get(sector.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            let turnover = members.iter().filter_map(|r| r.turnover).sum();
            let changes: Vec<f64> = members.iter().filter_map(|r| r.percent_change).collect();
            let mean_change_pct = if changes.is_empty() {
                None
            } else {
                Some(changes.iter().sum::<f64>() / changes.len() as f64)
            };
            SectorSummary {
                count: members.len(),
                turnover,
                mean_change_pct,
                symbols: members.iter().map(|r| r.symbol.clone()).collect(),
                sector,
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.turnover
            .partial_cmp(&a.turnover)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    summaries
}
