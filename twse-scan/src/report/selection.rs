//! Scan result report

use crate::ranking::{sector_breakdown, RankedSelection, SectorSummary};
use crate::report::{fmt_opt, fmt_turnover};
use std::fmt::Write;

/// Selection report
#[derive(Debug)]
pub struct SelectionReport<'a> {
    selection: &'a RankedSelection,
    sectors: Vec<SectorSummary>,
}

impl<'a> SelectionReport<'a> {
    /// Create new report from a selection
    pub fn new(selection: &'a RankedSelection) -> Self {
        Self {
            selection,
            sectors: sector_breakdown(&selection.rows),
        }
    }

    /// Format report as string
    pub fn format(&self) -> String {
        let s = self.selection;
        let mut out = format!(
            r#"
Scan Results {}
========================
Rows Scanned: {}
Top N by Turnover: {}
Change Threshold: > {:.2}%
Selected: {}
"#,
            s.date, s.scanned, s.top_n, s.min_change_pct, s.len(),
        );

        if s.is_empty() {
            out.push_str("\nNo stocks met the criteria.\n");
            return out;
        }

        let _ = writeln!(
            out,
            "\n{:<8} {:<12} {:<12} {:>10} {:>9} {:>18}",
            "Symbol", "Name", "Sector", "Close", "Change%", "Turnover"
        );
        for row in &s.rows {
            let _ = writeln!(
                out,
                "{:<8} {:<12} {:<12} {:>10} {:>9} {:>18}",
                row.symbol,
                row.name,
                row.sector,
                fmt_opt(row.close, 2),
                fmt_opt(row.percent_change, 2),
                fmt_turnover(row.turnover),
            );
        }

        out.push_str("\nSectors\n-------\n");
        for sector in &self.sectors {
            let _ = writeln!(
                out,
                "{:<12} {:>3} stocks  turnover {:>18}  avg {:>7}%",
                sector.sector,
                sector.count,
                fmt_turnover(Some(sector.turnover)),
                fmt_opt(sector.mean_change_pct, 2),
            );
        }

        out.push_str("\nNews\n----\n");
        for row in &s.rows {
            if let Some(url) = row.news_search_url() {
                let _ = writeln!(out, "{} {}: {}", row.symbol, row.name, url);
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ChangeDirection, SnapshotRow};
    use chrono::NaiveDate;

    #[test]
    fn test_format_lists_rows_and_sectors() {
        let row = SnapshotRow::new(
            "2330".to_string(),
            "台積電".to_string(),
            "半導體業".to_string(),
            Some(105.0),
            Some(26_543_210_000.0),
            Some(5.0),
            ChangeDirection::Up,
        );
        let selection = RankedSelection {
            date: NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(),
            scanned: 1200,
            top_n: 30,
            min_change_pct: 3.0,
            rows: vec![row],
        };
        let report = SelectionReport::new(&selection);
        let text = report.format();

        assert!(text.contains("Scan Results 2024-06-07"));
        assert!(text.contains("Rows Scanned: 1200"));
        assert!(text.contains("26,543,210,000"));
        assert!(text.contains("5.00"));
        assert!(text.contains("tbm=nws"));
    }

    #[test]
    fn test_format_empty_selection() {
        let selection = RankedSelection {
            date: NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(),
            scanned: 10,
            top_n: 30,
            min_change_pct: 3.0,
            rows: Vec::new(),
        };
        let text = SelectionReport::new(&selection).format();
        assert!(text.contains("No stocks met the criteria."));
    }
}
