use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use twse_scan::data::HistoryRange;

use crate::commands;

#[derive(Parser)]
#[command(name = "twse")]
#[command(about = "TWSE momentum scanner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank one day's report by turnover and momentum
    Scan {
        /// Report date (YYYY-MM-DD); defaults to the latest weekday in Taipei
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// How many of the highest-turnover rows to consider
        #[arg(short, long)]
        top: Option<usize>,
        /// Keep rows whose percent change is strictly above this
        #[arg(short, long)]
        min_change: Option<f64>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Also chart every selected symbol
        #[arg(long)]
        chart: bool,
        /// History span for --chart
        #[arg(long, default_value = "6mo")]
        range: HistoryRange,
        /// Rows of indicator history to print per chart
        #[arg(long, default_value_t = 5)]
        tail: usize,
    },
    /// Show moving averages, bias and MACD for one symbol
    Chart {
        symbol: String,
        /// History span: 1mo, 3mo, 6mo, 1y, 2y, 5y
        #[arg(short, long, default_value = "6mo")]
        range: HistoryRange,
        /// Rows of indicator history to print
        #[arg(short, long, default_value_t = 20)]
        tail: usize,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show build information
    Version,
}

pub async fn run(cli: Cli, config: shared::Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Scan { date, top, min_change, json, chart, range, tail } => {
            let args = commands::scan::ScanArgs { date, top, min_change, json, chart, range, tail };
            commands::scan::run(&config, args).await
        }
        Commands::Chart { symbol, range, tail, json } => {
            commands::chart::run(&config, &symbol, range, tail, json).await
        }
        Commands::Version => {
            commands::version::run();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan_flags() {
        let cli = Cli::try_parse_from(["twse", "scan", "--date", "2024-06-07", "--top", "50", "--min-change", "4.5", "--json"]).unwrap();
        match cli.command {
            Commands::Scan { date, top, min_change, json, chart, range, .. } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 7));
                assert_eq!(top, Some(50));
                assert_eq!(min_change, Some(4.5));
                assert!(json);
                assert!(!chart);
                assert_eq!(range, HistoryRange::SixMonths);
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_parse_chart_range() {
        let cli = Cli::try_parse_from(["twse", "chart", "2330", "--range", "2y"]).unwrap();
        match cli.command {
            Commands::Chart { symbol, range, tail, json } => {
                assert_eq!(symbol, "2330");
                assert_eq!(range, HistoryRange::TwoYears);
                assert_eq!(tail, 20);
                assert!(!json);
            }
            _ => panic!("expected chart"),
        }
    }

    #[test]
    fn test_bad_range_rejected() {
        assert!(Cli::try_parse_from(["twse", "chart", "2330", "--range", "7w"]).is_err());
    }
}
