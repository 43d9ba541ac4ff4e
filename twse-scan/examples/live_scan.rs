//! Example: scan today's TWSE report and chart the first selected stock

use twse_scan::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== TWSE-Scan Live Example ===\n");

    let http = HttpSettings::default();
    let scanner = Scanner::new(TwseReportSource::new(&http)?, ScanConfig::default());

    let date = default_scan_date();
    println!("Scanning report for {}...", date);

    let selection = match scanner.scan(date).await {
        ScanOutcome::Data(selection) => selection,
        other => {
            println!("Nothing to show: {}", other.unavailable_reason().unwrap_or_default());
            return Ok(());
        }
    };
    println!("{}", SelectionReport::new(&selection).format());

    let Some(first) = selection.rows.first() else {
        return Ok(());
    };

    println!("Loading six months of history for {}...", first.symbol);
    let history = YahooHistoryProvider::new(&http)?;
    let outcome = load_chart(&history, &first.symbol, HistoryRange::SixMonths, &IndicatorConfig::default()).await;
    match outcome {
        ScanOutcome::Data(chart) => println!("{}", format_chart(&chart, 10)),
        other => println!("Chart unavailable: {}", other.unavailable_reason().unwrap_or_default()),
    }

    Ok(())
}
