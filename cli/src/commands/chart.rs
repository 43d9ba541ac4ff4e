use anyhow::bail;
use twse_scan::prelude::*;

pub async fn run(config: &shared::Config, symbol: &str, range: HistoryRange, tail: usize, json: bool) -> Result<()> {
    let history = YahooHistoryProvider::new(&config.http_settings())?;

    match load_chart(&history, symbol, range, &IndicatorConfig::default()).await {
        ScanOutcome::Data(chart) if json => println!("{}", serde_json::to_string_pretty(&chart)?),
        ScanOutcome::Data(chart) => println!("{}", format_chart(&chart, tail)),
        ScanOutcome::NoData(reason) => println!("No data for {}: {}", symbol, reason),
        ScanOutcome::Failed(e) => bail!("History for {} unavailable: {}", symbol, e),
    }

    Ok(())
}
