use anyhow::bail;
use chrono::NaiveDate;
use serde_json::json;
use twse_scan::prelude::*;

pub struct ScanArgs {
    pub date: Option<NaiveDate>,
    pub top: Option<usize>,
    pub min_change: Option<f64>,
    pub json: bool,
    pub chart: bool,
    pub range: HistoryRange,
    pub tail: usize,
}

pub async fn run(config: &shared::Config, args: ScanArgs) -> Result<()> {
    let http = config.http_settings();
    let mut scan_config = config.scan_config();
    if let Some(top) = args.top {
        scan_config.top_n = top;
    }
    if let Some(min_change) = args.min_change {
        scan_config.min_change_pct = min_change;
    }

    let date = args.date.unwrap_or_else(default_scan_date);
    let scanner = Scanner::new(TwseReportSource::new(&http)?, scan_config);

    let selection = match scanner.scan(date).await {
        ScanOutcome::Data(selection) => selection,
        ScanOutcome::NoData(reason) => {
            if args.json {
                println!("{}", json!({ "status": "no_data", "date": date, "reason": reason.to_string() }));
            } else {
                println!("No data for {}: {}", date, reason);
            }
            return Ok(());
        }
        ScanOutcome::Failed(e) => bail!("Scan for {} failed: {}", date, e),
    };

    let charts = if args.chart {
        let history = YahooHistoryProvider::new(&http)?;
        chart_selection(&history, &selection, args.range, &IndicatorConfig::default()).await
    } else {
        Vec::new()
    };

    if args.json {
        let charts: Vec<_> = charts
            .iter()
            .map(|(symbol, outcome)| match outcome {
                ScanOutcome::Data(chart) => json!({ "symbol": symbol, "status": "ok", "chart": chart }),
                other => json!({ "symbol": symbol, "status": other.status(), "reason": other.unavailable_reason() }),
            })
            .collect();
        let body = json!({
            "status": "ok",
            "selection": selection,
            "sectors": sector_breakdown(&selection.rows),
            "news": selection.rows.iter().map(|r| json!({ "symbol": r.symbol, "url": r.news_search_url() })).collect::<Vec<_>>(),
            "charts": charts,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("{}", SelectionReport::new(&selection).format());
    for (symbol, outcome) in &charts {
        match outcome {
            ScanOutcome::Data(chart) => println!("{}", format_chart(chart, args.tail)),
            other => println!("\n{}: {}", symbol, other.unavailable_reason().unwrap_or_default()),
        }
    }

    Ok(())
}
