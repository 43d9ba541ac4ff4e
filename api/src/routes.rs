use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use twse_scan::prelude::*;

pub struct AppState<S, H> {
    pub scanner: Scanner<S>,
    pub history: H,
    pub indicators: IndicatorConfig,
}

pub fn router<S, H>(state: Arc<AppState<S, H>>) -> Router
where
    S: SnapshotSource + 'static,
    H: HistoryProvider + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/scan", get(scan::<S, H>))
        .route("/api/indicators/:symbol", get(indicators::<S, H>))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ScanQuery {
    date: Option<NaiveDate>,
    top: Option<usize>,
    min_change: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct IndicatorQuery {
    range: Option<HistoryRange>,
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn scan<S, H>(
    State(state): State<Arc<AppState<S, H>>>,
    Query(query): Query<ScanQuery>,
) -> (StatusCode, Json<Value>)
where
    S: SnapshotSource,
    H: HistoryProvider,
{
    let date = query.date.unwrap_or_else(default_scan_date);
    let mut config = state.scanner.config().clone();
    if let Some(top) = query.top {
        config.top_n = top;
    }
    if let Some(min_change) = query.min_change {
        config.min_change_pct = min_change;
    }
    info!("Scan requested for {} (top {}, > {}%)", date, config.top_n, config.min_change_pct);

    match state.scanner.scan_with(date, &config).await {
        ScanOutcome::Data(selection) => {
            let rows: Vec<Value> = selection
                .rows
                .iter()
                .map(|row| {
                    let mut value = json!(row);
                    value["news_url"] = json!(row.news_search_url());
                    value
                })
                .collect();
            let body = json!({
                "status": "ok",
                "date": selection.date,
                "scanned": selection.scanned,
                "top_n": selection.top_n,
                "min_change_pct": selection.min_change_pct,
                "rows": rows,
                "sectors": sector_breakdown(&selection.rows),
            });
            (StatusCode::OK, Json(body))
        }
        other => unavailable(date, &other),
    }
}

async fn indicators<S, H>(
    State(state): State<Arc<AppState<S, H>>>,
    Path(symbol): Path<String>,
    Query(query): Query<IndicatorQuery>,
) -> (StatusCode, Json<Value>)
where
    S: SnapshotSource,
    H: HistoryProvider,
{
    let range = query.range.unwrap_or_default();
    match load_chart(&state.history, &symbol, range, &state.indicators).await {
        ScanOutcome::Data(chart) => (StatusCode::OK, Json(json!({ "status": "ok", "chart": chart }))),
        other => (
            StatusCode::BAD_GATEWAY,
            Json(json!({
                "status": other.status(),
                "symbol": symbol,
                "reason": other.unavailable_reason(),
            })),
        ),
    }
}

fn unavailable<T>(date: NaiveDate, outcome: &ScanOutcome<T>) -> (StatusCode, Json<Value>) {
    let code = match outcome {
        ScanOutcome::Failed(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    let body = json!({
        "status": outcome.status(),
        "date": date,
        "reason": outcome.unavailable_reason(),
    });
    (code, Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::Duration;
    use tower::ServiceExt;

    const HEADER: &str = "\"證券代號\",\"證券名稱\",\"成交金額\",\"收盤價\",\"漲跌(+/-)\",\"漲跌價差\"\n";

    enum Report {
        Text(String),
        Down,
    }

    #[async_trait]
    impl SnapshotSource for Report {
        fn name(&self) -> &'static str {
            "TEST"
        }

        async fn fetch_report(&self, _date: NaiveDate) -> Result<String, MarketDataError> {
            match self {
                Report::Text(text) => Ok(text.clone()),
                Report::Down => Err(MarketDataError::Timeout(15)),
            }
        }
    }

    struct Flat;

    #[async_trait]
    impl HistoryProvider for Flat {
        fn name(&self) -> &'static str {
            "FLAT"
        }

        async fn fetch_bars(
            &self,
            _symbol: &str,
            _range: HistoryRange,
            _interval: BarInterval,
        ) -> Result<Vec<DailyBar>, MarketDataError> {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            Ok((0..30)
                .map(|i| DailyBar::new(start + Duration::days(i), 10.0, 10.0, 10.0, 10.0, 1.0))
                .collect())
        }
    }

    fn report() -> String {
        let mut text = "x".repeat(600);
        text.push('\n');
        text.push_str(HEADER);
        text.push_str("\"2330\",\"台積電\",\"9,000,000\",\"105.00\",\"+\",\"5.00\"\n");
        text.push_str("\"2317\",\"鴻海\",\"8,000,000\",\"101.00\",\"+\",\"1.00\"\n");
        text
    }

    fn app(source: Report) -> Router {
        router(Arc::new(AppState {
            scanner: Scanner::new(source, ScanConfig::default()),
            history: Flat,
            indicators: IndicatorConfig::default(),
        }))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app(Report::Down), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_scan_returns_selection() {
        let (status, body) = get_json(app(Report::Text(report())), "/api/scan?date=2024-06-07").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["scanned"], 2);
        assert_eq!(body["rows"].as_array().unwrap().len(), 1);
        assert_eq!(body["rows"][0]["symbol"], "2330");
        assert!(body["rows"][0]["news_url"].as_str().unwrap().contains("tbm=nws"));
    }

    #[tokio::test]
    async fn test_scan_threshold_override() {
        let (_, body) = get_json(
            app(Report::Text(report())),
            "/api/scan?date=2024-06-07&min_change=0.5",
        )
        .await;
        assert_eq!(body["rows"].as_array().unwrap().len(), 2);
        assert_eq!(body["min_change_pct"], 0.5);
    }

    #[tokio::test]
    async fn test_scan_no_data() {
        let (status, body) = get_json(app(Report::Text(String::new())), "/api/scan?date=2024-06-07").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "no_data");
        assert!(body["reason"].is_string());
    }

    #[tokio::test]
    async fn test_scan_transport_failure() {
        let (status, body) = get_json(app(Report::Down), "/api/scan?date=2024-06-07").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], "error");
        assert_eq!(body["reason"], "Request timed out after 15s");
    }

    #[tokio::test]
    async fn test_indicators_for_symbol() {
        let (status, body) = get_json(app(Report::Down), "/api/indicators/2330?range=1y").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chart"]["symbol"], "2330");
        assert_eq!(body["chart"]["range"], "1y");
        assert_eq!(body["chart"]["indicators"]["closes"].as_array().unwrap().len(), 30);
    }
}
