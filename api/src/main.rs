mod routes;

use anyhow::Result;
use shared::{init_tracing, Config};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use twse_scan::prelude::{IndicatorConfig, Scanner, TwseReportSource, YahooHistoryProvider};

use crate::routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    info!("Starting TWSE-Scan API server...");

    let http = config.http_settings();
    let state = AppState {
        scanner: Scanner::new(TwseReportSource::new(&http)?, config.scan_config()),
        history: YahooHistoryProvider::new(&http)?,
        indicators: IndicatorConfig::default(),
    };

    let app = routes::router(Arc::new(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.api_bind_addr).await?;
    info!("API server listening on http://{}", config.api_bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
