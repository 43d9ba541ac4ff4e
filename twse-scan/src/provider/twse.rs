//! TWSE daily report source

use crate::config::HttpSettings;
use crate::data::report_date_param;
use crate::error::MarketDataError;
use crate::provider::{build_client, classify_error, SnapshotSource};
use crate::snapshot::decode_report;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info};

/// Report type covering all listed securities except warrants
const REPORT_TYPE: &str = "ALLBUT0999";

/// Downloads `exchangeReport/MI_INDEX` as CSV
#[derive(Debug, Clone)]
pub struct TwseReportSource {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl TwseReportSource {
    pub fn new(settings: &HttpSettings) -> crate::Result<Self> {
        Ok(Self {
            client: build_client(settings)?,
            base_url: settings.twse_base_url.trim_end_matches('/').to_string(),
            timeout_secs: settings.timeout_secs,
        })
    }

    /// Report URL for a date
    pub fn report_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/exchangeReport/MI_INDEX?response=csv&date={}&type={}",
            self.base_url,
            report_date_param(date),
            REPORT_TYPE
        )
    }
}

#[async_trait]
impl SnapshotSource for TwseReportSource {
    fn name(&self) -> &'static str {
        "TWSE"
    }

    async fn fetch_report(&self, date: NaiveDate) -> Result<String, MarketDataError> {
        let url = self.report_url(date);
        info!("Fetching TWSE report for {}", date);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| classify_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::HttpStatus(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_error(e, self.timeout_secs))?;
        debug!("TWSE report for {}: {} bytes", date, bytes.len());

        Ok(decode_report(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use crate::snapshot::parse_report;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 7).unwrap()
    }

    fn source_for(server: &MockServer) -> TwseReportSource {
        let settings = HttpSettings {
            twse_base_url: server.uri(),
            timeout_secs: 1,
            ..Default::default()
        };
        TwseReportSource::new(&settings).unwrap()
    }

    async fn serve(response: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exchangeReport/MI_INDEX"))
            .and(query_param("date", "20240607"))
            .and(query_param("type", "ALLBUT0999"))
            .respond_with(response)
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn test_report_url() {
        let settings = HttpSettings {
            twse_base_url: "https://www.twse.com.tw/".to_string(),
            ..Default::default()
        };
        let source = TwseReportSource::new(&settings).unwrap();
        assert_eq!(
            source.report_url(date()),
            "https://www.twse.com.tw/exchangeReport/MI_INDEX?response=csv&date=20240607&type=ALLBUT0999"
        );
    }

    #[tokio::test]
    async fn test_big5_report_decoded() {
        let report = format!(
            "{}\n\"證券代號\",\"證券名稱\",\"成交金額\",\"收盤價\",\"漲跌(+/-)\",\"漲跌價差\"\n\"2330\",\"台積電\",\"9,000,000\",\"105.00\",\"+\",\"5.00\"\n",
            "大盤統計資訊".repeat(100)
        );
        let (body, _, had_errors) = encoding_rs::BIG5.encode(&report);
        assert!(!had_errors);
        assert!(std::str::from_utf8(&body).is_err());

        let server = serve(ResponseTemplate::new(200).set_body_bytes(body.into_owned())).await;
        let text = source_for(&server).fetch_report(date()).await.unwrap();
        assert_eq!(text, report);

        let rows = parse_report(&text, &ScanConfig::default()).into_data().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "台積電");
    }

    #[tokio::test]
    async fn test_server_error_is_http_status() {
        let server = serve(ResponseTemplate::new(500)).await;
        let err = source_for(&server).fetch_report(date()).await.unwrap_err();
        assert_eq!(err, MarketDataError::HttpStatus(500));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_missing_report_is_http_status() {
        let server = serve(ResponseTemplate::new(404)).await;
        let err = source_for(&server).fetch_report(date()).await.unwrap_err();
        assert_eq!(err, MarketDataError::HttpStatus(404));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = serve(ResponseTemplate::new(200).set_delay(Duration::from_secs(3))).await;
        let err = source_for(&server).fetch_report(date()).await.unwrap_err();
        assert_eq!(err, MarketDataError::Timeout(1));
    }
}
