use dotenv::dotenv;
use serde::Serialize;
use std::str::FromStr;
use twse_scan::config::{HttpSettings, ScanConfig};

/// Log output style for the binaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("Unknown LOG_FORMAT: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub twse_base_url: String,
    pub http_timeout_secs: u64,
    pub accept_invalid_certs: bool,
    pub scan_top_n: usize,
    pub scan_min_change_pct: f64,
    pub api_bind_addr: String,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        let http = HttpSettings::default();
        let scan = ScanConfig::default();
        Config {
            twse_base_url: http.twse_base_url,
            http_timeout_secs: http.timeout_secs,
            accept_invalid_certs: http.accept_invalid_certs,
            scan_top_n: scan.top_n,
            scan_min_change_pct: scan.min_change_pct,
            api_bind_addr: "0.0.0.0:9999".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            twse_base_url: lookup("TWSE_BASE_URL").unwrap_or(defaults.twse_base_url),
            http_timeout_secs: parse_or(&lookup, "HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            accept_invalid_certs: parse_or(&lookup, "TWSE_ACCEPT_INVALID_CERTS", defaults.accept_invalid_certs)?,
            scan_top_n: parse_or(&lookup, "SCAN_TOP_N", defaults.scan_top_n)?,
            scan_min_change_pct: parse_or(&lookup, "SCAN_MIN_CHANGE_PCT", defaults.scan_min_change_pct)?,
            api_bind_addr: lookup("API_BIND_ADDR").unwrap_or(defaults.api_bind_addr),
            log_format: parse_or(&lookup, "LOG_FORMAT", defaults.log_format)?,
        })
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            twse_base_url: self.twse_base_url.clone(),
            timeout_secs: self.http_timeout_secs,
            accept_invalid_certs: self.accept_invalid_certs,
            ..Default::default()
        }
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            top_n: self.scan_top_n,
            min_change_pct: self.scan_min_change_pct,
            ..Default::default()
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}={:?}: {}", key, raw, e)),
        None => Ok(default),
    }
}
