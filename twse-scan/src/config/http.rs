//! Outbound HTTP settings shared by the providers

use serde::{Deserialize, Serialize};

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// TWSE site root (e.g., "https://www.twse.com.tw")
    pub twse_base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
    /// Skip TLS certificate validation (the TWSE chain fails strict validators)
    pub accept_invalid_certs: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            twse_base_url: "https://www.twse.com.tw".to_string(),
            timeout_secs: 15,
            user_agent: "Mozilla/5.0".to_string(),
            accept_invalid_certs: false,
        }
    }
}
