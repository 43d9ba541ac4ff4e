//! Failure taxonomy for the snapshot and history feeds

use thiserror::Error;

/// Why a stage could not produce data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),

    #[error("Report header marker {0} not found")]
    MissingHeader(String),

    #[error("Report is missing column {0}")]
    MissingColumn(String),

    #[error("Malformed provider payload: {0}")]
    Payload(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MarketDataError {
    /// True for failures caused by the network rather than the payload.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            MarketDataError::Transport(_) | MarketDataError::Timeout(_) | MarketDataError::HttpStatus(_)
        )
    }
}

impl From<csv::Error> for MarketDataError {
    fn from(err: csv::Error) -> Self {
        MarketDataError::Payload(format!("CSV error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(MarketDataError::Timeout(15).is_transport());
        assert!(MarketDataError::HttpStatus(503).is_transport());
        assert!(MarketDataError::Transport("reset".into()).is_transport());
        assert!(!MarketDataError::MissingHeader("\"證券代號\"".into()).is_transport());
        assert!(!MarketDataError::Payload("bad json".into()).is_transport());
    }
}
