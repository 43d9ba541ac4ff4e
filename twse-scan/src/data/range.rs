//! History span and bar interval

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How far back to request daily history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HistoryRange {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl HistoryRange {
    /// Range token understood by the chart API
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRange::OneMonth => "1mo",
            HistoryRange::ThreeMonths => "3mo",
            HistoryRange::SixMonths => "6mo",
            HistoryRange::OneYear => "1y",
            HistoryRange::TwoYears => "2y",
            HistoryRange::FiveYears => "5y",
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1mo" | "1m" => Ok(HistoryRange::OneMonth),
            "3mo" | "3m" => Ok(HistoryRange::ThreeMonths),
            "6mo" | "6m" => Ok(HistoryRange::SixMonths),
            "1y" | "12mo" => Ok(HistoryRange::OneYear),
            "2y" | "24mo" => Ok(HistoryRange::TwoYears),
            "5y" => Ok(HistoryRange::FiveYears),
            other => Err(format!("Unsupported history range: {}", other)),
        }
    }
}

/// Bar interval; only daily bars feed the indicator engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BarInterval {
    #[default]
    #[serde(rename = "1d")]
    Daily,
}

impl BarInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            BarInterval::Daily => "1d",
        }
    }
}
