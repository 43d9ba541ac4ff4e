//! Percent change from the report's direction + magnitude encoding
//!
//! The report never carries a signed change. It carries an unsigned
//! magnitude (`漲跌價差`) and a separate direction cell (`漲跌(+/-)`) holding
//! markup around a `+` or `-`. The prior close is reconstructed as
//! `close - signed`, which makes the percent change relative to yesterday.

use serde::{Deserialize, Serialize};

/// Direction of the day's price move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Up,
    Down,
    Unchanged,
}

impl ChangeDirection {
    /// Read the first `+` or `-` in the direction cell.
    ///
    /// A missing cell, a blank one, or the exchange's `X` (no comparison)
    /// all read as [`ChangeDirection::Unchanged`].
    pub fn from_field(field: Option<&str>) -> Self {
        match field.and_then(|f| f.chars().find(|c| *c == '+' || *c == '-')) {
            Some('+') => ChangeDirection::Up,
            Some('-') => ChangeDirection::Down,
            _ => ChangeDirection::Unchanged,
        }
    }

    pub fn sign(&self) -> f64 {
        match self {
            ChangeDirection::Up => 1.0,
            ChangeDirection::Down => -1.0,
            ChangeDirection::Unchanged => 0.0,
        }
    }
}

/// Signed change and percent change for one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChange {
    pub direction: ChangeDirection,
    pub signed: Option<f64>,
    pub percent: Option<f64>,
}

/// Derive the signed change and percent change.
///
/// `Unchanged` pins both values to zero whatever the magnitude or close say.
/// Otherwise the percent change is undefined when an input is missing or the
/// reconstructed prior close is zero.
pub fn derive_change(
    direction: ChangeDirection,
    magnitude: Option<f64>,
    close: Option<f64>,
) -> PriceChange {
    if direction == ChangeDirection::Unchanged {
        return PriceChange {
            direction,
            signed: Some(0.0),
            percent: Some(0.0),
        };
    }

    let signed = magnitude.map(|m| m * direction.sign());
    let percent = match (signed, close) {
        (Some(signed), Some(close)) => percent_change(signed, close),
        _ => None,
    };

    PriceChange {
        direction,
        signed,
        percent,
    }
}

/// `signed / (close - signed) * 100`, undefined on a zero prior close
pub fn percent_change(signed: f64, close: f64) -> Option<f64> {
    let prior_close = close - signed;
    if prior_close == 0.0 {
        return None;
    }
    let pct = signed / prior_close * 100.0;
    pct.is_finite().then_some(pct)
}
