//! Plain-text reports for terminal output

pub mod chart;
pub mod selection;

pub use chart::*;
pub use selection::*;

/// Format an optional number with `decimals` places, or `-`
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", decimals, v))
}

/// Format a turnover in TWD with thousands separators
pub fn fmt_turnover(value: Option<f64>) -> String {
    let Some(v) = value else {
        return "-".to_string();
    };
    let digits = format!("{:.0}", v.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if v < 0.0 {
        out.insert(0, '-');
    }
    out
}
