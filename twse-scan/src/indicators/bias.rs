//! Bias ratio: percent distance of the close from a moving average

/// `(close - ma) / ma * 100`; undefined without an average or on a zero average
pub fn bias_ratio(close: f64, ma: Option<f64>) -> Option<f64> {
    let ma = ma?;
    if ma == 0.0 {
        return None;
    }
    let bias = (close - ma) / ma * 100.0;
    bias.is_finite().then_some(bias)
}

/// Bias series for closes against a parallel moving average series
pub fn calculate_bias(closes: &[f64], ma: &[Option<f64>]) -> Vec<Option<f64>> {
    closes
        .iter()
        .zip(ma)
        .map(|(&close, &ma)| bias_ratio(close, ma))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_ratio() {
        assert_eq!(bias_ratio(110.0, Some(100.0)), Some(10.0));
        assert_eq!(bias_ratio(90.0, Some(100.0)), Some(-10.0));
        assert_eq!(bias_ratio(90.0, None), None);
        assert_eq!(bias_ratio(90.0, Some(0.0)), None);
    }

    #[test]
    fn test_bias_series_follows_ma_gaps() {
        let bias = calculate_bias(&[1.0, 2.0, 3.0], &[None, Some(1.5), Some(2.5)]);
        assert_eq!(bias[0], None);
        assert!((bias[1].unwrap() - (0.5 / 1.5 * 100.0)).abs() < 1e-9);
        assert!((bias[2].unwrap() - 20.0).abs() < 1e-9);
    }
}
