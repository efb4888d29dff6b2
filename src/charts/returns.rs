//! Return arithmetic over closing-price series.
//!
//! A pair whose earlier close is not a positive number carries no usable
//! return; such pairs are skipped rather than dividing by zero.

/// Period-over-period fractional changes (0.05 = +5%).
///
/// Empty for series with fewer than 2 points.
pub fn pct_changes(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .filter(|w| w[0] > 0.0)
        .map(|w| w[1] / w[0] - 1.0)
        .collect()
}

/// Cumulative fractional return per point: the running product of
/// (1 + daily change) minus 1, starting at zero on the first date.
///
/// Output length equals input length; empty input yields empty output.
pub fn cumulative_returns(closes: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(closes.len());
    if closes.is_empty() {
        return out;
    }

    let mut acc = 1.0;
    out.push(0.0);
    for w in closes.windows(2) {
        if w[0] > 0.0 {
            acc *= w[1] / w[0];
        }
        out.push(acc - 1.0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_to(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_pct_changes() {
        let changes = pct_changes(&[100.0, 110.0, 99.0]);
        assert_eq!(changes.len(), 2);
        assert!(close_to(changes[0], 0.1));
        assert!(close_to(changes[1], -0.1));
    }

    #[test]
    fn test_pct_changes_single_point_is_empty() {
        assert!(pct_changes(&[100.0]).is_empty());
        assert!(pct_changes(&[]).is_empty());
    }

    #[test]
    fn test_pct_changes_skips_zero_base() {
        // No division by zero, the broken pair is dropped
        let changes = pct_changes(&[0.0, 100.0, 110.0]);
        assert_eq!(changes.len(), 1);
        assert!(close_to(changes[0], 0.1));
    }

    #[test]
    fn test_cumulative_returns_starts_at_zero() {
        let curve = cumulative_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(curve.len(), 3);
        assert!(close_to(curve[0], 0.0));
        assert!(close_to(curve[1], 0.1));
        assert!(close_to(curve[2], -0.01));
    }

    #[test]
    fn test_cumulative_returns_degenerate_inputs() {
        assert!(cumulative_returns(&[]).is_empty());
        assert_eq!(cumulative_returns(&[42.0]), vec![0.0]);
    }
}
