// =============================================================================
// KDJ Stochastic Oscillator
// =============================================================================
//
// RSV (raw stochastic value) locates the close inside the trailing
// `period`-bar high/low range:
//
//   RSV_i = (close_i - low_min) / (high_max - low_min) * 100
//
// with RSV = 50 when the range is zero (flat market — by convention, not an
// error).  K smooths RSV with factor 1/smooth_k, D smooths K with factor
// 1/smooth_d, both recurrences seeded at 50 before the first defined RSV:
//
//   K_i = RSV_i / smooth_k + K_{i-1} * (1 - 1/smooth_k)
//   D_i = K_i   / smooth_d + D_{i-1} * (1 - 1/smooth_d)
//   J_i = 3*K_i - 2*D_i                 (may leave [0, 100])
//
// K/D/J are undefined before index period-1, like any trailing-window
// indicator.

/// The K, D and J series, each aligned 1:1 with the input bars.
#[derive(Debug, Clone)]
pub struct KdjSeries {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
    pub j: Vec<Option<f64>>,
}

/// Compute KDJ from aligned high/low/close slices.
///
/// # Edge cases
/// - `period == 0`, zero smoothing factors, or input shorter than `period`
///   => all-`None` series.
/// - Zero high/low range in a window => RSV = 50 for that bar.
pub fn kdj(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
    smooth_k: u32,
    smooth_d: u32,
) -> KdjSeries {
    let len = closes.len();
    debug_assert_eq!(highs.len(), len);
    debug_assert_eq!(lows.len(), len);

    if period == 0 || smooth_k == 0 || smooth_d == 0 || len < period {
        return KdjSeries {
            k: vec![None; len],
            d: vec![None; len],
            j: vec![None; len],
        };
    }

    let alpha_k = 1.0 / smooth_k as f64;
    let alpha_d = 1.0 / smooth_d as f64;

    let mut k_series: Vec<Option<f64>> = vec![None; period - 1];
    let mut d_series: Vec<Option<f64>> = vec![None; period - 1];
    let mut j_series: Vec<Option<f64>> = vec![None; period - 1];

    // Both recurrences start from the neutral 50 midpoint.
    let mut prev_k = 50.0_f64;
    let mut prev_d = 50.0_f64;

    for i in period - 1..len {
        let window = (i + 1 - period)..=i;
        let high_max = highs[window.clone()]
            .iter()
            .fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let low_min = lows[window].iter().fold(f64::INFINITY, |a, &b| a.min(b));

        let range = high_max - low_min;
        let rsv = if range == 0.0 {
            50.0
        } else {
            (closes[i] - low_min) / range * 100.0
        };

        prev_k = rsv * alpha_k + prev_k * (1.0 - alpha_k);
        prev_d = prev_k * alpha_d + prev_d * (1.0 - alpha_d);

        k_series.push(Some(prev_k));
        d_series.push(Some(prev_d));
        j_series.push(Some(3.0 * prev_k - 2.0 * prev_d));
    }

    KdjSeries {
        k: k_series,
        d: d_series,
        j: j_series,
    }
}
