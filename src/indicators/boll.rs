// =============================================================================
// Bollinger Bands (BOLL)
// =============================================================================
//
// Middle band = rolling mean of close over `period`; the upper and lower
// bands sit `width` population standard deviations above and below it, with
// σ computed over the same trailing window.
//
// Population σ (divide by N) is the convention throughout this crate; a flat
// window collapses all three bands onto the close.
//
// All three series share the MA alignment: undefined before index period-1.

use super::ma::rolling_mean;

/// The three Bollinger band series, each aligned 1:1 with the input.
#[derive(Debug, Clone)]
pub struct BollSeries {
    pub mid: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Compute Bollinger Bands over `closes`.
///
/// # Edge cases
/// - `period == 0` or input shorter than `period` => all three series
///   all-`None`.
/// - Flat window => σ = 0, so upper == mid == lower (never NaN).
pub fn bollinger(closes: &[f64], period: usize, width: f64) -> BollSeries {
    let len = closes.len();
    let mid = rolling_mean(closes, period);

    let mut upper: Vec<Option<f64>> = Vec::with_capacity(len);
    let mut lower: Vec<Option<f64>> = Vec::with_capacity(len);

    for (i, mean) in mid.iter().enumerate() {
        match mean {
            Some(mean) => {
                let window = &closes[i + 1 - period..=i];
                let variance =
                    window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period as f64;
                let band = width * variance.sqrt();
                upper.push(Some(mean + band));
                lower.push(Some(mean - band));
            }
            None => {
                upper.push(None);
                lower.push(None);
            }
        }
    }

    BollSeries { mid, upper, lower }
}
