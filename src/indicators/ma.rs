// =============================================================================
// Simple Moving Average (MA)
// =============================================================================
//
// The arithmetic mean of the last `period` values.  Used directly for the
// MA5..MA250 family, reused for VOL_MA (volume averages) and as the middle
// band of the Bollinger computation.
//
// Output is aligned 1:1 with the input: index i is `None` while i < period-1
// (the window has not filled yet) and `Some(mean)` afterwards.

/// Rolling arithmetic mean over a trailing window of `period` values.
///
/// # Edge cases
/// - `period == 0` => all-`None` series (no meaningful window).
/// - `values.len() < period` => all-`None` series, not an error — callers
///   distinguish "undefined here" from "computation failed".
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let len = values.len();
    if period == 0 || len < period {
        return vec![None; len];
    }

    let mut out: Vec<Option<f64>> = vec![None; period - 1];
    out.reserve(len - period + 1);

    // Running-sum update; one add and one subtract per step.
    let mut sum: f64 = values[..period].iter().sum();
    out.push(Some(sum / period as f64));
    for i in period..len {
        sum += values[i] - values[i - period];
        out.push(Some(sum / period as f64));
    }

    out
}
