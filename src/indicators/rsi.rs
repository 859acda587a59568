// =============================================================================
// Relative Strength Index (RSI) — simple rolling-mean smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an index is overbought or oversold.
//
// Step 1 — Compute close-to-close deltas.
// Step 2 — Over the trailing `period` deltas, take the simple mean of gains
//          and the simple mean of losses (not Wilder's recursive smoothing;
//          the rolling mean keeps every output a pure function of its own
//          window).
// Step 3 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// Convention: when avg_loss == 0 (no down moves in the window, including a
// perfectly flat window) RSI is 100.  Output is always within [0, 100].

/// RSI series aligned 1:1 with `closes`.
///
/// Index i is defined once `period` deltas are available, i.e. for
/// `i >= period`; earlier points are `None`.
///
/// # Edge cases
/// - `period == 0` or `closes.len() < period + 1` => all-`None` series.
/// - `avg_loss == 0` in a window => `Some(100.0)`.
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let len = closes.len();
    if period == 0 || len < period + 1 {
        return vec![None; len];
    }

    // deltas[i] = close[i+1] - close[i]
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    let mut out: Vec<Option<f64>> = vec![None; period];
    out.reserve(len - period);

    for i in period..len {
        let window = &deltas[i - period..i];
        let (sum_gain, sum_loss) = window.iter().fold((0.0_f64, 0.0_f64), |(g, l), &d| {
            if d > 0.0 {
                (g + d, l)
            } else {
                (g, l - d)
            }
        });

        let value = if sum_loss == 0.0 {
            100.0
        } else {
            let rs = sum_gain / sum_loss;
            100.0 - 100.0 / (1.0 + rs)
        };
        out.push(Some(value));
    }

    out
}
