// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   DIF  = EMA(fast) - EMA(slow)          (both seeded with close[0])
//   DEA  = EMA(signal) over the DIF series, seeded with DIF[0]
//   HIST = 2 * (DIF - DEA)
//
// Because every EMA here is seeded with its first input, all three series
// are defined at every index — the dispatcher wraps them in `Some` without a
// warm-up region.

use super::ema::ema;

/// The DIF / DEA / HIST series, one value per input close.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub dif: Vec<f64>,
    pub dea: Vec<f64>,
    pub hist: Vec<f64>,
}

/// Compute MACD over `closes`.
///
/// # Edge cases
/// - Empty input or any zero period => empty series.
/// - A single close yields DIF = DEA = HIST = 0 at index 0.
pub fn macd(closes: &[f64], fast: u32, slow: u32, signal: u32) -> MacdSeries {
    if closes.is_empty() || fast == 0 || slow == 0 || signal == 0 {
        return MacdSeries {
            dif: Vec::new(),
            dea: Vec::new(),
            hist: Vec::new(),
        };
    }

    let ema_fast = ema(closes, fast);
    let ema_slow = ema(closes, slow);

    let dif: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let dea = ema(&dif, signal);
    let hist: Vec<f64> = dif.iter().zip(&dea).map(|(df, de)| 2.0 * (df - de)).collect();

    MacdSeries { dif, dea, hist }
}
