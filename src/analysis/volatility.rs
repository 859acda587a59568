// =============================================================================
// Volatility — annualized standard deviation of simple percentage returns
// =============================================================================
//
// Convention (fixed for the whole crate): returns are simple percentage
// changes `close[i]/close[i-1] - 1`, σ is population standard deviation, and
// annualization multiplies by sqrt(trading_days).  Values are reported in
// percent.
//
//   historical = σ(all returns) * sqrt(252) * 100
//   rolling_i  = σ(returns in the trailing `window`) * sqrt(252) * 100
//   current    = last rolling value
//   average / max / min over all rolling values
//
// Fewer than 2 bars => no returns => `None` overall; fewer than `window`+1
// bars => the rolling fields are `None` while `historical` still computes.

use serde::{Deserialize, Serialize};

use super::statistics::{mean_std, pct_returns};

/// Annualized volatility figures, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volatility {
    /// Over every return in the series.
    pub historical: f64,
    /// Over the trailing window; `None` when the window has not filled.
    pub current: Option<f64>,
    pub average: Option<f64>,
    pub max: Option<f64>,
    pub min: Option<f64>,
}

/// Compute volatility over `closes`.
///
/// Returns `None` for a series with fewer than 2 bars (no returns to
/// measure).  `window == 0` leaves the rolling fields `None`.
pub fn volatility(closes: &[f64], window: usize, trading_days: f64) -> Option<Volatility> {
    let returns = pct_returns(closes);
    if returns.is_empty() {
        return None;
    }

    let annualize = trading_days.sqrt() * 100.0;
    let (_, hist_std) = mean_std(&returns);
    let historical = hist_std * annualize;

    let mut rolling: Vec<f64> = Vec::new();
    if window > 0 && returns.len() >= window {
        for chunk in returns.windows(window) {
            let (_, std) = mean_std(chunk);
            rolling.push(std * annualize);
        }
    }

    let (current, average, max, min) = if rolling.is_empty() {
        (None, None, None, None)
    } else {
        let sum: f64 = rolling.iter().sum();
        let max = rolling.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = rolling.iter().cloned().fold(f64::INFINITY, f64::min);
        (
            Some(rolling[rolling.len() - 1]),
            Some(sum / rolling.len() as f64),
            Some(max),
            Some(min),
        )
    };

    Some(Volatility {
        historical,
        current,
        average,
        max,
        min,
    })
}
