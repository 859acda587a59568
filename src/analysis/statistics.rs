// =============================================================================
// Descriptive statistics over the full bar range
// =============================================================================
//
// Close-price summary, first-to-last change, per-day change distribution and
// volume totals.  All standard deviations in this crate are population σ
// (divide by N).
//
// A 1-bar series degrades gracefully: the delta-based fields are `None` or
// zero rather than an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::series::Bar;

/// Close-price summary over the whole series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation of close.
    pub std: f64,
}

/// Change from the first to the last close, plus the per-day distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeStats {
    pub total: f64,
    pub total_pct: f64,
    /// Mean daily percentage change; `None` on a 1-bar series.
    pub mean_daily_pct: Option<f64>,
    /// Largest single-day percentage gain; `None` on a 1-bar series.
    pub max_gain_pct: Option<f64>,
    /// Largest single-day percentage loss; `None` on a 1-bar series.
    pub max_loss_pct: Option<f64>,
    pub up_days: u32,
    pub down_days: u32,
    /// `up_days` over the number of day-to-day changes; `None` on 1 bar.
    pub up_ratio: Option<f64>,
}

/// Volume summary over the whole series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeStats {
    pub total: f64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub records: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: PriceStats,
    pub change: ChangeStats,
    pub volume: VolumeStats,
}

/// Population mean and standard deviation; `values` must be non-empty.
pub(crate) fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Daily simple percentage returns: `close[i] / close[i-1] - 1`, one per
/// bar-to-bar step.  Empty for a 1-bar series.
pub(crate) fn pct_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Compute the descriptive statistics for a non-empty, validated bar slice.
pub fn statistics(bars: &[Bar]) -> Statistics {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

    let (close_mean, close_std) = mean_std(&closes);
    let close_min = closes.iter().cloned().fold(f64::INFINITY, f64::min);
    let close_max = closes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let first = closes[0];
    let last = closes[closes.len() - 1];

    let returns = pct_returns(&closes);
    let (mean_daily_pct, max_gain_pct, max_loss_pct, up_ratio) = if returns.is_empty() {
        (None, None, None, None)
    } else {
        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n * 100.0;
        let max = returns.iter().cloned().fold(f64::NEG_INFINITY, f64::max) * 100.0;
        let min = returns.iter().cloned().fold(f64::INFINITY, f64::min) * 100.0;
        let up = returns.iter().filter(|&&r| r > 0.0).count() as f64;
        (Some(mean), Some(max), Some(min), Some(up / n))
    };
    let up_days = returns.iter().filter(|&&r| r > 0.0).count() as u32;
    let down_days = returns.iter().filter(|&&r| r < 0.0).count() as u32;

    let vol_total: f64 = volumes.iter().sum();
    let vol_max = volumes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let vol_min = volumes.iter().cloned().fold(f64::INFINITY, f64::min);

    Statistics {
        records: bars.len(),
        start_date: bars[0].date,
        end_date: bars[bars.len() - 1].date,
        price: PriceStats {
            current: last,
            min: close_min,
            max: close_max,
            mean: close_mean,
            std: close_std,
        },
        change: ChangeStats {
            total: last - first,
            total_pct: (last / first - 1.0) * 100.0,
            mean_daily_pct,
            max_gain_pct,
            max_loss_pct,
            up_days,
            down_days,
            up_ratio,
        },
        volume: VolumeStats {
            total: vol_total,
            mean: vol_total / volumes.len() as f64,
            max: vol_max,
            min: vol_min,
        },
    }
}
