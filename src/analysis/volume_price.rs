// =============================================================================
// Volume-price relationship
// =============================================================================
//
// From the second bar onward each bar is classified by the sign pair of its
// price change and volume change: price-up/volume-up, price-up/volume-down,
// price-down/volume-up, price-down/volume-down.  A flat price or flat volume
// leaves the bar uncounted, mirroring the four-way classification.
//
// Volume anomalies: a bar is flagged when its volume deviates from the
// trailing `window`-bar mean by more than `sigma` trailing standard
// deviations.  A zero-σ baseline (constant trailing volume) yields no flag —
// the deviation is not measurable in σ units and the output contract forbids
// infinities.
//
// The latest bar also gets a coarse status tag against the whole-series
// volume distribution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::statistics::mean_std;
use crate::series::Bar;

/// Counts per price/volume sign pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCounts {
    pub price_up_volume_up: u32,
    pub price_up_volume_down: u32,
    pub price_down_volume_up: u32,
    pub price_down_volume_down: u32,
}

/// Latest volume versus the whole-series mean/σ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeStatus {
    /// Above mean + 2σ.
    ExtremelyHigh,
    /// Above mean + σ.
    High,
    Normal,
    /// Below mean - σ.
    Low,
}

/// One flagged bar whose volume left the trailing band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeAnomaly {
    pub date: NaiveDate,
    pub volume: f64,
    pub trailing_mean: f64,
    /// Signed deviation from the trailing mean, in trailing σ units.
    pub deviation_sigmas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumePrice {
    pub patterns: PatternCounts,
    pub anomalies: Vec<VolumeAnomaly>,
    pub status: VolumeStatus,
    /// Latest volume over the whole-series mean; `None` when the mean is 0.
    pub volume_ratio: Option<f64>,
}

/// Analyze the volume-price relationship over `bars`.
///
/// Returns `None` for a 1-bar series (no change pairs to classify).
pub fn volume_price(bars: &[Bar], window: usize, sigma: f64) -> Option<VolumePrice> {
    if bars.len() < 2 {
        return None;
    }

    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

    let mut patterns = PatternCounts::default();
    for pair in bars.windows(2) {
        let price_delta = pair[1].close - pair[0].close;
        let volume_delta = pair[1].volume - pair[0].volume;
        match (price_delta > 0.0, price_delta < 0.0, volume_delta > 0.0, volume_delta < 0.0) {
            (true, _, true, _) => patterns.price_up_volume_up += 1,
            (true, _, _, true) => patterns.price_up_volume_down += 1,
            (_, true, true, _) => patterns.price_down_volume_up += 1,
            (_, true, _, true) => patterns.price_down_volume_down += 1,
            _ => {} // flat price or flat volume — uncounted
        }
    }

    let mut anomalies = Vec::new();
    if window > 0 {
        for i in window..bars.len() {
            let (trailing_mean, trailing_std) = mean_std(&volumes[i - window..i]);
            if trailing_std == 0.0 {
                continue;
            }
            let deviation = (volumes[i] - trailing_mean) / trailing_std;
            if deviation.abs() > sigma {
                anomalies.push(VolumeAnomaly {
                    date: bars[i].date,
                    volume: volumes[i],
                    trailing_mean,
                    deviation_sigmas: deviation,
                });
            }
        }
    }

    let (mean, std) = mean_std(&volumes);
    let latest = volumes[volumes.len() - 1];
    let status = if latest > mean + 2.0 * std {
        VolumeStatus::ExtremelyHigh
    } else if latest > mean + std {
        VolumeStatus::High
    } else if latest < mean - std {
        VolumeStatus::Low
    } else {
        VolumeStatus::Normal
    };

    let volume_ratio = (mean > 0.0).then(|| latest / mean);

    Some(VolumePrice {
        patterns,
        anomalies,
        status,
        volume_ratio,
    })
}
