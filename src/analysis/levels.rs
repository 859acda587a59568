// =============================================================================
// Support / resistance levels — local extrema with price clustering
// =============================================================================
//
// A bar is a local top when its high is the maximum over the surrounding
// `window`-bar neighbourhood on both sides (and a local bottom symmetrically
// on lows).  Nearby levels within a 2% tolerance are merged into their mean,
// and the strongest few of each side are reported.

use serde::{Deserialize, Serialize};

use crate::series::Bar;

/// Relative tolerance for merging nearby price levels.
const CLUSTER_TOLERANCE: f64 = 0.02;

/// Detected price levels, strongest (highest) first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
}

/// Merge sorted-adjacent levels within [`CLUSTER_TOLERANCE`] into means.
fn cluster(mut levels: Vec<f64>) -> Vec<f64> {
    if levels.is_empty() {
        return Vec::new();
    }
    levels.sort_by(|a, b| a.total_cmp(b));

    let mut clusters = Vec::new();
    let mut current = vec![levels[0]];
    for &level in &levels[1..] {
        let anchor = current[current.len() - 1];
        if (level - anchor) / anchor < CLUSTER_TOLERANCE {
            current.push(level);
        } else {
            clusters.push(current.iter().sum::<f64>() / current.len() as f64);
            current = vec![level];
        }
    }
    clusters.push(current.iter().sum::<f64>() / current.len() as f64);
    clusters
}

/// Detect support and resistance levels over `bars`.
///
/// Returns empty level lists (not an error) when the series is shorter than
/// `2*window + 1` — no bar has a full neighbourhood to qualify as an
/// extremum.
pub fn support_resistance(bars: &[Bar], window: usize, num_levels: usize) -> SupportResistance {
    if window == 0 || bars.len() < 2 * window + 1 {
        return SupportResistance::default();
    }

    let mut tops = Vec::new();
    let mut bottoms = Vec::new();

    for i in window..bars.len() - window {
        let neighbourhood = &bars[i - window..=i + window];
        let high = bars[i].high;
        let low = bars[i].low;
        if neighbourhood.iter().all(|b| b.high <= high) {
            tops.push(high);
        }
        if neighbourhood.iter().all(|b| b.low >= low) {
            bottoms.push(low);
        }
    }

    let mut resistance = cluster(tops);
    let mut support = cluster(bottoms);
    resistance.sort_by(|a, b| b.total_cmp(a));
    support.sort_by(|a, b| b.total_cmp(a));
    resistance.truncate(num_levels);
    support.truncate(num_levels);

    SupportResistance {
        support,
        resistance,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ohlc_bar;
    use crate::series::{BarSeries, Period};

    /// Triangle-wave fixture: highs peak at 120 every 10 bars, lows trough
    /// at 100.
    fn wave_series(n: usize) -> BarSeries {
        let bars = (0..n)
            .map(|i| {
                let phase = (i % 10) as f64;
                let mid = 110.0 + if phase <= 5.0 { 2.0 * phase - 5.0 } else { 15.0 - 2.0 * phase };
                ohlc_bar(i as i64, mid, mid + 5.0, mid - 5.0, mid, 1000.0)
            })
            .collect();
        BarSeries::new("test", Period::Daily, bars).unwrap()
    }

    #[test]
    fn short_series_has_no_levels() {
        let series = wave_series(8);
        let sr = support_resistance(series.bars(), 20, 3);
        assert!(sr.support.is_empty() && sr.resistance.is_empty());
    }

    #[test]
    fn wave_extremes_are_detected() {
        let series = wave_series(50);
        let sr = support_resistance(series.bars(), 4, 3);
        assert!(!sr.resistance.is_empty());
        assert!(!sr.support.is_empty());
        // Peaks cluster near 120, troughs near 100.
        assert!((sr.resistance[0] - 120.0).abs() < 1.0);
        assert!((sr.support.last().unwrap() - 100.0).abs() < 1.0);
    }

    #[test]
    fn nearby_levels_merge_into_one() {
        // Two peaks 0.5% apart collapse into a single resistance cluster.
        assert_eq!(cluster(vec![100.0, 100.5]).len(), 1);
        assert_eq!(cluster(vec![100.0, 105.0]).len(), 2);
    }

    #[test]
    fn level_count_is_respected() {
        let series = wave_series(100);
        let sr = support_resistance(series.bars(), 2, 2);
        assert!(sr.resistance.len() <= 2);
        assert!(sr.support.len() <= 2);
    }
}
