// =============================================================================
// Cross-index comparison and correlation
// =============================================================================
//
// `compare` ranks a set of bar series by their range percentage change,
// producing one snapshot per index.  `correlation` computes the Pearson
// coefficient of the two close series over their date intersection — both
// inputs are sorted by date, so a single merge walk aligns them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::series::BarSeries;

/// Range summary for one index, used for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub symbol: String,
    pub current: f64,
    pub change: f64,
    pub pct_change: f64,
    pub high: f64,
    pub low: f64,
    pub avg_volume: f64,
}

/// Snapshot every series and rank by percentage change, best first.
pub fn compare(series_set: &[&BarSeries]) -> Vec<IndexSnapshot> {
    let mut snapshots: Vec<IndexSnapshot> = series_set
        .iter()
        .map(|s| {
            let bars = s.bars();
            let first = bars[0].close;
            let last = s.last().close;
            let high = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
            let low = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
            let avg_volume = bars.iter().map(|b| b.volume).sum::<f64>() / bars.len() as f64;
            IndexSnapshot {
                symbol: s.symbol().to_string(),
                current: last,
                change: last - first,
                pct_change: (last / first - 1.0) * 100.0,
                high,
                low,
                avg_volume,
            }
        })
        .collect();

    snapshots.sort_by(|a, b| b.pct_change.total_cmp(&a.pct_change));
    debug!(indices = snapshots.len(), "compared index series");
    snapshots
}

/// Pearson correlation of the two close series over their common dates.
///
/// Returns `None` when fewer than 2 dates overlap or either aligned series
/// is constant (zero variance — the coefficient is undefined).
pub fn correlation(a: &BarSeries, b: &BarSeries) -> Option<f64> {
    let mut xs = Vec::new();
    let mut ys = Vec::new();

    // Merge walk over the two date-sorted series.
    let (bars_a, bars_b) = (a.bars(), b.bars());
    let (mut i, mut j) = (0, 0);
    while i < bars_a.len() && j < bars_b.len() {
        match bars_a[i].date.cmp(&bars_b[j].date) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                xs.push(bars_a[i].close);
                ys.push(bars_b[j].close);
                i += 1;
                j += 1;
            }
        }
    }

    if xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(&ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Period;
    use crate::testutil::{bar, series_from_closes};

    #[test]
    fn ranking_is_by_pct_change_descending() {
        let up = series_from_closes(&[100.0, 110.0], 1000.0);
        let flat = series_from_closes(&[100.0, 100.0], 1000.0);
        let down = series_from_closes(&[100.0, 90.0], 1000.0);
        let ranked = compare(&[&down, &up, &flat]);
        let pcts: Vec<f64> = ranked.iter().map(|s| s.pct_change).collect();
        assert!((pcts[0] - 10.0).abs() < 1e-12);
        assert!((pcts[1] - 0.0).abs() < 1e-12);
        assert!((pcts[2] + 10.0).abs() < 1e-12);
    }

    #[test]
    fn identical_series_correlate_perfectly() {
        let a = series_from_closes(&[100.0, 101.0, 99.0, 103.0], 1000.0);
        let b = a.clone();
        let r = correlation(&a, &b).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverted_series_correlate_negatively() {
        let a = series_from_closes(&[100.0, 101.0, 99.0, 103.0], 1000.0);
        let b = series_from_closes(&[100.0, 99.0, 101.0, 97.0], 1000.0);
        let r = correlation(&a, &b).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn disjoint_dates_yield_none() {
        let a = series_from_closes(&[100.0, 101.0], 1000.0);
        let bars = vec![bar(100, 50.0, 10.0), bar(101, 51.0, 10.0)];
        let b = BarSeries::new("other", Period::Daily, bars).unwrap();
        assert!(correlation(&a, &b).is_none());
    }

    #[test]
    fn constant_series_has_undefined_correlation() {
        let a = series_from_closes(&[100.0; 5], 1000.0);
        let b = series_from_closes(&[90.0, 91.0, 92.0, 93.0, 94.0], 1000.0);
        assert!(correlation(&a, &b).is_none());
    }
}
