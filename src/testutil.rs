// =============================================================================
// Test fixtures — hand-built bar series shared by the unit tests
// =============================================================================

use chrono::{Duration, NaiveDate};

use crate::series::{Bar, BarSeries, Period};

/// Day `n` of the fixture calendar (day 0 = 2024-01-01).
pub fn day(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(n)
}

/// A flat-bodied bar (open = high = low = close) on fixture day `n`.
pub fn bar(n: i64, close: f64, volume: f64) -> Bar {
    Bar {
        date: day(n),
        open: close,
        high: close,
        low: close,
        close,
        volume,
        amount: close * volume,
    }
}

/// A bar with an explicit OHLC body on fixture day `n`.
pub fn ohlc_bar(n: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Bar {
    Bar {
        date: day(n),
        open,
        high,
        low,
        close,
        volume,
        amount: close * volume,
    }
}

/// Series of flat-bodied bars, one per close, constant volume.
pub fn series_from_closes(closes: &[f64], volume: f64) -> BarSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| bar(i as i64, c, volume))
        .collect();
    BarSeries::new("test", Period::Daily, bars).unwrap()
}

/// Series with per-bar closes and volumes (same length required).
pub fn series_with_volumes(closes: &[f64], volumes: &[f64]) -> BarSeries {
    assert_eq!(closes.len(), volumes.len());
    let bars = closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&c, &v))| bar(i as i64, c, v))
        .collect();
    BarSeries::new("test", Period::Daily, bars).unwrap()
}

/// `n` identical bars at the given close.
pub fn flat_series(n: usize, close: f64, volume: f64) -> BarSeries {
    series_from_closes(&vec![close; n], volume)
}

/// `n` bars rising by `step` per day from `start`.
pub fn rising_series(n: usize, start: f64, step: f64, volume: f64) -> BarSeries {
    let closes: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
    series_from_closes(&closes, volume)
}
