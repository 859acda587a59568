// =============================================================================
// Market Pulse — Indicator & Analysis Engine for Index OHLCV Series
// =============================================================================
//
// Pure, stateless computation over a validated in-memory bar series: no
// shared mutable state, no I/O, no background work.  The data-acquisition,
// storage and API layers hand the engine a `BarSeries` and receive
// JSON-serializable results; every request is independent and deterministic.
//
// Entry points:
//   compute_indicators  — derived series per requested indicator family
//   classify_signals    — discrete facts from the latest derived points
//   analyze             — descriptive statistics / volatility / streaks /
//                         volume-price / support-resistance
//   full_report         — all of the above in one bundle
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
pub mod analysis;
pub mod config;
pub mod error;
pub mod indicators;
pub mod series;
pub mod signals;

#[cfg(test)]
pub(crate) mod testutil;

use serde::{Deserialize, Serialize};

// ── Re-exports: the external surface ─────────────────────────────────────────
pub use analysis::{analyze, compare, correlation, AnalysisResult};
pub use config::{AnalysisParams, EngineParams, IndicatorParams, SignalThresholds};
pub use error::SeriesError;
pub use indicators::{compute_indicators, DerivedSet, IndicatorFamily};
pub use series::{Bar, BarSeries, Period};
pub use signals::{classify_signals, SignalReport};

/// Everything the engine can say about one bar series, in one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketReport {
    pub symbol: String,
    pub period: Period,
    pub indicators: DerivedSet,
    pub signals: SignalReport,
    pub analysis: AnalysisResult,
}

/// Compute every indicator family, classify the signals and run the full
/// analysis in one pass.
pub fn full_report(series: &BarSeries, params: &EngineParams) -> MarketReport {
    let indicators = compute_indicators(series, &IndicatorFamily::ALL, &params.indicators);
    let signals = classify_signals(series, &indicators, &params.thresholds);
    let analysis = analyze(series, &params.analysis);
    MarketReport {
        symbol: series.symbol().to_string(),
        period: series.period(),
        indicators,
        signals,
        analysis,
    }
}

// =============================================================================
// End-to-end tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::rising_series;

    /// 30 daily bars with closes rising by 1.0/day from 100.0.
    fn thirty_day_rally() -> BarSeries {
        rising_series(30, 100.0, 1.0, 1_000_000.0)
    }

    #[test]
    fn rally_ma5_equals_mean_of_last_five_closes() {
        let report = full_report(&thirty_day_rally(), &EngineParams::default());
        // Closes 125..=129 at the end: mean 127.
        assert_eq!(report.indicators.latest("MA5"), Some(127.0));
    }

    #[test]
    fn rally_rsi6_is_one_hundred() {
        let report = full_report(&thirty_day_rally(), &EngineParams::default());
        assert_eq!(report.indicators.latest("RSI6"), Some(100.0));
        assert!(report.signals.rsi[&6].overbought);
    }

    #[test]
    fn rally_never_fires_a_macd_cross() {
        // A monotonic single-direction trend produces no crossover.
        let series = thirty_day_rally();
        let derived = compute_indicators(
            &series,
            &[IndicatorFamily::Macd],
            &IndicatorParams::default(),
        );
        let dif = derived.get("MACD_DIF").unwrap();
        let dea = derived.get("MACD_DEA").unwrap();
        // Index 1 is skipped: the shared seed makes DIF[0] == DEA[0], which
        // the strict-inequality cross condition treats as a departure point.
        for i in 2..series.len() {
            let crossed_up = dif[i - 1].unwrap() <= dea[i - 1].unwrap()
                && dif[i].unwrap() > dea[i].unwrap();
            assert!(!crossed_up, "unexpected crossover at {i}");
        }
        let report = full_report(&series, &EngineParams::default());
        let macd = report.signals.macd.unwrap();
        assert!(!macd.golden_cross && !macd.death_cross);
    }

    #[test]
    fn rally_obv_accumulates_strictly() {
        let report = full_report(&thirty_day_rally(), &EngineParams::default());
        let obv = report.indicators.get("OBV").unwrap();
        for w in obv.windows(2) {
            assert!(w[1].unwrap() > w[0].unwrap());
        }
    }

    #[test]
    fn empty_series_is_a_validation_failure() {
        let err = BarSeries::new("sh000001", Period::Daily, Vec::new()).unwrap_err();
        assert_eq!(err, SeriesError::Empty);
    }

    #[test]
    fn full_report_round_trips_through_json() {
        let report = full_report(&thirty_day_rally(), &EngineParams::default());
        let json = serde_json::to_string(&report).unwrap();
        let back: MarketReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }

    #[test]
    fn full_report_is_deterministic() {
        let series = thirty_day_rally();
        let params = EngineParams::default();
        assert_eq!(full_report(&series, &params), full_report(&series, &params));
    }
}
