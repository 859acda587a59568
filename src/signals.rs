// =============================================================================
// Signal Classifier — discrete facts from the latest derived points
// =============================================================================
//
// Inspects only the last and second-to-last defined points of the derived
// series and emits discrete facts: MACD crossovers, KDJ and RSI
// overbought/oversold states, and close-vs-MA trend position.
//
// "Not applicable" (the series has no defined latest point, e.g. the whole
// history is shorter than the lookback) is modelled as `None` / absence from
// the per-period maps — it is never conflated with `false`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SignalThresholds;
use crate::indicators::DerivedSet;
use crate::series::BarSeries;

/// Latest close and its change versus the previous bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub current: f64,
    /// Absolute change from the previous close; `None` on a 1-bar series.
    pub change: Option<f64>,
    /// Percentage change from the previous close; `None` on a 1-bar series.
    pub pct_change: Option<f64>,
}

/// MACD state at the final bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdSignal {
    pub dif: f64,
    pub dea: f64,
    pub hist: f64,
    /// DIF crossed above DEA between the last two bars.
    pub golden_cross: bool,
    /// DIF crossed below DEA between the last two bars.
    pub death_cross: bool,
}

/// KDJ state at the final bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KdjSignal {
    pub k: f64,
    pub d: f64,
    pub j: f64,
    pub overbought: bool,
    pub oversold: bool,
}

/// RSI state at the final bar, per configured period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiSignal {
    pub value: f64,
    pub overbought: bool,
    pub oversold: bool,
}

/// Close-vs-moving-average position at the final bar, per period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaTrend {
    pub value: f64,
    /// Latest close is strictly above the MA.
    pub close_above: bool,
}

/// Structured fact set over the latest defined points of the derived series.
///
/// `None` fields and absent map entries mean "not applicable" — the backing
/// series had no defined latest point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    pub price: PriceSnapshot,
    pub macd: Option<MacdSignal>,
    pub kdj: Option<KdjSignal>,
    /// Keyed by RSI period.
    pub rsi: BTreeMap<u32, RsiSignal>,
    /// Keyed by MA period.
    pub ma: BTreeMap<u32, MaTrend>,
}

/// The period encoded in a series name like `MA20` or `RSI6`.
///
/// The suffix must be all digits, so `MACD_DIF` does not parse as an MA
/// series.
fn period_suffix(name: &str, prefix: &str) -> Option<u32> {
    let rest = name.strip_prefix(prefix)?;
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}

/// Classify the latest points of `derived` into discrete signal facts.
pub fn classify_signals(
    series: &BarSeries,
    derived: &DerivedSet,
    thresholds: &SignalThresholds,
) -> SignalReport {
    let bars = series.bars();
    let last_close = series.last().close;
    let price = if bars.len() >= 2 {
        let prev_close = bars[bars.len() - 2].close;
        PriceSnapshot {
            current: last_close,
            change: Some(last_close - prev_close),
            pct_change: Some((last_close / prev_close - 1.0) * 100.0),
        }
    } else {
        PriceSnapshot {
            current: last_close,
            change: None,
            pct_change: None,
        }
    };

    // --- MACD cross: requires both of the last two points on DIF and DEA ---
    let macd = match (
        derived.latest_pair("MACD_DIF"),
        derived.latest_pair("MACD_DEA"),
        derived.latest("MACD_HIST"),
    ) {
        (Some((prev_dif, dif)), Some((prev_dea, dea)), Some(hist)) => Some(MacdSignal {
            dif,
            dea,
            hist,
            golden_cross: prev_dif <= prev_dea && dif > dea,
            death_cross: prev_dif >= prev_dea && dif < dea,
        }),
        _ => None,
    };

    // --- KDJ extremes ------------------------------------------------------
    let kdj = match (
        derived.latest("K"),
        derived.latest("D"),
        derived.latest("J"),
    ) {
        (Some(k), Some(d), Some(j)) => Some(KdjSignal {
            k,
            d,
            j,
            overbought: k > thresholds.kdj_overbought && d > thresholds.kdj_overbought,
            oversold: k < thresholds.kdj_oversold && d < thresholds.kdj_oversold,
        }),
        _ => None,
    };

    // --- RSI extremes, independently per period -----------------------------
    let mut rsi = BTreeMap::new();
    for name in derived.names() {
        if let Some(period) = period_suffix(name, "RSI") {
            if let Some(value) = derived.latest(name) {
                rsi.insert(
                    period,
                    RsiSignal {
                        value,
                        overbought: value > thresholds.rsi_overbought,
                        oversold: value < thresholds.rsi_oversold,
                    },
                );
            }
        }
    }

    // --- Close position against each MA -------------------------------------
    let mut ma = BTreeMap::new();
    for name in derived.names() {
        if let Some(period) = period_suffix(name, "MA") {
            if let Some(value) = derived.latest(name) {
                ma.insert(
                    period,
                    MaTrend {
                        value,
                        close_above: last_close > value,
                    },
                );
            }
        }
    }

    debug!(
        symbol = series.symbol(),
        macd = macd.is_some(),
        kdj = kdj.is_some(),
        rsi_periods = rsi.len(),
        ma_periods = ma.len(),
        "classified signals"
    );

    SignalReport {
        price,
        macd,
        kdj,
        rsi,
        ma,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndicatorParams;
    use crate::indicators::{compute_indicators, IndicatorFamily};
    use crate::testutil::{rising_series, series_from_closes};

    fn report(series: &BarSeries) -> SignalReport {
        let derived =
            compute_indicators(series, &IndicatorFamily::ALL, &IndicatorParams::default());
        classify_signals(series, &derived, &SignalThresholds::default())
    }

    #[test]
    fn one_bar_series_is_not_applicable_everywhere() {
        let series = series_from_closes(&[3000.0], 1000.0);
        let r = report(&series);
        // MACD has a single defined point — no pair, so not applicable.
        assert!(r.macd.is_none());
        assert!(r.kdj.is_none());
        assert!(r.rsi.is_empty());
        assert!(r.ma.is_empty());
        assert_eq!(r.price.current, 3000.0);
        assert!(r.price.change.is_none());
    }

    #[test]
    fn short_history_reports_only_satisfied_periods() {
        // 12 bars: RSI6 defined, RSI12/RSI24 not; MA5/MA10 defined, rest not.
        let series = rising_series(12, 100.0, 1.0, 1000.0);
        let r = report(&series);
        assert_eq!(r.rsi.keys().copied().collect::<Vec<_>>(), vec![6]);
        assert_eq!(r.ma.keys().copied().collect::<Vec<_>>(), vec![5, 10]);
    }

    #[test]
    fn steady_rise_is_overbought_and_above_ma() {
        let series = rising_series(40, 100.0, 1.0, 1000.0);
        let r = report(&series);

        let rsi6 = &r.rsi[&6];
        assert_eq!(rsi6.value, 100.0);
        assert!(rsi6.overbought && !rsi6.oversold);

        let kdj = r.kdj.unwrap();
        assert!(kdj.overbought && !kdj.oversold);

        for trend in r.ma.values() {
            assert!(trend.close_above);
        }
    }

    #[test]
    fn monotonic_trend_never_golden_crosses() {
        let series = rising_series(40, 100.0, 1.0, 1000.0);
        let macd = report(&series).macd.unwrap();
        assert!(!macd.golden_cross && !macd.death_cross);
        assert!(macd.dif > macd.dea);
    }

    #[test]
    fn turnaround_fires_golden_cross() {
        // Long decline then a sharp rally: DIF crosses up through DEA.
        let mut closes: Vec<f64> = (0..60).map(|i| 200.0 - i as f64).collect();
        closes.extend((0..10).map(|i| 141.0 + 8.0 * i as f64));
        let series = series_from_closes(&closes, 1000.0);

        let derived =
            compute_indicators(&series, &[IndicatorFamily::Macd], &IndicatorParams::default());
        let dif = derived.get("MACD_DIF").unwrap();
        let dea = derived.get("MACD_DEA").unwrap();

        // Find the crossover bar, then truncate the series right after it and
        // confirm the classifier reports it.
        let cross_at = (1..closes.len())
            .find(|&i| {
                dif[i - 1].unwrap() <= dea[i - 1].unwrap() && dif[i].unwrap() > dea[i].unwrap()
            })
            .expect("fixture must contain a crossover");

        let truncated = series_from_closes(&closes[..=cross_at], 1000.0);
        let macd = report(&truncated).macd.unwrap();
        assert!(macd.golden_cross);
        assert!(!macd.death_cross);
    }

    #[test]
    fn macd_prefix_does_not_leak_into_ma_map() {
        let series = rising_series(30, 100.0, 1.0, 1000.0);
        let r = report(&series);
        for period in r.ma.keys() {
            assert!([5, 10, 20, 30, 60, 120, 250].contains(&(*period as usize)));
        }
    }

    #[test]
    fn thresholds_are_respected() {
        let series = rising_series(40, 100.0, 1.0, 1000.0);
        let derived =
            compute_indicators(&series, &IndicatorFamily::ALL, &IndicatorParams::default());
        // With an impossible overbought bar, nothing is overbought.
        let strict = SignalThresholds {
            rsi_overbought: 150.0,
            kdj_overbought: 150.0,
            ..SignalThresholds::default()
        };
        let r = classify_signals(&series, &derived, &strict);
        assert!(!r.rsi[&6].overbought);
        assert!(!r.kdj.unwrap().overbought);
    }

    #[test]
    fn not_applicable_serializes_as_null() {
        let series = series_from_closes(&[3000.0], 1000.0);
        let r = report(&series);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["macd"], serde_json::Value::Null);
        assert_eq!(json["kdj"], serde_json::Value::Null);
    }
}
