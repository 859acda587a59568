// =============================================================================
// Analysis Engine
// =============================================================================
//
// Descriptive statistics, volatility, direction streaks, volume-price
// classification and support/resistance levels, computed directly from the
// bar series (independent of the indicator engine).  Everything degrades
// gracefully on short input: a 1-bar series still yields statistics, with
// the delta-based sections reported as `None` or zero-length.

pub mod compare;
pub mod levels;
pub mod statistics;
pub mod streaks;
pub mod volatility;
pub mod volume_price;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use compare::{compare, correlation, IndexSnapshot};
pub use levels::{support_resistance, SupportResistance};
pub use statistics::{statistics, ChangeStats, PriceStats, Statistics, VolumeStats};
pub use streaks::{streaks, Direction, StreakRecord, Streaks};
pub use volatility::{volatility, Volatility};
pub use volume_price::{volume_price, PatternCounts, VolumeAnomaly, VolumePrice, VolumeStatus};

use crate::config::AnalysisParams;
use crate::series::BarSeries;

/// The combined analysis output for one bar series.
///
/// `None` sections mean "not computable on this much history", never a
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub statistics: Statistics,
    pub volatility: Option<Volatility>,
    pub streaks: Streaks,
    pub volume_price: Option<VolumePrice>,
    pub levels: SupportResistance,
}

/// Run the full analysis over a validated series.
pub fn analyze(series: &BarSeries, params: &AnalysisParams) -> AnalysisResult {
    let bars = series.bars();
    let closes = series.closes();

    let result = AnalysisResult {
        statistics: statistics(bars),
        volatility: volatility(&closes, params.volatility_window, params.trading_days),
        streaks: streaks(bars),
        volume_price: volume_price(bars, params.volatility_window, params.volume_anomaly_sigma),
        levels: support_resistance(bars, params.level_window, params.level_count),
    };

    debug!(
        symbol = series.symbol(),
        bars = bars.len(),
        volatility = result.volatility.is_some(),
        "analysis complete"
    );
    result
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{rising_series, series_from_closes};

    #[test]
    fn one_bar_series_returns_partial_results() {
        let series = series_from_closes(&[3000.0], 1000.0);
        let r = analyze(&series, &AnalysisParams::default());
        assert_eq!(r.statistics.records, 1);
        assert!(r.volatility.is_none());
        assert_eq!(r.streaks.current_length, 0);
        assert!(r.volume_price.is_none());
        assert!(r.levels.support.is_empty());
    }

    #[test]
    fn analysis_is_deterministic() {
        let series = rising_series(80, 100.0, 0.3, 1000.0);
        let params = AnalysisParams::default();
        assert_eq!(analyze(&series, &params), analyze(&series, &params));
    }

    #[test]
    fn sections_agree_on_the_same_series() {
        let series = rising_series(80, 100.0, 1.0, 1000.0);
        let r = analyze(&series, &AnalysisParams::default());
        // A strict rise: every delta up, streak spans the whole range.
        assert_eq!(r.streaks.max_up.as_ref().unwrap().length, 79);
        assert_eq!(r.statistics.change.up_days, 79);
        assert_eq!(r.statistics.price.current, r.statistics.price.max);
    }

    #[test]
    fn serializes_missing_sections_as_null() {
        let series = series_from_closes(&[3000.0], 1000.0);
        let r = analyze(&series, &AnalysisParams::default());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["volatility"], serde_json::Value::Null);
        assert_eq!(json["volume_price"], serde_json::Value::Null);
    }
}
