// =============================================================================
// Indicator Engine
// =============================================================================
//
// Pure, side-effect-free implementations of the core technical indicators,
// one file per family, plus the dispatch layer that turns a validated bar
// series and a set of requested families into a `DerivedSet` of aligned
// derived series.
//
// Alignment contract: every derived series has exactly one entry per bar;
// `None` marks a point where the indicator's minimum lookback is not yet
// satisfied.  Insufficient history is data, never an error, and no `Some`
// value is ever NaN or infinite.

pub mod boll;
pub mod ema;
pub mod kdj;
pub mod ma;
pub mod macd;
pub mod rsi;
pub mod volume;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::IndicatorParams;
use crate::series::BarSeries;

/// The closed set of indicator families the engine knows how to compute.
///
/// A new family means a new variant, and the exhaustive `match` in
/// [`compute_indicators`] forces a handler for it at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicatorFamily {
    Ma,
    Ema,
    Boll,
    Rsi,
    Kdj,
    Macd,
    Vol,
    VolMa,
    Obv,
}

impl IndicatorFamily {
    /// Every family, in the order the original column layout lists them.
    pub const ALL: [IndicatorFamily; 9] = [
        Self::Ma,
        Self::Ema,
        Self::Boll,
        Self::Rsi,
        Self::Kdj,
        Self::Macd,
        Self::Vol,
        Self::VolMa,
        Self::Obv,
    ];
}

impl std::fmt::Display for IndicatorFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ma => "MA",
            Self::Ema => "EMA",
            Self::Boll => "BOLL",
            Self::Rsi => "RSI",
            Self::Kdj => "KDJ",
            Self::Macd => "MACD",
            Self::Vol => "VOL",
            Self::VolMa => "VOL_MA",
            Self::Obv => "OBV",
        };
        write!(f, "{s}")
    }
}

/// The set of derived series computed for one bar series.
///
/// Keys follow the conventional column names (`MA5`, `EMA12`, `BOLL_MID`,
/// `RSI6`, `K`/`D`/`J`, `MACD_DIF`/`MACD_DEA`/`MACD_HIST`, `VOL`,
/// `VOL_MA5`, `OBV`).  Every series is exactly `len()` entries long and
/// serializes undefined points as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSet {
    dates: Vec<NaiveDate>,
    series: BTreeMap<String, Vec<Option<f64>>>,
}

impl DerivedSet {
    fn new(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            series: BTreeMap::new(),
        }
    }

    fn insert(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) {
        debug_assert_eq!(values.len(), self.dates.len());
        self.series.insert(name.into(), values);
    }

    fn insert_full(&mut self, name: impl Into<String>, values: Vec<f64>) {
        // An empty vec from a degenerate parameter maps to all-undefined.
        if values.is_empty() {
            self.insert(name, vec![None; self.dates.len()]);
        } else {
            self.insert(name, values.into_iter().map(Some).collect());
        }
    }

    /// Number of bars (and of entries in every series).
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The date column the series are aligned to.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Names of all computed series.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Full aligned series by name, or `None` when it was not requested.
    pub fn get(&self, name: &str) -> Option<&[Option<f64>]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// The value at the final bar, when the series exists and is defined
    /// there.
    pub fn latest(&self, name: &str) -> Option<f64> {
        self.get(name)?.last().copied().flatten()
    }

    /// The values at the last two bars, when both are defined — the inputs
    /// for crossover detection.
    pub fn latest_pair(&self, name: &str) -> Option<(f64, f64)> {
        let series = self.get(name)?;
        if series.len() < 2 {
            return None;
        }
        let prev = series[series.len() - 2]?;
        let last = series[series.len() - 1]?;
        Some((prev, last))
    }
}

/// Compute the requested indicator families over `series`.
///
/// Listing a family twice is harmless: the second pass overwrites the first
/// with identical values.
/// A family whose minimum lookback exceeds the series length contributes
/// all-`None` series rather than failing, so the caller can always rely on
/// the full set of requested keys being present.
pub fn compute_indicators(
    series: &BarSeries,
    families: &[IndicatorFamily],
    params: &IndicatorParams,
) -> DerivedSet {
    let closes = series.closes();
    let volumes = series.volumes();
    let highs: Vec<f64> = series.bars().iter().map(|b| b.high).collect();
    let lows: Vec<f64> = series.bars().iter().map(|b| b.low).collect();

    let mut out = DerivedSet::new(series.dates());

    for family in families {
        match family {
            IndicatorFamily::Ma => {
                for &period in &params.ma_periods {
                    out.insert(
                        format!("MA{period}"),
                        ma::rolling_mean(&closes, period as usize),
                    );
                }
            }
            IndicatorFamily::Ema => {
                for &period in &params.ema_periods {
                    out.insert_full(format!("EMA{period}"), ema::ema(&closes, period));
                }
            }
            IndicatorFamily::Boll => {
                let bands = boll::bollinger(&closes, params.boll_period as usize, params.boll_width);
                out.insert("BOLL_MID", bands.mid);
                out.insert("BOLL_UPPER", bands.upper);
                out.insert("BOLL_LOWER", bands.lower);
            }
            IndicatorFamily::Rsi => {
                for &period in &params.rsi_periods {
                    out.insert(format!("RSI{period}"), rsi::rsi(&closes, period as usize));
                }
            }
            IndicatorFamily::Kdj => {
                let kdj = kdj::kdj(
                    &highs,
                    &lows,
                    &closes,
                    params.kdj_period as usize,
                    params.kdj_smooth_k,
                    params.kdj_smooth_d,
                );
                out.insert("K", kdj.k);
                out.insert("D", kdj.d);
                out.insert("J", kdj.j);
            }
            IndicatorFamily::Macd => {
                let macd = macd::macd(&closes, params.macd_fast, params.macd_slow, params.macd_signal);
                out.insert_full("MACD_DIF", macd.dif);
                out.insert_full("MACD_DEA", macd.dea);
                out.insert_full("MACD_HIST", macd.hist);
            }
            IndicatorFamily::Vol => {
                out.insert_full("VOL", volumes.clone());
            }
            IndicatorFamily::VolMa => {
                for &period in &params.vol_ma_periods {
                    out.insert(
                        format!("VOL_MA{period}"),
                        ma::rolling_mean(&volumes, period as usize),
                    );
                }
            }
            IndicatorFamily::Obv => {
                out.insert_full("OBV", volume::obv(&closes, &volumes));
            }
        }
    }

    debug!(
        symbol = series.symbol(),
        bars = series.len(),
        series = out.series.len(),
        "computed indicators"
    );
    out
}
