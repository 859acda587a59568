// =============================================================================
// Bar series — validated OHLCV input shared by every downstream computation
// =============================================================================
//
// A `BarSeries` is the engine's single input type: an ordered, validated
// sequence of daily/weekly/monthly bars for one (symbol, period) pair.  The
// constructor enforces every invariant up front so the indicator, signal and
// analysis code can assume well-formed data and never re-check it.
//
// The engine only ever borrows a series; ownership stays with the caller
// (the storage layer), and nothing here mutates after construction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SeriesError;

/// Sampling period of a bar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Min1,
    Min5,
    Min15,
    Min30,
    Min60,
    Daily,
    Weekly,
    Monthly,
}

impl Default for Period {
    fn default() -> Self {
        Self::Daily
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Min1 => "1min",
            Self::Min5 => "5min",
            Self::Min15 => "15min",
            Self::Min30 => "30min",
            Self::Min60 => "60min",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        };
        write!(f, "{s}")
    }
}

/// A single OHLCV bar.
///
/// `volume` is in shares/lots, `amount` is monetary turnover; both are
/// non-negative.  Price fields satisfy
/// `low <= min(open, close) <= max(open, close) <= high`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub amount: f64,
}

impl Bar {
    /// Check the per-bar invariants, reporting the first violation.
    fn validate(&self, index: usize) -> Result<(), SeriesError> {
        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
            ("amount", self.amount),
        ] {
            if !value.is_finite() {
                return Err(SeriesError::NonFinite {
                    index,
                    date: self.date,
                    field,
                });
            }
        }

        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if value <= 0.0 {
                return Err(SeriesError::NonPositivePrice {
                    index,
                    date: self.date,
                    field,
                    value,
                });
            }
        }

        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        if self.low > body_low || body_high > self.high {
            return Err(SeriesError::InvalidOhlc {
                index,
                date: self.date,
                open: self.open,
                high: self.high,
                low: self.low,
                close: self.close,
            });
        }

        if self.volume < 0.0 {
            return Err(SeriesError::NegativeVolume {
                index,
                date: self.date,
                volume: self.volume,
            });
        }
        if self.amount < 0.0 {
            return Err(SeriesError::NegativeAmount {
                index,
                date: self.date,
                amount: self.amount,
            });
        }

        Ok(())
    }
}

/// Validated, immutable sequence of bars for one (symbol, period) pair.
///
/// Guaranteed after construction:
/// - at least one bar;
/// - dates strictly ascending, no duplicates;
/// - every bar passes the OHLC / non-negativity / finiteness invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    symbol: String,
    period: Period,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Validate `bars` and build a series.
    ///
    /// Bars must already be sorted ascending by date (the storage layer's
    /// contract); a malformed or misordered bar is rejected, never silently
    /// corrected.
    ///
    /// # Errors
    /// - [`SeriesError::Empty`] when `bars` is empty.
    /// - [`SeriesError::DuplicateDate`] / [`SeriesError::UnorderedDates`] on
    ///   date-order violations.
    /// - Per-bar variants for OHLC, volume, amount and finiteness violations.
    pub fn new(
        symbol: impl Into<String>,
        period: Period,
        bars: Vec<Bar>,
    ) -> Result<Self, SeriesError> {
        let symbol = symbol.into();
        if bars.is_empty() {
            debug!(symbol = %symbol, "rejecting empty bar series");
            return Err(SeriesError::Empty);
        }

        for (index, bar) in bars.iter().enumerate() {
            bar.validate(index)?;
            if index > 0 {
                let prev = bars[index - 1].date;
                if bar.date == prev {
                    return Err(SeriesError::DuplicateDate {
                        index,
                        date: bar.date,
                    });
                }
                if bar.date < prev {
                    return Err(SeriesError::UnorderedDates {
                        index,
                        prev,
                        date: bar.date,
                    });
                }
            }
        }

        debug!(symbol = %symbol, %period, len = bars.len(), "bar series validated");
        Ok(Self {
            symbol,
            period,
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always `false` for a constructed series; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> &Bar {
        &self.bars[0]
    }

    pub fn last(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }

    /// Closing prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Volumes, oldest first.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Bar dates, oldest first.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }
}
