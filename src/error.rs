// =============================================================================
// Validation-failure taxonomy
// =============================================================================
//
// The only errors the engine ever surfaces are input-validation failures: a
// bar series that is empty or contains a malformed bar is rejected before any
// computation starts.  Insufficient history is *data* (an undefined point in
// a derived series), never an error, and degenerate numeric conditions are
// resolved by fixed conventions inside each indicator.

use chrono::NaiveDate;
use thiserror::Error;

/// Why a `BarSeries` could not be constructed.
///
/// Every variant carries enough context (index and usually date) for the
/// caller to report exactly which bar broke the contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    /// No bars at all — nothing can be computed.
    #[error("bar series is empty")]
    Empty,

    /// Dates must be strictly ascending.
    #[error("bar {index}: date {date} is not after previous date {prev}")]
    UnorderedDates {
        index: usize,
        prev: NaiveDate,
        date: NaiveDate,
    },

    /// Two bars share the same date.
    #[error("bar {index}: duplicate date {date}")]
    DuplicateDate { index: usize, date: NaiveDate },

    /// `low <= min(open, close) <= max(open, close) <= high` was violated.
    #[error(
        "bar {index} ({date}): OHLC ordering violated \
         (open={open}, high={high}, low={low}, close={close})"
    )]
    InvalidOhlc {
        index: usize,
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    },

    /// Volume must be >= 0.
    #[error("bar {index} ({date}): negative volume {volume}")]
    NegativeVolume {
        index: usize,
        date: NaiveDate,
        volume: f64,
    },

    /// Amount (monetary turnover) must be >= 0.
    #[error("bar {index} ({date}): negative amount {amount}")]
    NegativeAmount {
        index: usize,
        date: NaiveDate,
        amount: f64,
    },

    /// Price fields must be strictly positive (returns divide by close).
    #[error("bar {index} ({date}): non-positive price in field `{field}` ({value})")]
    NonPositivePrice {
        index: usize,
        date: NaiveDate,
        field: &'static str,
        value: f64,
    },

    /// NaN or infinity in any numeric field.
    #[error("bar {index} ({date}): non-finite value in field `{field}`")]
    NonFinite {
        index: usize,
        date: NaiveDate,
        field: &'static str,
    },
}
