// =============================================================================
// Consecutive-direction streaks
// =============================================================================
//
// Scan bar-to-bar close changes: a streak grows on consecutive same-sign
// changes, restarts at 1 on a sign change, and a flat day resets it to 0
// without starting a new run.  Tracked: the streak in progress as of the
// last bar, and the longest up and down runs with the date range they cover
// (dates are those of the bars that *closed* each change).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::series::Bar;

/// Direction of the streak in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    /// No streak in progress (flat last change, or a 1-bar series).
    Flat,
}

/// A completed or in-progress run of same-direction changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakRecord {
    /// Number of consecutive same-sign changes.
    pub length: u32,
    /// Date of the bar closing the first change of the run.
    pub start: NaiveDate,
    /// Date of the bar closing the last change of the run.
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Streaks {
    pub current_direction: Direction,
    /// Length of the streak in progress; 0 when `current_direction` is flat.
    pub current_length: u32,
    /// Longest run of rising closes; `None` when no close ever rose.
    pub max_up: Option<StreakRecord>,
    /// Longest run of falling closes; `None` when no close ever fell.
    pub max_down: Option<StreakRecord>,
}

/// Scan `bars` (validated, non-empty) for direction streaks.
pub fn streaks(bars: &[Bar]) -> Streaks {
    // Signed run length: positive while rising, negative while falling.
    let mut run: i64 = 0;
    let mut run_start: Option<NaiveDate> = None;

    let mut max_up: Option<StreakRecord> = None;
    let mut max_down: Option<StreakRecord> = None;

    for i in 1..bars.len() {
        let delta = bars[i].close - bars[i - 1].close;
        let date = bars[i].date;

        if delta > 0.0 {
            if run > 0 {
                run += 1;
            } else {
                run = 1;
                run_start = Some(date);
            }
            let length = run as u32;
            if max_up.as_ref().map_or(true, |r| length > r.length) {
                max_up = Some(StreakRecord {
                    length,
                    start: run_start.unwrap_or(date),
                    end: date,
                });
            }
        } else if delta < 0.0 {
            if run < 0 {
                run -= 1;
            } else {
                run = -1;
                run_start = Some(date);
            }
            let length = (-run) as u32;
            if max_down.as_ref().map_or(true, |r| length > r.length) {
                max_down = Some(StreakRecord {
                    length,
                    start: run_start.unwrap_or(date),
                    end: date,
                });
            }
        } else {
            // Flat day breaks the run without starting a new one.
            run = 0;
            run_start = None;
        }
    }

    let (current_direction, current_length) = match run.signum() {
        1 => (Direction::Up, run as u32),
        -1 => (Direction::Down, (-run) as u32),
        _ => (Direction::Flat, 0),
    };

    Streaks {
        current_direction,
        current_length,
        max_up,
        max_down,
    }
}
