// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// Formula:
//   k      = 2 / (period + 1)
//   EMA_0  = value_0                          (seed)
//   EMA_t  = value_t * k + EMA_{t-1} * (1-k)
//
// Seeding with the first value means the series is defined at every index —
// there is no warm-up region.  This matches the convention of the MACD
// components (DIF is a difference of two such EMAs, DEA is the same
// recurrence applied to DIF).
//
// Implemented as an explicit single-pass fold so the recurrence order is
// fixed and the computation stays stateless between calls.

/// EMA series seeded with the first input value; one output per input.
///
/// # Edge cases
/// - `period == 0` or empty input => empty vec; the dispatcher maps this to
///   an all-undefined derived series.
/// - Output length always equals input length otherwise.
pub fn ema(values: &[f64], period: u32) -> Vec<f64> {
    if period == 0 || values.is_empty() {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = values[0];
    out.push(prev);

    for &value in &values[1..] {
        prev = value * k + prev * (1.0 - k);
        out.push(prev);
    }

    out
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(ema(&[], 12).is_empty());
    }

    #[test]
    fn period_zero_gives_empty_output() {
        assert!(ema(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn seeded_with_first_value() {
        let out = ema(&[42.0, 43.0, 44.0], 12);
        assert_eq!(out[0], 42.0);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn single_value_is_its_own_ema() {
        assert_eq!(ema(&[100.0], 26), vec![100.0]);
    }

    #[test]
    fn matches_hand_applied_recurrence() {
        // EMA(3): k = 0.5.
        let values = [2.0, 4.0, 8.0];
        let out = ema(&values, 3);
        assert_eq!(out[0], 2.0);
        assert!((out[1] - 3.0).abs() < 1e-12); // 4*0.5 + 2*0.5
        assert!((out[2] - 5.5).abs() < 1e-12); // 8*0.5 + 3*0.5
    }

    #[test]
    fn flat_input_stays_flat() {
        let out = ema(&[50.0; 40], 12);
        for v in out {
            assert!((v - 50.0).abs() < 1e-12);
        }
    }
}
