// =============================================================================
// Volume indicators — VOL, VOL_MA and On-Balance Volume (OBV)
// =============================================================================
//
// VOL is the raw volume echoed as a derived series so the API layer gets a
// uniform shape; VOL_MA reuses the rolling mean from `ma`.
//
// OBV accumulates volume signed by the direction of the close-to-close move:
//
//   OBV_0 = volume_0
//   OBV_i = OBV_{i-1} + volume_i   when close_i > close_{i-1}
//         = OBV_{i-1} - volume_i   when close_i < close_{i-1}
//         = OBV_{i-1}              otherwise (flat close carries forward)

/// On-Balance Volume series, one value per bar, defined everywhere.
///
/// # Edge cases
/// - Empty input => empty vec.
/// - A single bar yields `[volume_0]`.
pub fn obv(closes: &[f64], volumes: &[f64]) -> Vec<f64> {
    debug_assert_eq!(closes.len(), volumes.len());
    if closes.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(closes.len());
    let mut acc = volumes[0];
    out.push(acc);

    for i in 1..closes.len() {
        if closes[i] > closes[i - 1] {
            acc += volumes[i];
        } else if closes[i] < closes[i - 1] {
            acc -= volumes[i];
        }
        out.push(acc);
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
        assert!(obv(&[], &[]).is_empty());
    }

    #[test]
    fn single_bar_seeds_with_its_volume() {
        assert_eq!(obv(&[100.0], &[5000.0]), vec![5000.0]);
    }

    #[test]
    fn rising_closes_accumulate_volumes() {
        // Strictly increasing closes: OBV is the running volume total.
        let closes = [1.0, 2.0, 3.0, 4.0];
        let volumes = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(obv(&closes, &volumes), vec![10.0, 30.0, 60.0, 100.0]);
    }

    #[test]
    fn falling_closes_subtract_volumes() {
        let closes = [4.0, 3.0, 2.0];
        let volumes = [10.0, 20.0, 30.0];
        assert_eq!(obv(&closes, &volumes), vec![10.0, -10.0, -40.0]);
    }

    #[test]
    fn flat_close_carries_forward() {
        let closes = [2.0, 2.0, 3.0];
        let volumes = [10.0, 999.0, 5.0];
        assert_eq!(obv(&closes, &volumes), vec![10.0, 10.0, 15.0]);
    }
}
