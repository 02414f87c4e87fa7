// In crates/indicators/src/ema.rs

use crate::value::IndicatorValue;

/// Exponential moving average of a value series.
///
/// Seeds with the first usable close and applies the multiplier
/// `2 / (period + 1)` from then on. A non-finite input propagates the
/// previous value unchanged instead of poisoning the rest of the series.
pub fn ema(values: &[f64], period: usize) -> Vec<IndicatorValue> {
    let n = values.len();
    let mut out = vec![IndicatorValue::Undefined; n];
    if period == 0 {
        return out;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut previous: Option<f64> = None;
    for (i, &value) in values.iter().enumerate() {
        if value.is_finite() {
            previous = Some(match previous {
                Some(prev) => value * k + prev * (1.0 - k),
                None => value,
            });
        }
        if let Some(current) = previous {
            out[i] = IndicatorValue::Value(current);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::assert_approx;

    #[test]
    fn seeds_with_first_close() {
        let out = ema(&[10.0, 20.0, 30.0], 3);
        assert_eq!(out[0].get(), Some(10.0));
        // k = 0.5: 20*0.5 + 10*0.5 = 15, then 30*0.5 + 15*0.5 = 22.5
        assert_approx(out[1].get().unwrap(), 15.0);
        assert_approx(out[2].get().unwrap(), 22.5);
    }

    #[test]
    fn period_one_equals_raw_series_exactly() {
        let values = [10.0, 20.5, 19.25, 30.0, 29.75];
        let out = ema(&values, 1);
        for (value, point) in values.iter().zip(&out) {
            assert_eq!(point.get(), Some(*value));
        }
    }

    #[test]
    fn non_finite_input_propagates_previous_value() {
        let out = ema(&[10.0, f64::NAN, 30.0], 3);
        assert_eq!(out[0].get(), Some(10.0));
        assert_eq!(out[1].get(), Some(10.0));
        // Resumes from the propagated value: 30*0.5 + 10*0.5 = 20
        assert_approx(out[2].get().unwrap(), 20.0);
    }

    #[test]
    fn leading_non_finite_inputs_stay_undefined() {
        let out = ema(&[f64::NAN, f64::NAN, 30.0, 40.0], 3);
        assert_eq!(out[0], IndicatorValue::Undefined);
        assert_eq!(out[1], IndicatorValue::Undefined);
        // The first usable close seeds the series.
        assert_eq!(out[2].get(), Some(30.0));
        assert_approx(out[3].get().unwrap(), 35.0);
    }

    #[test]
    fn flat_series_stays_flat() {
        let out = ema(&[100.0; 6], 4);
        for point in out {
            assert_approx(point.get().unwrap(), 100.0);
        }
    }
}
