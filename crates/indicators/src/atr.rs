// In crates/indicators/src/atr.rs

use crate::value::IndicatorValue;
use core_types::Candle;

/// Average true range: a simple moving average of the true range over
/// `period` bars.
///
/// True range needs the previous close, so it exists from index 1; the ATR
/// itself is `Undefined` for every index below `period`.
pub fn atr(candles: &[Candle], period: usize) -> Vec<IndicatorValue> {
    let n = candles.len();
    let mut out = vec![IndicatorValue::Undefined; n];
    if period == 0 || n == 0 {
        return out;
    }

    let mut true_ranges = vec![f64::NAN; n];
    for i in 1..n {
        true_ranges[i] = candles[i].true_range(candles[i - 1].close);
    }

    let mut sum = 0.0;
    let mut undefined_in_window = 0usize;
    for i in 1..n {
        let entering = true_ranges[i];
        if entering.is_finite() {
            sum += entering;
        } else {
            undefined_in_window += 1;
        }
        if i > period {
            let leaving = true_ranges[i - period];
            if leaving.is_finite() {
                sum -= leaving;
            } else {
                undefined_in_window -= 1;
            }
        }
        if i >= period && undefined_in_window == 0 {
            out[i] = IndicatorValue::Value(sum / period as f64);
        }
    }
    out
}
