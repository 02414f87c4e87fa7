// In crates/indicators/src/derived.rs

use crate::value::IndicatorValue;

/// `volume / volume_sma`. Undefined while the volume average is warming up
/// or when the average is zero (a dead market yields no ratio, not infinity).
pub fn volume_ratio(volumes: &[f64], volume_sma: &[IndicatorValue]) -> Vec<IndicatorValue> {
    volumes
        .iter()
        .zip(volume_sma)
        .map(|(&volume, average)| match average.get() {
            Some(avg) if avg != 0.0 && volume.is_finite() => {
                IndicatorValue::from_finite(volume / avg)
            }
            _ => IndicatorValue::Undefined,
        })
        .collect()
}

/// `ATR / close`: the volatility ratio used by the volatility filter.
pub fn volatility(atr: &[IndicatorValue], closes: &[f64]) -> Vec<IndicatorValue> {
    atr.iter()
        .zip(closes)
        .map(|(range, &close)| match range.get() {
            Some(r) if close.is_finite() && close != 0.0 => IndicatorValue::from_finite(r / close),
            _ => IndicatorValue::Undefined,
        })
        .collect()
}

/// `(close - trend_sma) / trend_sma`: fractional deviation from the trend
/// baseline.
pub fn price_vs_trend(closes: &[f64], trend_sma: &[IndicatorValue]) -> Vec<IndicatorValue> {
    closes
        .iter()
        .zip(trend_sma)
        .map(|(&close, trend)| match trend.get() {
            Some(t) if t != 0.0 && close.is_finite() => {
                IndicatorValue::from_finite((close - t) / t)
            }
            _ => IndicatorValue::Undefined,
        })
        .collect()
}
