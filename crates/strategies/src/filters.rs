// In crates/strategies/src/filters.rs

use core_types::StrategyConfig;
use indicators::{IndicatorKind, IndicatorSet};

/// Minimum volume ratio the volume filter accepts.
const VOLUME_RATIO_FLOOR: f64 = 1.2;
/// Minimum mean |price_vs_trend| the trend filter accepts.
const TREND_DEVIATION_FLOOR: f64 = 0.01;

/// Runs every enabled filter at `index`.
///
/// All enabled filters must pass. The first failure reports why, and a filter
/// whose inputs are still undefined fails closed with an insufficient-data
/// reason rather than guessing.
pub(crate) fn evaluate(
    config: &StrategyConfig,
    set: &IndicatorSet,
    index: usize,
) -> Result<(), String> {
    if config.volume_filter {
        match set.value(IndicatorKind::VolumeRatio, index).get() {
            Some(ratio) if ratio >= VOLUME_RATIO_FLOOR => {}
            Some(ratio) => {
                return Err(format!(
                    "volume filter failed: ratio {ratio:.3} below {VOLUME_RATIO_FLOOR}"
                ));
            }
            None => {
                return Err("volume filter failed: insufficient volume history".to_string());
            }
        }
    }

    if config.volatility_filter {
        match set.value(IndicatorKind::Volatility, index).get() {
            Some(volatility) if volatility >= config.volatility_threshold => {}
            Some(volatility) => {
                return Err(format!(
                    "volatility filter failed: {volatility:.5} below threshold {:.5}",
                    config.volatility_threshold
                ));
            }
            None => {
                return Err(
                    "volatility filter failed: insufficient volatility history".to_string()
                );
            }
        }
    }

    if config.trend_filter {
        let lookback = config.trend_lookback;
        if lookback == 0 || index + 1 < lookback {
            return Err("trend filter failed: insufficient trend history".to_string());
        }
        let window = &set.series(IndicatorKind::PriceVsTrend)[index + 1 - lookback..=index];
        let mut sum = 0.0;
        for point in window {
            match point.get() {
                Some(deviation) => sum += deviation,
                None => {
                    return Err("trend filter failed: insufficient trend history".to_string());
                }
            }
        }
        let mean = sum / lookback as f64;
        if mean.abs() <= TREND_DEVIATION_FLOOR {
            return Err(format!(
                "trend filter failed: weak trend (mean deviation {mean:.5})"
            ));
        }
    }

    Ok(())
}
