// In crates/indicators/src/lib.rs

pub mod atr;
pub mod derived;
pub mod ema;
pub mod sma;
pub mod value;

pub use value::IndicatorValue;

use core_types::{Candle, MaKind, StrategyConfig};

/// Lookback of the volume baseline used by `volume_ratio`.
pub const VOLUME_SMA_PERIOD: usize = 20;
/// Lookback of the trend baseline used by `price_vs_trend`.
pub const TREND_SMA_PERIOD: usize = 100;

/// Names of the series an [`IndicatorSet`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    FastMa,
    SlowMa,
    Atr,
    VolumeSma,
    VolumeRatio,
    Volatility,
    TrendSma,
    PriceVsTrend,
}

/// The full set of indicator series for one candle history, every series
/// aligned 1:1 with the candles that produced it.
///
/// An empty set (`is_empty`) means the history was too short for the
/// configured slow period — callers must treat that as "insufficient data"
/// and hold, never as a computation fault.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    len: usize,
    fast_ma: Vec<IndicatorValue>,
    slow_ma: Vec<IndicatorValue>,
    atr: Vec<IndicatorValue>,
    volume_sma: Vec<IndicatorValue>,
    volume_ratio: Vec<IndicatorValue>,
    volatility: Vec<IndicatorValue>,
    trend_sma: Vec<IndicatorValue>,
    price_vs_trend: Vec<IndicatorValue>,
}

impl IndicatorSet {
    /// Computes every series for the given candle history.
    ///
    /// Returns an empty set when fewer than `slow_period` candles exist. The
    /// longer-lookback series (trend baseline and its derivative) stay
    /// `Undefined` until their own warm-up completes.
    pub fn compute(candles: &[Candle], config: &StrategyConfig) -> Self {
        if config.slow_period == 0 || candles.len() < config.required_candles() {
            return Self::default();
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();

        let (fast_ma, slow_ma) = match config.ma_kind {
            MaKind::Sma => (
                sma::sma(&closes, config.fast_period),
                sma::sma(&closes, config.slow_period),
            ),
            MaKind::Ema => (
                ema::ema(&closes, config.fast_period),
                ema::ema(&closes, config.slow_period),
            ),
        };

        let atr = atr::atr(candles, config.atr_period);
        let volume_sma = sma::sma(&volumes, VOLUME_SMA_PERIOD);
        let volume_ratio = derived::volume_ratio(&volumes, &volume_sma);
        let volatility = derived::volatility(&atr, &closes);
        let trend_sma = sma::sma(&closes, TREND_SMA_PERIOD);
        let price_vs_trend = derived::price_vs_trend(&closes, &trend_sma);

        Self {
            len: candles.len(),
            fast_ma,
            slow_ma,
            atr,
            volume_sma,
            volume_ratio,
            volatility,
            trend_sma,
            price_vs_trend,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn series(&self, kind: IndicatorKind) -> &[IndicatorValue] {
        match kind {
            IndicatorKind::FastMa => &self.fast_ma,
            IndicatorKind::SlowMa => &self.slow_ma,
            IndicatorKind::Atr => &self.atr,
            IndicatorKind::VolumeSma => &self.volume_sma,
            IndicatorKind::VolumeRatio => &self.volume_ratio,
            IndicatorKind::Volatility => &self.volatility,
            IndicatorKind::TrendSma => &self.trend_sma,
            IndicatorKind::PriceVsTrend => &self.price_vs_trend,
        }
    }

    /// The value at `index`, or `Undefined` when out of range.
    pub fn value(&self, kind: IndicatorKind, index: usize) -> IndicatorValue {
        self.series(kind)
            .get(index)
            .copied()
            .unwrap_or(IndicatorValue::Undefined)
    }

    pub fn last(&self, kind: IndicatorKind) -> IndicatorValue {
        self.series(kind)
            .last()
            .copied()
            .unwrap_or(IndicatorValue::Undefined)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::candles_from_closes;

    fn config(fast: usize, slow: usize) -> StrategyConfig {
        StrategyConfig {
            ma_kind: MaKind::Sma,
            fast_period: fast,
            slow_period: slow,
            atr_period: 14,
            signal_threshold: 0.0,
            position_size_fraction: 0.05,
            stop_loss_fraction: 0.02,
            take_profit_fraction: 0.04,
            max_drawdown_fraction: 0.2,
            leverage: 1,
            volume_filter: false,
            volatility_filter: false,
            volatility_threshold: 0.005,
            trend_filter: false,
            trend_lookback: 5,
        }
    }

    #[test]
    fn short_history_yields_empty_set() {
        let candles = candles_from_closes(&[100.0; 29]);
        let set = IndicatorSet::compute(&candles, &config(10, 30));
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(
            set.last(IndicatorKind::FastMa),
            IndicatorValue::Undefined
        );
    }

    #[test]
    fn series_are_aligned_with_candles() {
        let candles = candles_from_closes(&(0..40).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        let set = IndicatorSet::compute(&candles, &config(10, 30));
        assert_eq!(set.len(), 40);
        for kind in [
            IndicatorKind::FastMa,
            IndicatorKind::SlowMa,
            IndicatorKind::Atr,
            IndicatorKind::VolumeSma,
            IndicatorKind::VolumeRatio,
            IndicatorKind::Volatility,
            IndicatorKind::TrendSma,
            IndicatorKind::PriceVsTrend,
        ] {
            assert_eq!(set.series(kind).len(), 40, "misaligned series {kind:?}");
        }
    }

    #[test]
    fn trend_series_warm_up_independently() {
        // 40 candles clear the slow period but not the 100-bar trend window.
        let candles = candles_from_closes(&(0..40).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        let set = IndicatorSet::compute(&candles, &config(10, 30));
        assert!(set.last(IndicatorKind::SlowMa).is_defined());
        assert!(!set.last(IndicatorKind::TrendSma).is_defined());
        assert!(!set.last(IndicatorKind::PriceVsTrend).is_defined());
    }

    #[test]
    fn out_of_range_lookup_is_undefined() {
        let candles = candles_from_closes(&(0..30).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        let set = IndicatorSet::compute(&candles, &config(10, 30));
        assert_eq!(set.value(IndicatorKind::FastMa, 99), IndicatorValue::Undefined);
    }
}
