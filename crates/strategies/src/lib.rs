// In crates/strategies/src/lib.rs

use core_types::{Candle, Signal};

pub mod crossover;
pub mod factory;
mod filters;

pub use crossover::MaCrossover;
pub use factory::create_strategy;

/// The universal interface for a trading strategy.
///
/// A strategy is responsible for analyzing market data and producing a
/// trading `Signal`. Implementations recompute their indicator state from the
/// provided candle history on every call, which keeps them stateless between
/// assessments and makes every evaluation deterministic for a given input.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    fn assess(&self, candles: &[Candle]) -> Signal;
}

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::{Duration, TimeZone, Utc};
    use core_types::{Candle, MaKind, StrategyConfig};

    pub fn config(fast: usize, slow: usize) -> StrategyConfig {
        StrategyConfig {
            ma_kind: MaKind::Sma,
            fast_period: fast,
            slow_period: slow,
            atr_period: 3,
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

    pub fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
        let base = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                open_time: base + Duration::minutes(i as i64),
                open: close,
                high: close + 1.0,
                low: (close - 1.0).max(0.5),
                close,
                volume: 1000.0,
            })
            .collect()
    }

    pub fn candles_with_volumes(closes: &[f64], volumes: &[f64]) -> Vec<Candle> {
        let mut candles = candles_from_closes(closes);
        for (candle, &volume) in candles.iter_mut().zip(volumes) {
            candle.volume = volume;
        }
        candles
    }
}
