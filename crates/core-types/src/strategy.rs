use serde::{Deserialize, Serialize};

/// Which moving average the crossover lanes are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaKind {
    #[default]
    Sma,
    Ema,
}

/// Immutable configuration for one crossover strategy instance.
///
/// Created once at strategy initialization and never mutated; replacing a
/// config means building a new one wholesale. The risk gate validates every
/// instance against the numeric bounds before it may drive a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(default)]
    pub ma_kind: MaKind,
    pub fast_period: usize,
    pub slow_period: usize,
    #[serde(default = "default_atr_period")]
    pub atr_period: usize,
    /// Minimum crossover strength (|fast - slow| / slow) for a signal.
    pub signal_threshold: f64,
    pub position_size_fraction: f64,
    pub stop_loss_fraction: f64,
    pub take_profit_fraction: f64,
    pub max_drawdown_fraction: f64,
    #[serde(default = "default_leverage")]
    pub leverage: u8,

    // Filter gate. Each filter is enabled independently.
    #[serde(default)]
    pub volume_filter: bool,
    #[serde(default)]
    pub volatility_filter: bool,
    #[serde(default = "default_volatility_threshold")]
    pub volatility_threshold: f64,
    #[serde(default)]
    pub trend_filter: bool,
    #[serde(default = "default_trend_lookback")]
    pub trend_lookback: usize,
}

impl StrategyConfig {
    /// The minimum number of candles before any crossover can be evaluated.
    pub fn required_candles(&self) -> usize {
        self.slow_period
    }
}

fn default_atr_period() -> usize {
    14
}

fn default_leverage() -> u8 {
    1
}

fn default_volatility_threshold() -> f64 {
    0.005
}

fn default_trend_lookback() -> usize {
    5
}
