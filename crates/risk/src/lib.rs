// In crates/risk/src/lib.rs

use core_types::{RiskState, StrategyConfig};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;

pub mod error;

// Re-export public types
pub use error::{Error, Result};

/// The stateless gate every signal must clear.
///
/// Configuration is validated once, before a strategy may drive a position;
/// the drawdown ceiling is consulted on every evaluation. Both checks reject
/// with a message naming the violated bound rather than a generic failure.
pub struct RiskGate;

impl RiskGate {
    /// Validates a strategy config against the numeric invariants.
    ///
    /// Must run before any signal from this config is allowed to trigger a
    /// position open. The first violated bound is reported verbatim.
    pub fn validate_config(config: &StrategyConfig) -> Result<()> {
        if config.fast_period >= config.slow_period {
            return Err(Error::InvalidConfig(format!(
                "fast_period ({}) must be less than slow_period ({})",
                config.fast_period, config.slow_period
            )));
        }
        if config.fast_period < 5 {
            return Err(Error::InvalidConfig(format!(
                "fast_period ({}) must be at least 5",
                config.fast_period
            )));
        }
        if config.slow_period > 200 {
            return Err(Error::InvalidConfig(format!(
                "slow_period ({}) must be at most 200",
                config.slow_period
            )));
        }
        if !(config.position_size_fraction > 0.0 && config.position_size_fraction <= 0.10) {
            return Err(Error::InvalidConfig(format!(
                "position_size_fraction ({}) must be within (0, 0.10]",
                config.position_size_fraction
            )));
        }
        if !(config.stop_loss_fraction > 0.0 && config.stop_loss_fraction <= 0.10) {
            return Err(Error::InvalidConfig(format!(
                "stop_loss_fraction ({}) must be within (0, 0.10]",
                config.stop_loss_fraction
            )));
        }
        if !(config.take_profit_fraction > 0.0 && config.take_profit_fraction <= 0.20) {
            return Err(Error::InvalidConfig(format!(
                "take_profit_fraction ({}) must be within (0, 0.20]",
                config.take_profit_fraction
            )));
        }
        if !(config.max_drawdown_fraction > 0.0 && config.max_drawdown_fraction <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "max_drawdown_fraction ({}) must be within (0, 1]",
                config.max_drawdown_fraction
            )));
        }
        if !(config.signal_threshold >= 0.0 && config.signal_threshold.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "signal_threshold ({}) must be a finite non-negative number",
                config.signal_threshold
            )));
        }
        if config.leverage < 1 {
            return Err(Error::InvalidConfig(format!(
                "leverage ({}) must be at least 1",
                config.leverage
            )));
        }
        Ok(())
    }

    /// Consults the drawdown ceiling for the currently open position.
    ///
    /// Past the ceiling every non-hold signal is suppressed regardless of
    /// crossover strength; the reason is surfaced to the caller. This is a
    /// recorded decision, not a fault.
    pub fn check_drawdown(config: &StrategyConfig, risk_state: Option<&RiskState>) -> Result<()> {
        let Some(state) = risk_state else {
            return Ok(());
        };
        let ceiling = Decimal::from_f64(config.max_drawdown_fraction).unwrap_or(Decimal::ZERO);
        if state.current_drawdown > ceiling {
            return Err(Error::Suppressed {
                reason: format!(
                    "drawdown {} exceeds the configured ceiling {}",
                    state.current_drawdown, ceiling
                ),
            });
        }
        Ok(())
    }
}
