use crate::types::{PerformanceSummary, TradeEvent};
use core_types::{RiskState, StrategyConfig};
use rust_decimal::Decimal;

/// The engine responsible for aggregating trade events into a summary.
///
/// Pure read-only aggregation: it never mutates the log and holds no state of
/// its own.
#[derive(Default)]
pub struct PerformanceTracker;

impl PerformanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a pair's trade log into a summary report.
    ///
    /// The configured limits and the live risk state ride along so the report
    /// shows sizing, leverage and drawdown next to the trade counts.
    pub fn summarize(
        &self,
        events: &[TradeEvent],
        config: &StrategyConfig,
        risk_state: Option<&RiskState>,
    ) -> PerformanceSummary {
        let mut summary = PerformanceSummary {
            max_drawdown_limit: config.max_drawdown_fraction,
            leverage: config.leverage,
            position_size_fraction: config.position_size_fraction,
            current_drawdown: risk_state
                .map(|state| state.current_drawdown)
                .unwrap_or(Decimal::ZERO),
            ..PerformanceSummary::default()
        };

        for event in events {
            match event {
                TradeEvent::Opened { .. } => summary.positions_opened += 1,
                TradeEvent::Closed { pnl_fraction, .. } => {
                    summary.total_trades += 1;
                    if *pnl_fraction > Decimal::ZERO {
                        summary.winning_trades += 1;
                    } else if *pnl_fraction < Decimal::ZERO {
                        summary.losing_trades += 1;
                    }
                    summary.net_pnl_fraction += *pnl_fraction;
                }
            }
        }

        // Guard the ratio: an empty log reports a zero win rate, never a
        // division fault.
        if summary.total_trades > 0 {
            summary.win_rate = summary.winning_trades as f64 / summary.total_trades as f64;
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExitReason;
    use chrono::{TimeZone, Utc};
    use core_types::{MaKind, Side};
    use rust_decimal_macros::dec;

    fn config() -> StrategyConfig {
        StrategyConfig {
            ma_kind: MaKind::Sma,
            fast_period: 10,
            slow_period: 30,
            atr_period: 14,
            signal_threshold: 0.001,
            position_size_fraction: 0.05,
            stop_loss_fraction: 0.02,
            take_profit_fraction: 0.04,
            max_drawdown_fraction: 0.15,
            leverage: 2,
            volume_filter: false,
            volatility_filter: false,
            volatility_threshold: 0.005,
            trend_filter: false,
            trend_lookback: 5,
        }
    }

    fn closed(pnl_fraction: Decimal) -> TradeEvent {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        TradeEvent::Closed {
            side: Side::Long,
            entry_price: dec!(100),
            exit_price: dec!(100) * (Decimal::ONE + pnl_fraction),
            size_fraction: dec!(0.05),
            pnl_fraction,
            reason: ExitReason::TakeProfit,
            leverage: 2,
            opened_at: at,
            closed_at: at,
        }
    }

    fn opened() -> TradeEvent {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        TradeEvent::Opened {
            side: Side::Long,
            entry_price: dec!(100),
            size_fraction: dec!(0.05),
            stop_loss_price: dec!(98),
            take_profit_price: dec!(104),
            confidence: 42.0,
            leverage: 2,
            opened_at: at,
        }
    }

    #[test]
    fn empty_log_reports_zero_win_rate() {
        let summary = PerformanceTracker::new().summarize(&[], &config(), None);
        assert_eq!(summary.total_trades, 0);
        assert_eq!(summary.win_rate, 0.0);
        assert_eq!(summary.current_drawdown, Decimal::ZERO);
    }

    #[test]
    fn win_rate_counts_only_closed_trades() {
        let events = vec![
            opened(),
            closed(dec!(0.04)),
            opened(),
            closed(dec!(-0.02)),
            opened(),
            closed(dec!(0.01)),
            opened(), // still open, no Closed counterpart yet
        ];
        let summary = PerformanceTracker::new().summarize(&events, &config(), None);
        assert_eq!(summary.positions_opened, 4);
        assert_eq!(summary.total_trades, 3);
        assert_eq!(summary.winning_trades, 2);
        assert_eq!(summary.losing_trades, 1);
        assert!((summary.win_rate - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.net_pnl_fraction, dec!(0.03));
    }

    #[test]
    fn config_limits_ride_along() {
        let state = RiskState {
            peak_equity: dec!(100),
            current_drawdown: dec!(0.07),
        };
        let summary = PerformanceTracker::new().summarize(&[], &config(), Some(&state));
        assert_eq!(summary.max_drawdown_limit, 0.15);
        assert_eq!(summary.leverage, 2);
        assert_eq!(summary.position_size_fraction, 0.05);
        assert_eq!(summary.current_drawdown, dec!(0.07));
    }

    #[test]
    fn breakeven_trade_is_neither_win_nor_loss() {
        let events = vec![opened(), closed(dec!(0))];
        let summary = PerformanceTracker::new().summarize(&events, &config(), None);
        assert_eq!(summary.total_trades, 1);
        assert_eq!(summary.winning_trades, 0);
        assert_eq!(summary.losing_trades, 0);
        assert_eq!(summary.win_rate, 0.0);
    }
}
