// In crates/analytics/src/types.rs

use chrono::{DateTime, Utc};
use core_types::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a position left the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
    OppositeCrossover,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ExitReason::StopLoss => "stop-loss hit",
            ExitReason::TakeProfit => "take-profit hit",
            ExitReason::OppositeCrossover => "opposite crossover",
        };
        write!(f, "{text}")
    }
}

/// One immutable entry of the append-only trade log.
///
/// Every open and every close transition appends exactly one event; entries
/// are never mutated after the append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TradeEvent {
    Opened {
        side: Side,
        entry_price: Decimal,
        size_fraction: Decimal,
        stop_loss_price: Decimal,
        take_profit_price: Decimal,
        confidence: f64,
        leverage: u8,
        opened_at: DateTime<Utc>,
    },
    Closed {
        side: Side,
        entry_price: Decimal,
        exit_price: Decimal,
        size_fraction: Decimal,
        /// Realized PnL as a fraction of the entry price.
        pnl_fraction: Decimal,
        reason: ExitReason,
        leverage: u8,
        opened_at: DateTime<Utc>,
        closed_at: DateTime<Utc>,
    },
}

/// Aggregated view over one pair's trade log.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PerformanceSummary {
    pub positions_opened: u32,
    /// Completed (closed) trades.
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    /// winning_trades / total_trades, 0 when no trade has closed yet.
    pub win_rate: f64,
    /// Sum of realized per-trade PnL fractions.
    pub net_pnl_fraction: Decimal,
    pub current_drawdown: Decimal,
    pub max_drawdown_limit: f64,
    pub leverage: u8,
    pub position_size_fraction: f64,
}
