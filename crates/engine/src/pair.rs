// In crates/engine/src/pair.rs

use crate::error::Result;
use crate::state_store::PairState;
use analytics::{ExitReason, TradeEvent};
use chrono::{DateTime, Utc};
use core_types::{
    Candle, Error as CandleError, PairId, Position, RiskState, Side, Signal, StrategyConfig,
    Symbol,
};
use num_traits::FromPrimitive;
use risk::RiskGate;
use rust_decimal::Decimal;
use std::collections::VecDeque;
use strategies::{Strategy, create_strategy};

/// The number of candles kept in the in-memory evaluation window: enough for
/// the longest configurable lookback plus the previous sample the crossover
/// detector needs.
pub const CANDLE_HISTORY_SIZE: usize = 256;

/// The candle prices an evaluation works with, lifted into the money type
/// once per bar.
struct BarPrices {
    low: Decimal,
    high: Decimal,
    close: Decimal,
}

/// Represents a single, independent evaluation pipeline for one
/// symbol-strategy pair.
///
/// Owns that pair's candle window, open position, risk state and trade log
/// exclusively; nothing here is shared across pairs, so pairs can run on
/// separate workers without locking. Candles must arrive in timestamp order,
/// one full evaluation per candle.
pub struct PairEngine {
    pair: PairId,
    config: StrategyConfig,
    stop_loss_fraction: Decimal,
    take_profit_fraction: Decimal,
    size_fraction: Decimal,
    strategy: Box<dyn Strategy + Send + Sync>,
    /// The in-memory "hot" window of recent candles for this pair.
    candles: VecDeque<Candle>,
    position: Option<Position>,
    risk_state: Option<RiskState>,
    trades: Vec<TradeEvent>,
}

impl PairEngine {
    /// Creates a fresh engine for one pair. The config is risk-validated
    /// before anything else; an invalid bound refuses to start.
    pub fn new(symbol: Symbol, config: StrategyConfig) -> Result<Self> {
        Self::build(symbol, config, None, None, Vec::new())
    }

    /// Restores an engine from a persisted state snapshot.
    ///
    /// The candle window is not part of the snapshot; call
    /// [`PairEngine::preload`] with recent history before resuming so the
    /// indicator lookbacks are warm.
    pub fn from_state(symbol: Symbol, state: PairState) -> Result<Self> {
        Self::build(
            symbol,
            state.config,
            state.position,
            state.risk_state,
            state.trade_log,
        )
    }

    fn build(
        symbol: Symbol,
        config: StrategyConfig,
        position: Option<Position>,
        risk_state: Option<RiskState>,
        trades: Vec<TradeEvent>,
    ) -> Result<Self> {
        RiskGate::validate_config(&config)?;
        let stop_loss_fraction = fraction("stop_loss_fraction", config.stop_loss_fraction)?;
        let take_profit_fraction = fraction("take_profit_fraction", config.take_profit_fraction)?;
        let size_fraction = fraction("position_size_fraction", config.position_size_fraction)?;

        let strategy = create_strategy(&config);
        let pair = PairId {
            symbol,
            strategy: strategy.name().to_string(),
        };
        tracing::info!(pair = %pair, "creating pair engine");

        Ok(Self {
            pair,
            config,
            stop_loss_fraction,
            take_profit_fraction,
            size_fraction,
            strategy,
            candles: VecDeque::with_capacity(CANDLE_HISTORY_SIZE + 1),
            position,
            risk_state,
            trades,
        })
    }

    /// Seeds the candle window without evaluating.
    ///
    /// Used after a state restore: the window is warmed with history the
    /// caller already evaluated, so no transition can fire twice.
    pub fn preload(&mut self, candles: &[Candle]) -> Result<()> {
        for candle in candles {
            self.validate(candle)?;
            self.push_candle(*candle);
        }
        Ok(())
    }

    /// Runs one full evaluation: protective exits, risk bookkeeping, signal
    /// generation, the drawdown gate, and any entry or liquidation the gated
    /// signal triggers.
    ///
    /// A malformed or non-monotonic candle rejects this evaluation and leaves
    /// every piece of state untouched; the next valid candle proceeds
    /// normally.
    pub fn on_candle(&mut self, candle: Candle) -> Result<Signal> {
        let prices = self.validate(&candle)?;
        self.push_candle(candle);

        // 1. Intrabar protective exits come first. A bar that stops the
        //    position out is not re-entered.
        if let Some(position) = self.position.clone() {
            if let Some((exit_price, reason)) = exit_level_crossed(&position, &prices) {
                self.close_position(&position, exit_price, reason, candle.open_time);
                return Ok(Signal::hold(format!("position closed: {reason}")));
            }
        }

        // 2. Mark the open position to this close: unrealized PnL feeds the
        //    peak-equity and drawdown bookkeeping.
        if let Some(position) = self.position.as_ref() {
            let equity =
                position.entry_price * (Decimal::ONE + position.pnl_fraction(prices.close));
            if let Some(state) = self.risk_state.as_mut() {
                state.update(equity);
            }
        }

        // 3. Assess the strategy over the current window.
        let history: Vec<Candle> = self.candles.iter().copied().collect();
        let mut signal = self.strategy.assess(&history);

        // 4. The risk gate may suppress any non-hold signal past the
        //    drawdown ceiling; the reason is recorded on the emitted signal.
        if !signal.is_hold() {
            if let Err(err) = RiskGate::check_drawdown(&self.config, self.risk_state.as_ref()) {
                tracing::warn!(pair = %self.pair, reason = %err, "signal suppressed");
                signal = Signal::hold(err.to_string());
            }
        }

        // 5. Apply the approved signal to the position state.
        if let Some(side) = signal.side() {
            match self.position.clone() {
                None => self.open_position(side, &prices, candle.open_time, signal.confidence),
                Some(position) if position.side != side => {
                    // An opposing crossover liquidates at the close. No
                    // same-bar reversal into the new direction.
                    self.close_position(
                        &position,
                        prices.close,
                        ExitReason::OppositeCrossover,
                        candle.open_time,
                    );
                }
                Some(_) => {
                    tracing::debug!(
                        pair = %self.pair,
                        "position already open; same-side signal ignored"
                    );
                }
            }
        }

        Ok(signal)
    }

    pub fn pair(&self) -> &PairId {
        &self.pair
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn risk_state(&self) -> Option<&RiskState> {
        self.risk_state.as_ref()
    }

    /// The append-only trade log, read-only for callers.
    pub fn trades(&self) -> &[TradeEvent] {
        &self.trades
    }

    /// A snapshot of everything the persistence collaborator stores.
    pub fn state(&self) -> PairState {
        PairState {
            config: self.config.clone(),
            position: self.position.clone(),
            risk_state: self.risk_state.clone(),
            trade_log: self.trades.clone(),
        }
    }

    fn validate(&self, candle: &Candle) -> Result<BarPrices> {
        candle.validate()?;
        if let Some(last) = self.candles.back() {
            if candle.open_time <= last.open_time {
                return Err(CandleError::NonMonotonicCandle {
                    last: last.open_time,
                    current: candle.open_time,
                }
                .into());
            }
        }
        Ok(BarPrices {
            low: price("low", candle.low)?,
            high: price("high", candle.high)?,
            close: price("close", candle.close)?,
        })
    }

    fn push_candle(&mut self, candle: Candle) {
        self.candles.push_back(candle);
        if self.candles.len() > CANDLE_HISTORY_SIZE {
            self.candles.pop_front();
        }
    }

    fn open_position(
        &mut self,
        side: Side,
        prices: &BarPrices,
        opened_at: DateTime<Utc>,
        confidence: f64,
    ) {
        let entry = prices.close;
        let (stop_loss_price, take_profit_price) = match side {
            Side::Long => (
                entry * (Decimal::ONE - self.stop_loss_fraction),
                entry * (Decimal::ONE + self.take_profit_fraction),
            ),
            Side::Short => (
                entry * (Decimal::ONE + self.stop_loss_fraction),
                entry * (Decimal::ONE - self.take_profit_fraction),
            ),
        };

        tracing::info!(
            pair = %self.pair,
            ?side,
            entry = %entry,
            stop = %stop_loss_price,
            target = %take_profit_price,
            "opening position"
        );

        self.trades.push(TradeEvent::Opened {
            side,
            entry_price: entry,
            size_fraction: self.size_fraction,
            stop_loss_price,
            take_profit_price,
            confidence,
            leverage: self.config.leverage,
            opened_at,
        });
        // The peak starts at the entry notional; drawdown is measured against
        // this position's own equity trajectory.
        self.risk_state = Some(RiskState::at_entry(entry));
        self.position = Some(Position {
            side,
            entry_price: entry,
            size_fraction: self.size_fraction,
            stop_loss_price,
            take_profit_price,
            leverage: self.config.leverage,
            opened_at,
        });
    }

    fn close_position(
        &mut self,
        position: &Position,
        exit_price: Decimal,
        reason: ExitReason,
        closed_at: DateTime<Utc>,
    ) {
        let pnl_fraction = position.pnl_fraction(exit_price);
        tracing::info!(
            pair = %self.pair,
            exit = %exit_price,
            pnl = %pnl_fraction,
            %reason,
            "closing position"
        );

        self.trades.push(TradeEvent::Closed {
            side: position.side,
            entry_price: position.entry_price,
            exit_price,
            size_fraction: position.size_fraction,
            pnl_fraction,
            reason,
            leverage: position.leverage,
            opened_at: position.opened_at,
            closed_at,
        });
        self.position = None;
        self.risk_state = None;
    }
}

/// Checks the protective levels against the bar's extremes.
///
/// Stop-loss takes precedence when both levels are crossed inside the same
/// bar: protect capital first.
fn exit_level_crossed(position: &Position, prices: &BarPrices) -> Option<(Decimal, ExitReason)> {
    match position.side {
        Side::Long => {
            if prices.low <= position.stop_loss_price {
                Some((position.stop_loss_price, ExitReason::StopLoss))
            } else if prices.high >= position.take_profit_price {
                Some((position.take_profit_price, ExitReason::TakeProfit))
            } else {
                None
            }
        }
        Side::Short => {
            if prices.high >= position.stop_loss_price {
                Some((position.stop_loss_price, ExitReason::StopLoss))
            } else if prices.low <= position.take_profit_price {
                Some((position.take_profit_price, ExitReason::TakeProfit))
            } else {
                None
            }
        }
    }
}

fn fraction(name: &'static str, value: f64) -> Result<Decimal> {
    Decimal::from_f64(value)
        .ok_or_else(|| risk::Error::InvalidConfig(format!("{name} ({value}) is not representable")).into())
}

fn price(field: &'static str, value: f64) -> Result<Decimal> {
    Decimal::from_f64(value).ok_or_else(|| CandleError::MalformedCandle { field, value }.into())
}
