// In crates/core-types/src/types.rs

use crate::error::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trading symbol, e.g. "BTCUSDT".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The unit of independent state: one symbol traded by one strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairId {
    pub symbol: Symbol,
    pub strategy: String,
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.symbol, self.strategy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Long,
    Short,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Long => Side::Short,
            Side::Short => Side::Long,
        }
    }
}

/// A single OHLCV candle.
///
/// The boundary accepts the fixed 6-column numeric layout (epoch milliseconds,
/// then open/high/low/close/volume) via [`Candle::from_row`], which rejects
/// anything non-finite, non-positive, or with an unrepresentable timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Parses and validates one row of the 6-column numeric candle layout.
    pub fn from_row(row: [f64; 6]) -> Result<Self> {
        if !row[0].is_finite() {
            return Err(Error::MalformedCandle {
                field: "timestamp",
                value: row[0],
            });
        }
        let millis = row[0] as i64;
        let open_time = Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or(Error::TimestampOutOfRange { timestamp: millis })?;

        let candle = Self {
            open_time,
            open: row[1],
            high: row[2],
            low: row[3],
            close: row[4],
            volume: row[5],
        };
        candle.validate()?;
        Ok(candle)
    }

    /// Checks that every price is a positive finite number and the volume is a
    /// non-negative finite number.
    pub fn validate(&self) -> Result<()> {
        let prices = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (field, value) in prices {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::MalformedCandle { field, value });
            }
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(Error::MalformedCandle {
                field: "volume",
                value: self.volume,
            });
        }
        Ok(())
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

/// Parses and validates a whole 6-column candle table.
///
/// Beyond per-row validation this enforces strictly increasing timestamps
/// across the sequence; the first offending row rejects the whole table.
pub fn candles_from_rows(rows: &[[f64; 6]]) -> Result<Vec<Candle>> {
    let mut candles: Vec<Candle> = Vec::with_capacity(rows.len());
    for row in rows {
        let candle = Candle::from_row(*row)?;
        if let Some(prev) = candles.last() {
            if candle.open_time <= prev.open_time {
                return Err(Error::NonMonotonicCandle {
                    last: prev.open_time,
                    current: candle.open_time,
                });
            }
        }
        candles.push(candle);
    }
    Ok(candles)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalAction {
    Long,
    Short,
    Hold,
}

impl From<Side> for SignalAction {
    fn from(side: Side) -> Self {
        match side {
            Side::Long => SignalAction::Long,
            Side::Short => SignalAction::Short,
        }
    }
}

/// A per-evaluation trading recommendation. Ephemeral: produced on every
/// candle, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub action: SignalAction,
    /// Confidence score in [0, 100]. Capped below 100 to leave headroom for
    /// future confirmation signals.
    pub confidence: f64,
    pub reason: String,
}

impl Signal {
    pub fn hold(reason: impl Into<String>) -> Self {
        Self {
            action: SignalAction::Hold,
            confidence: 0.0,
            reason: reason.into(),
        }
    }

    pub fn is_hold(&self) -> bool {
        self.action == SignalAction::Hold
    }

    /// The direction this signal asks for, or `None` for a hold.
    pub fn side(&self) -> Option<Side> {
        match self.action {
            SignalAction::Long => Some(Side::Long),
            SignalAction::Short => Some(Side::Short),
            SignalAction::Hold => None,
        }
    }
}

/// An open position. At most one exists per pair at any time, owned
/// exclusively by that pair's lifecycle manager.
///
/// The order-execution collaborator receives the side, size and protective
/// levels from this record; the core never assumes a synchronous fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub side: Side,
    pub entry_price: Decimal,
    pub size_fraction: Decimal,
    pub stop_loss_price: Decimal,
    pub take_profit_price: Decimal,
    pub leverage: u8,
    pub opened_at: DateTime<Utc>,
}

impl Position {
    /// Unrealized PnL as a fraction of the entry price.
    ///
    /// `(price - entry) / entry` for a long, `(entry - price) / entry` for a
    /// short. The entry price is strictly positive by construction.
    pub fn pnl_fraction(&self, price: Decimal) -> Decimal {
        match self.side {
            Side::Long => (price - self.entry_price) / self.entry_price,
            Side::Short => (self.entry_price - price) / self.entry_price,
        }
    }
}

/// Peak-equity and drawdown bookkeeping for the currently open position.
///
/// Exists only while a position is open; drawdown is measured against the
/// equity trajectory of that position, not a portfolio-wide baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskState {
    pub peak_equity: Decimal,
    pub current_drawdown: Decimal,
}

impl RiskState {
    /// Fresh state at position entry: the peak starts at the entry notional.
    pub fn at_entry(entry_notional: Decimal) -> Self {
        Self {
            peak_equity: entry_notional,
            current_drawdown: Decimal::ZERO,
        }
    }

    /// Folds the latest equity mark into the peak and recomputes the
    /// drawdown, clamped to be non-negative.
    pub fn update(&mut self, equity: Decimal) {
        self.peak_equity = self.peak_equity.max(equity);
        self.current_drawdown =
            ((self.peak_equity - equity) / self.peak_equity).max(Decimal::ZERO);
    }
}
