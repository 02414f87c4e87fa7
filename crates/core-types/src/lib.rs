// In crates/core-types/src/lib.rs

pub mod error;
pub mod strategy;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use strategy::{MaKind, StrategyConfig};
pub use types::{
    Candle, PairId, Position, RiskState, Side, Signal, SignalAction, Symbol, candles_from_rows,
};
