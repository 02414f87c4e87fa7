// In crates/engine/src/lib.rs

pub mod error;
pub mod pair;
pub mod state_store;

pub use error::{Error, Result};
pub use pair::{CANDLE_HISTORY_SIZE, PairEngine};
pub use state_store::{JsonFileStore, MemoryStore, PairState, StateStore};
