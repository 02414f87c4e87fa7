// In crates/engine/src/state_store.rs

use crate::error::Result;
use analytics::TradeEvent;
use core_types::{PairId, Position, RiskState, StrategyConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Everything the persistence collaborator stores for one pair.
///
/// The candle window is deliberately absent: history is market data the
/// caller re-feeds through [`crate::PairEngine::preload`] on resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairState {
    pub config: StrategyConfig,
    pub position: Option<Position>,
    pub risk_state: Option<RiskState>,
    pub trade_log: Vec<TradeEvent>,
}

/// The persistence seam. Implementations must behave atomically: a `save`
/// either lands completely or not at all, and `load` never observes a
/// partial write.
pub trait StateStore {
    fn load(&self, pair: &PairId) -> Result<Option<PairState>>;
    fn save(&self, pair: &PairId, state: &PairState) -> Result<()>;
}

/// An in-process store backed by a map. Useful for tests and as the
/// reference for the atomicity contract.
#[derive(Debug, Default)]
pub struct MemoryStore {
    states: Mutex<HashMap<PairId, PairState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, pair: &PairId) -> Result<Option<PairState>> {
        let states = self.states.lock().expect("poisoned state store lock");
        Ok(states.get(pair).cloned())
    }

    fn save(&self, pair: &PairId, state: &PairState) -> Result<()> {
        let mut states = self.states.lock().expect("poisoned state store lock");
        states.insert(pair.clone(), state.clone());
        Ok(())
    }
}

/// One JSON document per pair under a state directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, pair: &PairId) -> PathBuf {
        self.dir.join(format!("{}_{}.json", pair.symbol, pair.strategy))
    }
}

impl StateStore for JsonFileStore {
    fn load(&self, pair: &PairId) -> Result<Option<PairState>> {
        let path = self.path_for(pair);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, pair: &PairId, state: &PairState) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(pair);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(state)?)?;
        // The rename is the atomicity boundary: a reader sees the previous
        // document or the new one, never a partial write.
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
