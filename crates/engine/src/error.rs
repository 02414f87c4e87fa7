// In crates/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Candle(#[from] core_types::Error),

    #[error(transparent)]
    Risk(#[from] risk::Error),

    #[error("state store i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("state payload could not be encoded or decoded: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
