// In crates/risk/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid strategy config: {0}")]
    InvalidConfig(String),

    #[error("signal suppressed by risk gate: {reason}")]
    Suppressed { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
