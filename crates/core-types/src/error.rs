// In crates/core-types/src/error.rs

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("malformed candle: {field} holds an unusable value ({value})")]
    MalformedCandle { field: &'static str, value: f64 },

    #[error("malformed candle: timestamp {timestamp} is outside the representable range")]
    TimestampOutOfRange { timestamp: i64 },

    #[error("candle at {current} does not advance the series (last accepted candle is at {last})")]
    NonMonotonicCandle {
        last: DateTime<Utc>,
        current: DateTime<Utc>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
