use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DigestError {
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("interval ends before it starts ({start} > {end})")]
    InvertedInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("window end {end} is before start {start}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
}
