//! Error types shared across the query engine, transcript utility and feed.
//!
//! Every outcome here is recoverable: callers decide whether to surface the
//! message or ignore it.

/// Why a flight search produced nothing to show.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("Flight ID cannot be empty.")]
    EmptyQuery,
    #[error("Aircraft data not available yet.")]
    DataUnavailable,
    #[error("No flights found.")]
    NoMatch,
}

/// Rejection reasons for an altitude bound.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltitudeError {
    #[error("Minimum altitude cannot be greater than maximum altitude.")]
    MinExceedsMax,
    #[error("Minimum altitude cannot be negative.")]
    NegativeMin,
    #[error("Maximum altitude cannot be negative.")]
    NegativeMax,
}

/// Why an offset label could not be read as `minutes.seconds`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OffsetError {
    #[error("offset label is empty")]
    Missing,
    #[error("offset label must be in M.SS format: {0:?}")]
    Format(String),
    #[error("offset label contains non-numeric values: {0:?}")]
    NonNumeric(String),
    #[error("offset label resolves to a negative time: {0:?}")]
    Negative(String),
}

/// Validation failures for a single transcript message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("Invalid or missing timestamp: {0}")]
    InvalidTimestamp(OffsetError),
    #[error("Invalid or missing speaker")]
    InvalidSpeaker,
    #[error("Invalid or missing text")]
    InvalidText,
    #[error("Seconds must be between 0 and 59 (got {0})")]
    SecondsOutOfRange(i64),
}

/// Failures while obtaining or decoding an upstream aircraft feed.
#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("malformed upstream payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type FeedResult<T> = Result<T, FeedError>;
