use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Validation and contract errors exposed by `stockview-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error(
        "invalid interval '{value}', expected one of Real-time, 1 minute, 5 minute, 15 minute, 30 minute, 1 hour"
    )]
    InvalidInterval { value: String },

    #[error("from date {from} must be on or before to date {to}")]
    InvalidDateRange { from: String, to: String },
    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("a historical interval requires both a from date and a to date")]
    MissingDate,

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
    #[error("epoch milliseconds out of range: {value}")]
    TimestampOutOfRange { value: i64 },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,

    #[error("bar series must contain at least one bar")]
    EmptySeries,
    #[error("bar series is out of order at index {index}")]
    UnorderedSeries { index: usize },

    #[error("environment variable {name} must hold a non-empty API key")]
    MissingApiKey { name: &'static str },
    #[error("request timeout must be greater than zero")]
    InvalidTimeout,
}

/// Failure classification for one panel's fetch-and-normalize pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    InvalidSymbol,
    InvalidInterval,
    InvalidDateRange,
    Transport,
    Status,
    Decode,
    EmptyResult,
    InvalidSeries,
}

/// Structured failure threaded from the fetcher through the normalizer to the
/// render boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
    status: Option<u16>,
}

impl FetchError {
    pub fn invalid_symbol(error: &ValidationError) -> Self {
        Self {
            kind: FetchErrorKind::InvalidSymbol,
            message: format!("invalid symbol: {error}"),
            status: None,
        }
    }

    pub fn invalid_interval(label: &str) -> Self {
        Self {
            kind: FetchErrorKind::InvalidInterval,
            message: format!("Invalid interval selected: '{}'.", label.trim()),
            status: None,
        }
    }

    pub fn invalid_date_range(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::InvalidDateRange,
            message: message.into(),
            status: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Transport,
            message: format!("network error: {}", message.into()),
            status: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            kind: FetchErrorKind::Status,
            message: format!("API request failed with status code: {status}"),
            status: Some(status),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Decode,
            message: message.into(),
            status: None,
        }
    }

    pub fn empty_result(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::EmptyResult,
            message: message.into(),
            status: None,
        }
    }

    pub fn invalid_series(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::InvalidSeries,
            message: message.into(),
            status: None,
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status for `Status` failures.
    pub const fn status_code(&self) -> Option<u16> {
        self.status
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::InvalidSymbol => "fetch.invalid_symbol",
            FetchErrorKind::InvalidInterval => "fetch.invalid_interval",
            FetchErrorKind::InvalidDateRange => "fetch.invalid_date_range",
            FetchErrorKind::Transport => "fetch.transport",
            FetchErrorKind::Status => "fetch.status",
            FetchErrorKind::Decode => "fetch.decode",
            FetchErrorKind::EmptyResult => "fetch.empty_result",
            FetchErrorKind::InvalidSeries => "fetch.invalid_series",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}
