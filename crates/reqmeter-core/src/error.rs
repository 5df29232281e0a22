//! Shared error type across reqmeter crates.

use thiserror::Error;

/// Stable error codes (safe to match on or log).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// An instrument with the same name is already registered.
    DuplicateMetric,
    /// Metric or label name is not a valid Prometheus identifier.
    InvalidName,
    /// Histogram bucket bounds are unusable.
    InvalidBuckets,
    /// Configuration rejected.
    BadConfig,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::DuplicateMetric => "DUPLICATE_METRIC",
            ErrorCode::InvalidName => "INVALID_NAME",
            ErrorCode::InvalidBuckets => "INVALID_BUCKETS",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ReqMeterError>;

/// Unified error type used by core and adapters.
#[derive(Debug, Error)]
pub enum ReqMeterError {
    #[error("duplicate metric: {0} is already registered")]
    DuplicateMetric(String),
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("invalid buckets: {0}")]
    InvalidBuckets(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ReqMeterError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ReqMeterError::DuplicateMetric(_) => ErrorCode::DuplicateMetric,
            ReqMeterError::InvalidName(_) => ErrorCode::InvalidName,
            ReqMeterError::InvalidBuckets(_) => ErrorCode::InvalidBuckets,
            ReqMeterError::BadConfig(_) => ErrorCode::BadConfig,
            ReqMeterError::Internal(_) => ErrorCode::Internal,
        }
    }
}
