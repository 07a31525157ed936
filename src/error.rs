//! Error Types
//!
//! Failures from the REST collaborator, filter updates and local storage.
//! None of them are fatal to the UI; callers log and keep the last good state.

use thiserror::Error;

/// Failures talking to the stores/categories API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never produced a response (offline, CORS, DNS, ...)
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Response body did not match the expected shape
    #[error("unexpected response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Rejected filter updates
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("unknown filter field: {0}")]
    UnknownField(String),

    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

/// Local key-value storage failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,

    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
}

pub type ApiResult<T> = Result<T, ApiError>;
