//! Error types for the catalog API client

use thiserror::Error;

/// Errors that can occur when talking to the catalog API
///
/// Values are cloned into store actions, so every variant carries owned,
/// comparable data rather than the underlying `reqwest` error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, timeout)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The server answered with a non-2xx status
    #[error("API error (status {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// The response body could not be decoded
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),
}

/// Coarse classification of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The endpoint was unreachable or rejected the request
    Transport,
    /// The endpoint answered, but with a payload we could not use
    Application,
}

impl ApiError {
    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RequestFailed(_) | Self::Status { .. } => ErrorKind::Transport,
            Self::ResponseParseFailed(_) => ErrorKind::Application,
        }
    }

    /// HTTP status code, for [`ApiError::Status`]
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::ResponseParseFailed(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}
