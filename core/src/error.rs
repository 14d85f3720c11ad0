//! Error types for the fetch core.
//!
//! # Design
//! Two tiers. `InvalidArgument` is a caller mistake and is returned as a hard
//! `Err` before any request is issued. Everything that can go wrong once a
//! request is in flight lands in `FetchError`, which is carried inside a
//! `FetchResult` so one failed fetch never disturbs its siblings.

use thiserror::Error;

/// The outcome of a single fetch attempt.
pub type FetchResult<T> = Result<T, FetchError>;

/// A malformed identifier was supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid argument: {reason}")]
pub struct InvalidArgument {
    pub reason: String,
}

impl InvalidArgument {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The underlying transport could not complete the round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Failure of a fetch that got past argument validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection refused, timeout, DNS failure and the like. Not retried.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be decoded into the expected shape.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Remote { status: u16, message: String },
}

impl FetchError {
    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            FetchError::Transport(msg) | FetchError::Decode(msg) => msg,
            FetchError::Remote { message, .. } => message,
        }
    }

    /// Status code, only present for `Remote` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        FetchError::Transport(err.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_exposes_status_and_message() {
        let err = FetchError::Remote {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.message(), "Not Found");
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = FetchError::from(TransportError("connection refused".to_string()));
        assert_eq!(err.status(), None);
        assert_eq!(err.message(), "connection refused");
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
