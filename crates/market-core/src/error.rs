//! Error types for market data operations.
//!
//! This module defines [`MarketError`], which covers every failure a query can
//! surface, and [`ErrorKind`], the coarse taxonomy callers branch on:
//!
//! - local/client errors (bad arguments, local resource failures)
//! - transport errors (the HTTP round trip failed)
//! - parse errors (the payload was not valid JSON, XML or CSV)
//! - service errors (the remote service reported a failure in its payload)
//!
//! Field-level defaults (a null or missing field decoding to zero) are never
//! errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error code used when a service response carries an empty result set.
pub const NOT_FOUND_CODE: &str = "Not Found";

/// Description used when a service response carries an empty result set.
pub const NOT_FOUND_DESCRIPTION: &str = "No data found, symbol may be delisted";

/// An application-level failure reported by the remote service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    /// Response kind the error was reported under (e.g. `"chart"`).
    pub response: String,
    /// Machine-readable error code (e.g. `"Not Found"`).
    pub code: String,
    /// Human-readable description.
    pub description: String,
}

impl ServiceError {
    /// Creates a new service error.
    #[must_use]
    pub fn new(
        response: impl Into<String>,
        code: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            response: response.into(),
            code: code.into(),
            description: description.into(),
        }
    }

    /// Creates the error reported when a response has an empty result set.
    #[must_use]
    pub fn not_found(response: impl Into<String>) -> Self {
        Self::new(response, NOT_FOUND_CODE, NOT_FOUND_DESCRIPTION)
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.response, self.code, self.description)
    }
}

/// Coarse classification of a [`MarketError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Local resource or argument error.
    Local,
    /// The HTTP request failed.
    Transport,
    /// The payload could not be parsed.
    Parse,
    /// The remote service reported an error.
    Service,
}

/// Errors that can occur during market data operations.
#[derive(Error, Debug)]
pub enum MarketError {
    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A local resource could not be obtained.
    #[error("Local error: {0}")]
    Local(String),

    /// Network-related errors (connection failures, timeouts, HTTP status).
    #[error("Network error: {0}")]
    Network(String),

    /// Error parsing a payload returned by the service.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The service reported an application-level error.
    #[error("Service error: {0}")]
    Service(ServiceError),
}

impl MarketError {
    /// Returns the taxonomy bucket of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter(_) | Self::Local(_) => ErrorKind::Local,
            Self::Network(_) => ErrorKind::Transport,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Service(_) => ErrorKind::Service,
        }
    }

    /// Returns the service error payload, if this is a service error.
    #[must_use]
    pub const fn service(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ServiceError> for MarketError {
    fn from(e: ServiceError) -> Self {
        Self::Service(e)
    }
}

/// Result type alias using [`MarketError`].
pub type Result<T> = std::result::Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(MarketError::InvalidParameter("x".into()).kind(), ErrorKind::Local);
        assert_eq!(MarketError::Local("x".into()).kind(), ErrorKind::Local);
        assert_eq!(MarketError::Network("x".into()).kind(), ErrorKind::Transport);
        assert_eq!(MarketError::Parse("x".into()).kind(), ErrorKind::Parse);
        assert_eq!(
            MarketError::from(ServiceError::not_found("chart")).kind(),
            ErrorKind::Service
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = MarketError::from(ServiceError::not_found("quoteResponse"));
        assert_eq!(
            err.to_string(),
            "Service error: quoteResponse Not Found: No data found, symbol may be delisted"
        );
        assert_eq!(err.service().map(|e| e.code.as_str()), Some(NOT_FOUND_CODE));
    }
}
