//! Error types for the tourbook client.
//!
//! One unified error type with explicit variants for transport, HTTP status,
//! authentication, storage and input validation failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for tourbook operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-success status.
    #[error("{0}")]
    Status(#[from] StatusError),

    /// Authentication state errors.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Credential storage failures.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (bad URL, header value, unserializable body).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the HTTP status if this error came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status(err) => Some(err.status),
            _ => None,
        }
    }

    /// True when the server rejected the request as unauthorized (401).
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Transport-level errors: no response was received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Any other HTTP client failure.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-success HTTP response.
#[derive(Debug, Clone)]
pub struct StatusError {
    /// HTTP status code.
    pub status: u16,
    /// The request URL.
    pub url: String,
    /// Error code from the response body (`code` field), if present.
    pub code: Option<String>,
    /// Human-readable detail from the response body (`detail` field), if present.
    pub detail: Option<String>,
}

impl StatusError {
    /// Create a new status error.
    pub fn new(
        status: u16,
        url: impl Into<String>,
        code: Option<String>,
        detail: Option<String>,
    ) -> Self {
        Self {
            status,
            url: url.into(),
            code,
            detail,
        }
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} from {}", self.status, self.url)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for StatusError {}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No refresh token is stored, so the session cannot be renewed.
    #[error("no refresh token available")]
    MissingRefreshToken,
}

/// Credential storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// The backing file exists but could not be parsed.
    #[error("corrupt credential file {path}: {message}")]
    Corrupt { path: String, message: String },

    /// An in-memory store lock was poisoned by a panicking writer.
    #[error("credential store lock poisoned")]
    Poisoned,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A token or header value that cannot be sent over HTTP.
    #[error("invalid header value for {name}")]
    HeaderValue { name: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display_includes_detail() {
        let err = StatusError::new(
            401,
            "http://127.0.0.1:8000/api/user/",
            Some("token_not_valid".into()),
            Some("Given token not valid for any token type".into()),
        );
        let text = err.to_string();
        assert!(text.contains("401"));
        assert!(text.contains("token_not_valid"));
        assert!(text.contains("Given token not valid"));
    }

    #[test]
    fn unauthorized_only_for_401() {
        let unauthorized: Error = StatusError::new(401, "u", None, None).into();
        let forbidden: Error = StatusError::new(403, "u", None, None).into();
        assert!(unauthorized.is_unauthorized());
        assert!(!forbidden.is_unauthorized());
        assert_eq!(forbidden.status(), Some(403));

        let transport: Error = TransportError::Timeout.into();
        assert_eq!(transport.status(), None);
    }
}
