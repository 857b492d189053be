use std::fmt;
use thiserror::Error;

/// The error type for veridu operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A username was required but none was given or stored
    EmptyUsername,

    /// A session token was required but the session store is empty
    EmptySession,

    /// Username contains characters outside `[A-Za-z0-9_-]`
    InvalidUsername,

    /// The service answered an unsigned fetch with an empty body
    EmptyResponse,

    /// The response body is not a JSON object
    InvalidFormat,

    /// The response object misses a required field, such as `status`
    InvalidResponse,

    /// The service reported `status: false`
    Api,

    /// The transport failed to perform the request
    RequestFailed,

    /// The request could not be signed
    SignatureFailure,

    /// The nonce echoed by the service differs from the one we sent
    NonceMismatch,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message.
    ///
    /// For [`ErrorKind::Api`] this is the server's `error.message` verbatim.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if the service itself rejected the call
    pub fn is_api_error(&self) -> bool {
        self.kind == ErrorKind::Api
    }

    /// Check if this is an infrastructure failure rather than a rejection
    pub fn is_transport_error(&self) -> bool {
        self.kind == ErrorKind::RequestFailed
    }
}

// Convenience constructors
impl Error {
    /// Create an empty username error
    pub fn empty_username(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyUsername, message)
    }

    /// Create an empty session error
    pub fn empty_session(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptySession, message)
    }

    /// Create an invalid username error
    pub fn invalid_username(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidUsername, message)
    }

    /// Create an empty response error
    pub fn empty_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyResponse, message)
    }

    /// Create an invalid format error
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFormat, message)
    }

    /// Create an invalid response error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidResponse, message)
    }

    /// Create an api error carrying the server's message
    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api, message)
    }

    /// Create a request failed error
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestFailed, message)
    }

    /// Create a signature failure error
    pub fn signature_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SignatureFailure, message)
    }

    /// Create a nonce mismatch error
    pub fn nonce_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NonceMismatch, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::EmptyUsername => write!(f, "empty username"),
            ErrorKind::EmptySession => write!(f, "empty session"),
            ErrorKind::InvalidUsername => write!(f, "invalid username"),
            ErrorKind::EmptyResponse => write!(f, "empty response"),
            ErrorKind::InvalidFormat => write!(f, "invalid response format"),
            ErrorKind::InvalidResponse => write!(f, "invalid response"),
            ErrorKind::Api => write!(f, "api error"),
            ErrorKind::RequestFailed => write!(f, "request failed"),
            ErrorKind::SignatureFailure => write!(f, "signature failure"),
            ErrorKind::NonceMismatch => write!(f, "nonce mismatch"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::signature_failure(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_failed(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_failed(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_failed(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
