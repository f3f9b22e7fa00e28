//! Error types returned by [`Client`](crate::Client).

use std::{fmt::Display, io};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the IPLocate API sends with non-200 responses.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    #[serde(rename = "error")]
    pub message: String,
    /// Filled in from the HTTP response, never part of the body.
    #[serde(skip)]
    pub status_code: u16,
}
impl ApiError {
    pub fn is_rate_limited(&self) -> bool {
        self.status_code == 429
    }
    pub fn is_forbidden(&self) -> bool {
        self.status_code == 403
    }
}
impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IPLocate API error ({}): {}", self.status_code, self.message)
    }
}
impl std::error::Error for ApiError {}

#[derive(Error, Debug)]
pub enum Error {
    /// The address handed to [`Client::lookup`](crate::Client::lookup) is not an IPv4 or IPv6
    /// address. No request was sent.
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// The configured base URL could not be turned into a request URL.
    #[error("failed to parse endpoint URL: {0}")]
    InvalidBaseUrl(String),

    /// Connecting, resolving, TLS or waiting for the response failed.
    #[error("request failed: {0}")]
    Transport(#[source] Box<ureq::Transport>),

    /// A response arrived but its body could not be read in full.
    #[error("failed to read response body: {0}")]
    Body(#[source] io::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// A non-200 response whose body is not an API error record. A JSON body without an
    /// `error` string, even `{}`, lands here with the body kept verbatim.
    #[error("API request failed ({status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    /// A 200 response whose body is not a lookup result.
    #[error("failed to parse response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl Error {
    /// HTTP status of the response that caused this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => Some(api.status_code),
            Error::UnexpectedResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the request ran into the configured timeout.
    pub fn is_timeout(&self) -> bool {
        let io_error = match self {
            Error::Transport(transport) => std::error::Error::source(transport.as_ref())
                .and_then(|source| source.downcast_ref::<io::Error>()),
            Error::Body(io_error) => Some(io_error),
            _ => None,
        };
        io_error.is_some_and(|e| {
            matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
        })
    }
}

impl From<ureq::Transport> for Error {
    fn from(transport: ureq::Transport) -> Self {
        Error::Transport(Box::new(transport))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidBaseUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
