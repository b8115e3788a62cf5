//! Client error types.

use courier_encode::EncodeError;
use std::io;
use thiserror::Error;

/// Result type alias using [`ClientError`].
pub type ClientResult<T> = Result<T, ClientError>;

/// Error produced while building or executing a request.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Body encoding failed. Never retried; the request is not sent.
    #[error("request body encoding failed")]
    Encode(#[from] EncodeError),

    /// The transport failed to execute the request.
    #[error("transport failed")]
    Transport(#[from] TransportError),

    /// Assembling the `http::Request` failed.
    #[error("invalid request")]
    Http(#[from] http::Error),
}

/// Error produced by a [`Transport`](crate::Transport) implementation.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connecting or reading failed at the I/O level.
    #[error("connection failed")]
    Io(#[from] io::Error),

    /// The configured connect or read timeout elapsed.
    #[error("request timed out after {millis} ms")]
    Timeout {
        /// Elapsed time budget in milliseconds.
        millis: u64,
    },

    /// Any other transport failure.
    #[error("{message}")]
    Other {
        /// Human-readable description.
        message: String,
    },
}

impl TransportError {
    /// Creates a generic transport error.
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}
