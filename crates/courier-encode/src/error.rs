//! Encoding error types.
//!
//! This module provides [`EncodeError`], the error type returned by every
//! encoding operation, and [`ValueShape`], the coarse classification of body
//! values used for converter dispatch and error reporting.

use mime::Mime;
use std::io;
use thiserror::Error;

/// Result type alias using [`EncodeError`].
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Shape of a body value.
///
/// Converters declare which shapes they accept; errors report the shape that
/// had no eligible converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// Scalar text (`String`).
    Text,
    /// Structured JSON value.
    Json,
    /// Ordered name/value multimap.
    Multimap,
    /// File-like byte source with optional filename.
    Resource,
    /// Raw bytes.
    Bytes,
    /// A value wrapped with its own explicit headers.
    Entity,
    /// An opaque byte stream without resource metadata.
    Stream,
}

impl std::fmt::Display for ValueShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Multimap => write!(f, "multimap"),
            Self::Resource => write!(f, "resource"),
            Self::Bytes => write!(f, "bytes"),
            Self::Entity => write!(f, "entity"),
            Self::Stream => write!(f, "stream"),
        }
    }
}

/// Error produced while encoding a request body.
///
/// Encoding either succeeds completely or fails with one of these variants;
/// no partial body is ever returned. Resolution failures are surfaced to the
/// caller and never retried internally.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// No converter accepts this value shape under the requested media type.
    #[error("no body converter for {shape} body and content type '{}'", .content_type.as_deref().unwrap_or("<default>"))]
    NoConverter {
        /// Shape of the value that could not be encoded.
        shape: ValueShape,
        /// The requested media type, if one was given explicitly.
        content_type: Option<String>,
    },

    /// A resource byte source failed to open or read.
    #[error("failed to read resource {resource}")]
    ResourceRead {
        /// Description of the failing resource (filename or path).
        resource: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Entity nesting exceeded the recursion guard.
    #[error("part nesting exceeds {depth} levels")]
    NestingTooDeep {
        /// Depth at which the guard tripped.
        depth: usize,
    },

    /// A multipart body exceeded the configured size limit.
    #[error("multipart body exceeds {max_bytes} bytes")]
    PartsTooLarge {
        /// Configured maximum body size.
        max_bytes: usize,
    },

    /// A multipart body exceeded the configured part count limit.
    #[error("multipart body has more than {max_parts} parts")]
    TooManyParts {
        /// Configured maximum number of parts.
        max_parts: usize,
    },

    /// JSON serialization failed.
    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),

    /// Form serialization failed.
    #[error("form serialization failed")]
    Form(#[from] serde_urlencoded::ser::Error),

    /// A synthesized header value contained bytes that are not legal in a
    /// header. Filenames and part names are written literally, so a name
    /// containing control characters ends up here.
    #[error("header value contains invalid bytes")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
}

impl EncodeError {
    /// Creates a [`EncodeError::NoConverter`] for the given shape and
    /// requested media type.
    #[must_use]
    pub(crate) fn no_converter(shape: ValueShape, content_type: Option<&Mime>) -> Self {
        Self::NoConverter {
            shape,
            content_type: content_type.map(ToString::to_string),
        }
    }

    /// Creates a [`EncodeError::ResourceRead`] wrapping an I/O failure.
    #[must_use]
    pub(crate) fn resource_read(resource: impl Into<String>, source: io::Error) -> Self {
        Self::ResourceRead {
            resource: resource.into(),
            source,
        }
    }
}
