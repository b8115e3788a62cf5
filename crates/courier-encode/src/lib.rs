//! # Courier Encode
//!
//! Request body encoding core for the Courier HTTP client.
//!
//! Given an arbitrary outgoing [`Value`] and an optional explicit content
//! type, this crate decides how to serialize it to wire bytes and, for
//! `multipart/form-data`, how to recursively decompose a named collection of
//! heterogeneous values into independently-headered parts.
//!
//! ## Converters
//!
//! Converters are tried in a fixed priority order; the first one accepting
//! the (value shape, media type) pair wins:
//!
//! | Converter | Shapes | Media types | Default for |
//! |-----------|--------|-------------|-------------|
//! | [`TextConverter`] | text | any | `text/plain` |
//! | [`OctetConverter`] | resource, bytes | any | `application/octet-stream` |
//! | [`FormConverter`] | multimap | `application/x-www-form-urlencoded` | all-text multimap |
//! | [`JsonConverter`] | json, multimap | `application/json`, `+json` | structured values |
//! | [`MultipartConverter`] | multimap | `multipart/form-data` | mixed multimap |
//!
//! ## Example
//!
//! ```rust
//! use courier_encode::{Encoder, MultiMap, Resource, Value};
//!
//! let mut body = MultiMap::new();
//! body.add(
//!     "file",
//!     Resource::from_bytes(b"binary content".as_slice()).with_filename("data"),
//! );
//! body.add("comment", "This is a binary file");
//!
//! let encoder = Encoder::new();
//! let encoded = encoder.encode(&Value::from(body), None).unwrap();
//!
//! let content_type = encoded.content_type().unwrap();
//! assert_eq!(content_type.essence_str(), "multipart/form-data");
//! assert!(content_type.get_param(mime::BOUNDARY).is_some());
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`EncodeError`]; encoding either succeeds
//! completely or fails without emitting a partial body. A value shape with
//! no eligible converter under the requested media type fails with
//! [`EncodeError::NoConverter`] rather than silently coercing.
//!
//! Two behaviors are deliberate and load-bearing for callers that rely on
//! them:
//!
//! - Form encoding never detects already-encoded input; a literal `%25`
//!   in a field value goes out as `%2525`.
//! - A bare [`Resource`] under a forced `multipart/form-data` content type
//!   keeps that header over the raw resource bytes; only a multimap
//!   produces a multipart envelope.

#![doc(html_root_url = "https://docs.rs/courier-encode/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod converter;
mod encoded;
mod encoder;
mod error;
mod form;
mod json;
mod multipart;
mod octet;
mod resource;
mod text;
mod value;

// Re-export main types
pub use converter::{default_media_type, BodyConverter, ConverterRegistry, EncodeContext};
pub use encoded::EncodedBody;
pub use encoder::Encoder;
pub use error::{EncodeError, EncodeResult, ValueShape};
pub use form::FormConverter;
pub use json::JsonConverter;
pub use multipart::{
    generate_boundary, MultipartConverter, MultipartLimits, DEFAULT_MAX_BODY_SIZE,
    DEFAULT_MAX_PARTS, MAX_PART_DEPTH,
};
pub use octet::OctetConverter;
pub use resource::Resource;
pub use text::TextConverter;
pub use value::{Entity, MultiMap, StreamBody, Value};
