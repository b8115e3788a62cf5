//! The terminal encoded-body artifact.

use bytes::Bytes;
use http::{header, HeaderMap};
use mime::Mime;

/// Headers and bytes produced by encoding a body value.
///
/// The transport writes these verbatim; it must not mutate or re-derive any
/// header the encoder set (especially `Content-Type` with its `boundary`
/// parameter), though it may add transport-level headers of its own.
#[derive(Debug, Clone)]
pub struct EncodedBody {
    headers: HeaderMap,
    bytes: Bytes,
}

impl EncodedBody {
    /// Creates an encoded body from its parts.
    ///
    /// Converters call this with the headers they derived; the headers
    /// travel with the bytes from here on.
    #[must_use]
    pub fn new(headers: HeaderMap, bytes: Bytes) -> Self {
        Self { headers, bytes }
    }

    /// Returns the headers the encoder set.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the body bytes.
    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Consumes the body, returning headers and bytes.
    #[must_use]
    pub fn into_parts(self) -> (HeaderMap, Bytes) {
        (self.headers, self.bytes)
    }

    /// Consumes the body, returning only the bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Parses the `Content-Type` header, if present and valid.
    #[must_use]
    pub fn content_type(&self) -> Option<Mime> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
    }

    /// Body length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_content_type_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("multipart/form-data; boundary=abc"),
        );
        let body = EncodedBody::new(headers, Bytes::from_static(b"x"));

        let mime = body.content_type().unwrap();
        assert_eq!(mime.type_(), mime::MULTIPART);
        assert_eq!(mime.get_param(mime::BOUNDARY).unwrap(), "abc");
    }

    #[test]
    fn test_into_parts() {
        let body = EncodedBody::new(HeaderMap::new(), Bytes::from_static(b"payload"));
        assert_eq!(body.len(), 7);

        let (headers, bytes) = body.into_parts();
        assert!(headers.is_empty());
        assert_eq!(&bytes[..], b"payload");
    }
}
