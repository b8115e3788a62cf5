//! Binary body encoder for resources and raw bytes.

use http::{header, HeaderMap, HeaderValue};
use mime::Mime;

use crate::converter::{BodyConverter, EncodeContext};
use crate::encoded::EncodedBody;
use crate::error::{EncodeError, ValueShape};
use crate::value::Value;

/// Encoder for [`Resource`](crate::Resource) and raw byte bodies.
///
/// Accepts any requested media type and defaults to
/// `application/octet-stream`. The requested type is honored literally: a
/// bare resource forced to `multipart/form-data` goes out with that header
/// over the raw resource bytes, not wrapped in a multipart envelope.
///
/// `Content-Length` is set only when the resource's length is discoverable
/// up front; a reader-backed resource produces a body with no
/// `Content-Length`, leaving the framing to the transport.
#[derive(Debug, Clone, Copy)]
pub struct OctetConverter;

impl BodyConverter for OctetConverter {
    fn supports(&self, shape: ValueShape, _media_type: &Mime) -> bool {
        matches!(shape, ValueShape::Resource | ValueShape::Bytes)
    }

    fn encode(
        &self,
        value: &Value,
        media_type: &Mime,
        _cx: &EncodeContext<'_>,
    ) -> Result<EncodedBody, EncodeError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(media_type.as_ref())?,
        );

        let bytes = match value {
            Value::Resource(resource) => {
                let known_length = resource.len_hint().is_some();
                let bytes = resource.read_bytes()?;
                if known_length {
                    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(bytes.len()));
                }
                bytes
            }
            Value::Bytes(bytes) => {
                headers.insert(header::CONTENT_LENGTH, HeaderValue::from(bytes.len()));
                bytes.clone()
            }
            other => {
                return Err(EncodeError::no_converter(other.shape(), Some(media_type)));
            }
        };

        Ok(EncodedBody::new(headers, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConverterRegistry;
    use crate::resource::Resource;
    use bytes::Bytes;
    use std::io::Cursor;

    fn encode(value: &Value, media_type: &Mime) -> EncodedBody {
        let registry = ConverterRegistry::new();
        let cx = EncodeContext::root(&registry);
        OctetConverter.encode(value, media_type, &cx).unwrap()
    }

    #[test]
    fn test_memory_resource_sets_length() {
        let value = Value::from(Resource::from_bytes(b"binary".as_slice()));
        let body = encode(&value, &mime::APPLICATION_OCTET_STREAM);

        assert_eq!(&body.bytes()[..], b"binary");
        assert_eq!(body.headers()[header::CONTENT_LENGTH], "6");
        assert_eq!(body.content_type(), Some(mime::APPLICATION_OCTET_STREAM));
    }

    #[test]
    fn test_reader_resource_omits_length() {
        let value = Value::from(Resource::from_reader(Cursor::new(b"streamed".to_vec())));
        let body = encode(&value, &mime::APPLICATION_OCTET_STREAM);

        assert_eq!(&body.bytes()[..], b"streamed");
        assert!(!body.headers().contains_key(header::CONTENT_LENGTH));
    }

    #[test]
    fn test_forced_multipart_header_over_raw_bytes() {
        // The header is honored literally while the body stays raw: no
        // multipart envelope is produced for a bare resource.
        let value = Value::from(Resource::from_bytes(b"raw content".as_slice()));
        let body = encode(&value, &mime::MULTIPART_FORM_DATA);

        assert_eq!(body.content_type(), Some(mime::MULTIPART_FORM_DATA));
        assert_eq!(&body.bytes()[..], b"raw content");
    }

    #[test]
    fn test_raw_bytes_value() {
        let value = Value::from(Bytes::from_static(b"\x00\x01\xff"));
        let body = encode(&value, &mime::APPLICATION_OCTET_STREAM);

        assert_eq!(&body.bytes()[..], b"\x00\x01\xff");
        assert_eq!(body.headers()[header::CONTENT_LENGTH], "3");
    }

    #[test]
    fn test_read_failure_aborts() {
        let value = Value::from(Resource::from_file("/nonexistent/courier-octet-test"));
        let registry = ConverterRegistry::new();
        let cx = EncodeContext::root(&registry);

        let err = OctetConverter
            .encode(&value, &mime::APPLICATION_OCTET_STREAM, &cx)
            .unwrap_err();
        assert!(matches!(err, EncodeError::ResourceRead { .. }));
    }
}
