//! Plain text encoder.

use http::{header, HeaderMap, HeaderValue};
use mime::Mime;

use crate::converter::{BodyConverter, EncodeContext};
use crate::encoded::EncodedBody;
use crate::error::{EncodeError, ValueShape};
use crate::value::Value;

/// Encoder for scalar text.
///
/// Writes the string's UTF-8 bytes verbatim and accepts any requested media
/// type: a pre-serialized JSON string posted under `application/json` goes
/// out unchanged under that type. The default is `text/plain`.
#[derive(Debug, Clone, Copy)]
pub struct TextConverter;

impl BodyConverter for TextConverter {
    fn supports(&self, shape: ValueShape, _media_type: &Mime) -> bool {
        shape == ValueShape::Text
    }

    fn encode(
        &self,
        value: &Value,
        media_type: &Mime,
        _cx: &EncodeContext<'_>,
    ) -> Result<EncodedBody, EncodeError> {
        let Value::Text(text) = value else {
            return Err(EncodeError::no_converter(value.shape(), Some(media_type)));
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(media_type.as_ref())?,
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(text.len()));

        Ok(EncodedBody::new(headers, text.clone().into()))
    }
}
