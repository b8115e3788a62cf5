//! JSON encoder.

use http::{header, HeaderMap, HeaderValue};
use mime::Mime;

use crate::converter::{is_json, BodyConverter, EncodeContext};
use crate::encoded::EncodedBody;
use crate::error::{EncodeError, ValueShape};
use crate::value::Value;

/// Encoder for `application/json` bodies.
///
/// Structured values serialize directly. A multimap forced to JSON by an
/// explicit content type serializes as an object whose fields are the map's
/// names, each value list emitted as a JSON array; a single value becomes a
/// single-element array rather than a bare scalar.
#[derive(Debug, Clone, Copy)]
pub struct JsonConverter;

impl BodyConverter for JsonConverter {
    fn supports(&self, shape: ValueShape, media_type: &Mime) -> bool {
        matches!(shape, ValueShape::Json | ValueShape::Multimap) && is_json(media_type)
    }

    fn encode(
        &self,
        value: &Value,
        media_type: &Mime,
        _cx: &EncodeContext<'_>,
    ) -> Result<EncodedBody, EncodeError> {
        let body = match value {
            Value::Json(json) => serde_json::to_vec(json)?,
            Value::Multimap(map) => {
                let mut object = serde_json::Map::new();
                for (name, values) in map.entries() {
                    let array = values
                        .iter()
                        .map(|field| match field {
                            Value::Text(text) => Ok(serde_json::Value::String(text.clone())),
                            Value::Json(json) => Ok(json.clone()),
                            other => {
                                Err(EncodeError::no_converter(other.shape(), Some(media_type)))
                            }
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    object.insert(name.to_string(), serde_json::Value::Array(array));
                }
                serde_json::to_vec(&serde_json::Value::Object(object))?
            }
            other => {
                return Err(EncodeError::no_converter(other.shape(), Some(media_type)));
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(media_type.as_ref())?,
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));

        Ok(EncodedBody::new(headers, body.into()))
    }
}
