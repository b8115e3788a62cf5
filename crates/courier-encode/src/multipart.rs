//! Multipart form-data composer.
//!
//! Decomposes a named collection of heterogeneous values into
//! independently-headered parts. Each part's body bytes come from recursively
//! invoking the full converter pipeline on the part's inner value, so a part
//! whose body is itself a mixed multimap produces a nested multipart
//! envelope.

use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue};
use mime::Mime;
use uuid::Uuid;

use crate::converter::{is_multipart_form_data, BodyConverter, EncodeContext};
use crate::encoded::EncodedBody;
use crate::error::{EncodeError, ValueShape};
use crate::value::{MultiMap, Value};

/// Maximum entity/part nesting depth before encoding aborts.
pub const MAX_PART_DEPTH: usize = 16;

/// Default maximum total multipart body size (50 MB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 50 * 1024 * 1024;

/// Default maximum number of parts.
pub const DEFAULT_MAX_PARTS: usize = 100;

/// Limits enforced while composing a multipart body.
#[derive(Debug, Clone)]
pub struct MultipartLimits {
    /// Maximum total body size in bytes.
    pub max_body_size: usize,
    /// Maximum number of parts allowed.
    pub max_parts: usize,
}

impl Default for MultipartLimits {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            max_parts: DEFAULT_MAX_PARTS,
        }
    }
}

impl MultipartLimits {
    /// Creates limits with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum total body size.
    #[must_use]
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Sets the maximum number of parts.
    #[must_use]
    pub fn max_parts(mut self, count: usize) -> Self {
        self.max_parts = count;
        self
    }
}

/// Encoder for `multipart/form-data` bodies.
///
/// Accepts a multimap under `multipart/form-data`. The boundary is taken
/// from the requested media type when the caller supplied one, otherwise a
/// random token is generated.
pub struct MultipartConverter {
    limits: MultipartLimits,
}

impl MultipartConverter {
    /// Creates the converter with the given limits.
    #[must_use]
    pub fn new(limits: MultipartLimits) -> Self {
        Self { limits }
    }
}

impl std::fmt::Debug for MultipartConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultipartConverter")
            .field("limits", &self.limits)
            .finish()
    }
}

impl BodyConverter for MultipartConverter {
    fn supports(&self, shape: ValueShape, media_type: &Mime) -> bool {
        shape == ValueShape::Multimap && is_multipart_form_data(media_type)
    }

    fn encode(
        &self,
        value: &Value,
        media_type: &Mime,
        cx: &EncodeContext<'_>,
    ) -> Result<EncodedBody, EncodeError> {
        let Value::Multimap(map) = value else {
            return Err(EncodeError::no_converter(value.shape(), Some(media_type)));
        };

        let boundary = media_type
            .get_param(mime::BOUNDARY)
            .map(|param| param.to_string())
            .unwrap_or_else(generate_boundary);

        compose(map, &boundary, cx, &self.limits)
    }
}

/// Generates a random boundary token.
///
/// The token carries 122 bits of randomness, which keeps the probability of
/// it occurring inside any part's serialized bytes negligible.
#[must_use]
pub fn generate_boundary() -> String {
    format!("----CourierBoundary{}", Uuid::new_v4().simple())
}

/// Composes `map` into a multipart body delimited by `boundary`.
///
/// Parts are joined as `--boundary\r\n<headers>\r\n\r\n<bytes>\r\n` and
/// terminated by `--boundary--\r\n`. Any part whose body has no eligible
/// converter fails the whole composition; no partial envelope is returned.
pub(crate) fn compose(
    map: &MultiMap,
    boundary: &str,
    cx: &EncodeContext<'_>,
    limits: &MultipartLimits,
) -> Result<EncodedBody, EncodeError> {
    let mut buf = Vec::new();
    let mut part_count = 0usize;

    for (name, value) in map.iter() {
        part_count += 1;
        if part_count > limits.max_parts {
            return Err(EncodeError::TooManyParts {
                max_parts: limits.max_parts,
            });
        }

        let (part_headers, part_bytes) = resolve_part(name, value, cx)?;
        tracing::trace!(part = name, bytes = part_bytes.len(), "composed part");

        buf.extend_from_slice(b"--");
        buf.extend_from_slice(boundary.as_bytes());
        buf.extend_from_slice(b"\r\n");
        write_headers(&mut buf, &part_headers);
        buf.extend_from_slice(b"\r\n");
        buf.extend_from_slice(&part_bytes);
        buf.extend_from_slice(b"\r\n");

        if buf.len() > limits.max_body_size {
            return Err(EncodeError::PartsTooLarge {
                max_bytes: limits.max_body_size,
            });
        }
    }

    buf.extend_from_slice(b"--");
    buf.extend_from_slice(boundary.as_bytes());
    buf.extend_from_slice(b"--\r\n");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&format!("multipart/form-data; boundary={boundary}"))?,
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(buf.len()));

    Ok(EncodedBody::new(headers, Bytes::from(buf)))
}

/// Resolves one part's headers and bytes.
///
/// Header resolution order: an entity's own headers win and are used as-is
/// (disposition and type synthesized only when absent); a resource gets an
/// upload disposition with its filename, when it has one, and an
/// octet-stream type; anything else becomes a plain field whose content type
/// is resolved recursively.
fn resolve_part(
    name: &str,
    value: &Value,
    cx: &EncodeContext<'_>,
) -> Result<(HeaderMap, Bytes), EncodeError> {
    match value {
        Value::Entity(entity) if !entity.headers().is_empty() => {
            let mut headers = entity.headers().clone();
            let own_type = entity.content_type();
            let encoded = cx.encode(entity.body(), own_type.as_ref())?;

            if !headers.contains_key(header::CONTENT_DISPOSITION) {
                headers.insert(header::CONTENT_DISPOSITION, content_disposition(name, None)?);
            }
            if !headers.contains_key(header::CONTENT_TYPE) {
                if let Some(content_type) = encoded.headers().get(header::CONTENT_TYPE) {
                    headers.insert(header::CONTENT_TYPE, content_type.clone());
                }
            }

            Ok((headers, encoded.into_bytes()))
        }
        Value::Resource(resource) => {
            let mut headers = HeaderMap::new();
            headers.insert(
                header::CONTENT_DISPOSITION,
                content_disposition(name, resource.filename())?,
            );
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/octet-stream"),
            );

            Ok((headers, resource.read_bytes()?))
        }
        other => {
            let encoded = cx.encode(other, None)?;

            let mut headers = HeaderMap::new();
            headers.insert(header::CONTENT_DISPOSITION, content_disposition(name, None)?);
            if let Some(content_type) = encoded.headers().get(header::CONTENT_TYPE) {
                headers.insert(header::CONTENT_TYPE, content_type.clone());
            }

            Ok((headers, encoded.into_bytes()))
        }
    }
}

/// Builds a `form-data` disposition value.
///
/// The name and filename are inserted literally, byte-for-byte: no percent
/// encoding and no RFC 2231 extended syntax, so non-ASCII filenames pass
/// through unescaped. Receivers that require escaping must be handed
/// pre-escaped names.
fn content_disposition(
    name: &str,
    filename: Option<&str>,
) -> Result<HeaderValue, EncodeError> {
    let mut value = format!("form-data; name=\"{name}\"");
    if let Some(filename) = filename {
        value.push_str("; filename=\"");
        value.push_str(filename);
        value.push('"');
    }
    Ok(HeaderValue::from_bytes(value.as_bytes())?)
}

/// Writes part headers with canonical title-cased names.
fn write_headers(buf: &mut Vec<u8>, headers: &HeaderMap) {
    for (name, value) in headers {
        let mut first_in_segment = true;
        for &byte in name.as_str().as_bytes() {
            if first_in_segment {
                buf.push(byte.to_ascii_uppercase());
                first_in_segment = false;
            } else {
                buf.push(byte);
            }
            if byte == b'-' {
                first_in_segment = true;
            }
        }
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }
}
