//! Top-level encoding entry point.

use http::{header, HeaderMap};
use mime::Mime;

use crate::converter::{ConverterRegistry, EncodeContext};
use crate::encoded::EncodedBody;
use crate::error::EncodeError;
use crate::multipart::{MultipartLimits, MAX_PART_DEPTH};
use crate::value::Value;

/// Encodes body values into wire bytes plus headers.
///
/// The encoder owns the converter registry. It is built once at
/// configuration time, is read-only afterwards, and can be shared freely
/// across concurrent encode calls.
///
/// # Example
///
/// ```rust
/// use courier_encode::{Encoder, MultiMap, Value};
///
/// let mut form = MultiMap::new();
/// form.add("name", "Jack");
///
/// let encoder = Encoder::new();
/// let body = encoder.encode(&Value::from(form), None).unwrap();
///
/// assert_eq!(&body.bytes()[..], b"name=Jack");
/// assert_eq!(
///     body.headers()[http::header::CONTENT_TYPE],
///     "application/x-www-form-urlencoded"
/// );
/// ```
#[derive(Debug, Default)]
pub struct Encoder {
    registry: ConverterRegistry,
}

impl Encoder {
    /// Creates an encoder with the standard converter set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: ConverterRegistry::new(),
        }
    }

    /// Creates an encoder with custom multipart limits.
    #[must_use]
    pub fn with_limits(limits: MultipartLimits) -> Self {
        Self {
            registry: ConverterRegistry::with_limits(limits),
        }
    }

    /// Returns the converter registry.
    #[must_use]
    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// Encodes `value` into headers and bytes.
    ///
    /// `headers` are the caller's request headers; a `Content-Type` among
    /// them acts as the explicit media type for converter resolution. A
    /// top-level [`Entity`](crate::Entity) is unwrapped first, its headers
    /// overriding the caller's. Headers the encoding itself produces
    /// (`Content-Type`, `Content-Length`) override both; everything else is
    /// carried through untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::NoConverter`] when no converter accepts the
    /// value under the effective media type, or any error from the selected
    /// converter.
    pub fn encode(
        &self,
        value: &Value,
        headers: Option<&HeaderMap>,
    ) -> Result<EncodedBody, EncodeError> {
        let mut request_headers = headers.cloned().unwrap_or_default();

        let mut current = value;
        let mut depth = 0usize;
        while let Value::Entity(entity) = current {
            depth += 1;
            if depth > MAX_PART_DEPTH {
                return Err(EncodeError::NestingTooDeep { depth });
            }
            merge_overriding(&mut request_headers, entity.headers());
            current = entity.body();
        }

        let explicit = content_type_of(&request_headers);
        let cx = EncodeContext::root(&self.registry);
        let encoded = cx.encode(current, explicit.as_ref())?;

        let (body_headers, bytes) = encoded.into_parts();
        merge_overriding(&mut request_headers, &body_headers);

        tracing::debug!(
            content_type = request_headers
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("<none>"),
            bytes = bytes.len(),
            "encoded request body"
        );

        Ok(EncodedBody::new(request_headers, bytes))
    }
}

/// Parses the `Content-Type` header out of `headers`, if present and valid.
fn content_type_of(headers: &HeaderMap) -> Option<Mime> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

/// Replaces each of `src`'s header names in `dst` with `src`'s full value
/// list, leaving other names untouched.
fn merge_overriding(dst: &mut HeaderMap, src: &HeaderMap) {
    for name in src.keys() {
        dst.remove(name);
        for value in src.get_all(name) {
            dst.append(name.clone(), value.clone());
        }
    }
}
