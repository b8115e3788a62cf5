//! Converter registry and content-type resolution.
//!
//! A [`BodyConverter`] is a strategy that serializes one or more value
//! shapes under specific media types. The [`ConverterRegistry`] holds a
//! fixed, priority-ordered list of converters and resolves which one handles
//! a given (value, explicit content type) pair. Dispatch is a linear scan
//! over static descriptors; the registry is built once and read-only
//! thereafter, so concurrent encode calls share it freely.

use mime::Mime;

use crate::encoded::EncodedBody;
use crate::error::{EncodeError, ValueShape};
use crate::form::FormConverter;
use crate::json::JsonConverter;
use crate::multipart::{MultipartConverter, MultipartLimits, MAX_PART_DEPTH};
use crate::octet::OctetConverter;
use crate::text::TextConverter;
use crate::value::Value;

/// A strategy that serializes one or more value shapes under specific media
/// types.
pub trait BodyConverter: Send + Sync {
    /// Whether this converter can produce `media_type` for a value of
    /// `shape`. Media type parameters (charset, boundary) are ignored for
    /// the purpose of matching.
    fn supports(&self, shape: ValueShape, media_type: &Mime) -> bool;

    /// Serializes `value` under `media_type`. The context carries the
    /// registry for converters that recurse into nested values.
    fn encode(
        &self,
        value: &Value,
        media_type: &Mime,
        cx: &EncodeContext<'_>,
    ) -> Result<EncodedBody, EncodeError>;
}

/// Fixed, priority-ordered set of body converters.
///
/// Converters are tried in order: text, octet, form, JSON, multipart. The
/// first converter accepting the (shape, media type) pair wins.
pub struct ConverterRegistry {
    converters: Vec<Box<dyn BodyConverter>>,
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("converters", &self.converters.len())
            .finish()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterRegistry {
    /// Creates the standard registry with default multipart limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(MultipartLimits::default())
    }

    /// Creates the standard registry with custom multipart limits.
    #[must_use]
    pub fn with_limits(limits: MultipartLimits) -> Self {
        Self {
            converters: vec![
                Box::new(TextConverter),
                Box::new(OctetConverter),
                Box::new(FormConverter),
                Box::new(JsonConverter),
                Box::new(MultipartConverter::new(limits)),
            ],
        }
    }

    /// Resolves the converter and effective media type for `value`.
    ///
    /// With an explicit content type, only converters accepting that exact
    /// media type for this value's shape are eligible. Without one, the
    /// value's shape default applies: text/plain for text, application/json
    /// for structured values, x-www-form-urlencoded for an all-text
    /// multimap, multipart/form-data for a mixed multimap, and
    /// application/octet-stream for resources and raw bytes. An explicit
    /// content type always overrides the default; a combination the shape
    /// does not support fails rather than coercing.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::NoConverter`] when no converter accepts the
    /// pair.
    pub fn resolve<'a>(
        &'a self,
        value: &Value,
        explicit: Option<&Mime>,
    ) -> Result<(&'a dyn BodyConverter, Mime), EncodeError> {
        let shape = value.shape();
        let media_type = match explicit {
            Some(media_type) => media_type.clone(),
            None => default_media_type(value)
                .ok_or_else(|| EncodeError::no_converter(shape, None))?,
        };

        for converter in &self.converters {
            if converter.supports(shape, &media_type) {
                tracing::debug!(%shape, %media_type, "resolved body converter");
                return Ok((converter.as_ref(), media_type));
            }
        }

        Err(EncodeError::no_converter(shape, explicit))
    }
}

/// Default media type for a value when the caller supplied none.
///
/// A multimap defaults to form encoding only while every value is scalar
/// text; any file-like, wrapped, or structured value switches the whole
/// collection to multipart. Entities and bare streams have no default of
/// their own: entities are unwrapped before resolution, streams are never
/// encodable.
#[must_use]
pub fn default_media_type(value: &Value) -> Option<Mime> {
    match value {
        Value::Text(_) => Some(mime::TEXT_PLAIN),
        Value::Json(_) => Some(mime::APPLICATION_JSON),
        Value::Multimap(map) => Some(if map.is_all_text() {
            mime::APPLICATION_WWW_FORM_URLENCODED
        } else {
            mime::MULTIPART_FORM_DATA
        }),
        Value::Resource(_) | Value::Bytes(_) => Some(mime::APPLICATION_OCTET_STREAM),
        Value::Entity(_) | Value::Stream(_) => None,
    }
}

/// Per-call state threaded through recursive encoding.
///
/// Carries the registry and the current nesting depth; the multipart
/// composer recurses through it for each part.
#[derive(Debug)]
pub struct EncodeContext<'a> {
    registry: &'a ConverterRegistry,
    depth: usize,
}

impl<'a> EncodeContext<'a> {
    /// Creates the root context for a top-level encode call.
    #[must_use]
    pub fn root(registry: &'a ConverterRegistry) -> Self {
        Self { registry, depth: 0 }
    }

    /// Encodes `value` under `explicit` (or its shape default), recursing
    /// through entity wrappers.
    ///
    /// An entity's own `Content-Type` header, when present, overrides the
    /// inherited explicit media type for its body.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::NestingTooDeep`] when entity nesting exceeds
    /// [`MAX_PART_DEPTH`], or any error from the resolved converter.
    pub fn encode(
        &self,
        value: &Value,
        explicit: Option<&Mime>,
    ) -> Result<EncodedBody, EncodeError> {
        if self.depth >= MAX_PART_DEPTH {
            return Err(EncodeError::NestingTooDeep { depth: self.depth });
        }

        if let Value::Entity(entity) = value {
            let own_type = entity.content_type();
            return self
                .nested()
                .encode(entity.body(), own_type.as_ref().or(explicit));
        }

        let (converter, media_type) = self.registry.resolve(value, explicit)?;
        converter.encode(value, &media_type, &self.nested())
    }

    /// Context one level deeper, for recursive part encoding.
    #[must_use]
    pub(crate) fn nested(&self) -> EncodeContext<'a> {
        EncodeContext {
            registry: self.registry,
            depth: self.depth + 1,
        }
    }
}

/// Whether `media_type` is JSON (`application/json` or a `+json` suffix).
pub(crate) fn is_json(media_type: &Mime) -> bool {
    media_type.subtype() == mime::JSON || media_type.suffix() == Some(mime::JSON)
}

/// Whether `media_type` is `application/x-www-form-urlencoded`.
pub(crate) fn is_form_urlencoded(media_type: &Mime) -> bool {
    media_type.type_() == mime::APPLICATION
        && media_type.subtype() == mime::WWW_FORM_URLENCODED
}

/// Whether `media_type` is `multipart/form-data`.
pub(crate) fn is_multipart_form_data(media_type: &Mime) -> bool {
    media_type.type_() == mime::MULTIPART && media_type.subtype() == mime::FORM_DATA
}
