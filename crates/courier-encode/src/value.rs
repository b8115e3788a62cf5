//! Body value model.
//!
//! [`Value`] is the tagged variant over everything a request body can be:
//! scalar text, a structured JSON value, an ordered name/value multimap, a
//! file-like [`Resource`], raw bytes, an [`Entity`] carrying its own headers,
//! or a bare byte stream. Values are immutable once constructed; encoding
//! never mutates its input.

use bytes::Bytes;
use http::HeaderMap;
use indexmap::IndexMap;
use mime::Mime;
use std::fmt;
use std::io::Read;
use std::sync::{Arc, Mutex};

use crate::error::{EncodeError, ValueShape};
use crate::resource::Resource;

/// Any value that can be encoded as an HTTP request body.
///
/// # Example
///
/// ```rust
/// use courier_encode::{MultiMap, Value};
///
/// let mut form = MultiMap::new();
/// form.add("name", "Jack");
///
/// let body = Value::from(form);
/// assert_eq!(body.shape().to_string(), "multimap");
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// Scalar text, written verbatim.
    Text(String),
    /// A structured JSON value (objects, arrays, scalars).
    Json(serde_json::Value),
    /// An ordered name/value multimap; form fields or multipart parts.
    Multimap(MultiMap),
    /// A file-like byte source.
    Resource(Resource),
    /// Raw bytes.
    Bytes(Bytes),
    /// A value wrapped with its own explicit headers.
    Entity(Box<Entity>),
    /// A bare byte stream without resource metadata.
    ///
    /// Unlike [`Resource`], a stream carries no filename and no length, and
    /// no converter accepts it; wrap streams in a [`Resource`] to send them.
    Stream(StreamBody),
}

impl Value {
    /// Creates a text value.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a JSON value by serializing `data`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Json`] if `data` fails to serialize.
    pub fn json<T: serde::Serialize>(data: &T) -> Result<Self, EncodeError> {
        Ok(Self::Json(serde_json::to_value(data)?))
    }

    /// Returns the shape of this value.
    #[must_use]
    pub fn shape(&self) -> ValueShape {
        match self {
            Self::Text(_) => ValueShape::Text,
            Self::Json(_) => ValueShape::Json,
            Self::Multimap(_) => ValueShape::Multimap,
            Self::Resource(_) => ValueShape::Resource,
            Self::Bytes(_) => ValueShape::Bytes,
            Self::Entity(_) => ValueShape::Entity,
            Self::Stream(_) => ValueShape::Stream,
        }
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Self::Json(json)
    }
}

impl From<MultiMap> for Value {
    fn from(map: MultiMap) -> Self {
        Self::Multimap(map)
    }
}

impl From<Resource> for Value {
    fn from(resource: Resource) -> Self {
        Self::Resource(resource)
    }
}

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Entity> for Value {
    fn from(entity: Entity) -> Self {
        Self::Entity(Box::new(entity))
    }
}

impl From<StreamBody> for Value {
    fn from(stream: StreamBody) -> Self {
        Self::Stream(stream)
    }
}

/// Ordered name → values multimap.
///
/// Names are kept in first-insertion order; values under the same name are
/// appended in the order they were added. Duplicate names are legal, e.g. a
/// repeated form field.
///
/// # Example
///
/// ```rust
/// use courier_encode::MultiMap;
///
/// let mut map = MultiMap::new();
/// map.add("name", "Jack");
/// map.add("name", "Jill");
/// map.add("comment", "hello");
///
/// let pairs: Vec<_> = map.iter().map(|(name, _)| name).collect();
/// assert_eq!(pairs, ["name", "name", "comment"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultiMap {
    entries: IndexMap<String, Vec<Value>>,
}

impl MultiMap {
    /// Creates an empty multimap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` under `name`, keeping any existing values.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Replaces all values under `name` with a single `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), vec![value.into()]);
    }

    /// Returns the first value under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).and_then(|values| values.first())
    }

    /// Returns all values under `name`.
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[Value] {
        self.entries.get(name).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over (name, value) pairs: names in first-insertion order,
    /// values per name in append order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |value| (name.as_str(), value)))
    }

    /// Iterates over names and their full value lists.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Whether every value in the map is scalar text.
    #[must_use]
    pub fn is_all_text(&self) -> bool {
        self.iter().all(|(_, value)| matches!(value, Value::Text(_)))
    }
}

/// A body value together with its own explicit headers.
///
/// Inside a multipart collection an entity overrides the headers the
/// composer would otherwise synthesize for its part. At the top level an
/// entity's headers are merged into the outgoing request headers.
///
/// # Example
///
/// ```rust
/// use courier_encode::{Entity, Resource};
/// use http::{header, HeaderMap, HeaderValue};
///
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     header::CONTENT_DISPOSITION,
///     HeaderValue::from_static("form-data; name=\"a file\"; filename=\"report\""),
/// );
///
/// let part = Entity::with_headers(Resource::from_bytes(b"bytes".as_slice()), headers);
/// assert!(part.headers().contains_key(header::CONTENT_DISPOSITION));
/// ```
#[derive(Debug, Clone)]
pub struct Entity {
    headers: HeaderMap,
    body: Value,
}

impl Entity {
    /// Creates an entity with no explicit headers.
    #[must_use]
    pub fn new(body: impl Into<Value>) -> Self {
        Self {
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Creates an entity carrying explicit headers.
    #[must_use]
    pub fn with_headers(body: impl Into<Value>, headers: HeaderMap) -> Self {
        Self {
            headers,
            body: body.into(),
        }
    }

    /// Returns the explicit headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the wrapped body.
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Parses the entity's `Content-Type` header, if present and valid.
    #[must_use]
    pub fn content_type(&self) -> Option<Mime> {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
    }
}

/// A bare byte stream used directly as a body value.
///
/// Streams carry no filename and no length, so nothing can be inferred about
/// how to frame them; no converter accepts this shape. Wrap the reader in
/// [`Resource::from_reader`] to send its bytes.
#[derive(Clone)]
pub struct StreamBody {
    _inner: Arc<Mutex<Box<dyn Read + Send>>>,
}

impl StreamBody {
    /// Wraps an open reader.
    #[must_use]
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self {
            _inner: Arc::new(Mutex::new(Box::new(reader))),
        }
    }
}

impl fmt::Debug for StreamBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamBody").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_multimap_preserves_insertion_order() {
        let mut map = MultiMap::new();
        map.add("b", "1");
        map.add("a", "2");
        map.add("b", "3");

        let pairs: Vec<_> = map
            .iter()
            .map(|(name, value)| match value {
                Value::Text(text) => (name, text.as_str()),
                _ => panic!("expected text"),
            })
            .collect();

        assert_eq!(pairs, [("b", "1"), ("b", "3"), ("a", "2")]);
    }

    #[test]
    fn test_multimap_add_appends_set_replaces() {
        let mut map = MultiMap::new();
        map.add("name", "Jack");
        map.add("name", "Jill");
        assert_eq!(map.get_all("name").len(), 2);

        map.set("name", "Joe");
        assert_eq!(map.get_all("name").len(), 1);
        assert!(matches!(map.get("name"), Some(Value::Text(text)) if text == "Joe"));
    }

    #[test]
    fn test_multimap_all_text_detection() {
        let mut map = MultiMap::new();
        map.add("name", "Jack");
        assert!(map.is_all_text());

        map.add("file", Resource::from_bytes(b"data".as_slice()));
        assert!(!map.is_all_text());
    }

    #[test]
    fn test_value_shapes() {
        assert_eq!(Value::text("hi").shape(), ValueShape::Text);
        assert_eq!(Value::from(MultiMap::new()).shape(), ValueShape::Multimap);
        assert_eq!(
            Value::from(Resource::from_bytes(b"x".as_slice())).shape(),
            ValueShape::Resource
        );
        assert_eq!(
            Value::from(StreamBody::new(Cursor::new(Vec::new()))).shape(),
            ValueShape::Stream
        );
    }

    #[test]
    fn test_value_json_constructor() {
        let value = Value::json(&serde_json::json!({"id": 12})).unwrap();
        assert_eq!(value.shape(), ValueShape::Json);
    }

    #[test]
    fn test_entity_content_type() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );

        let entity = Entity::with_headers("{}", headers);
        assert_eq!(entity.content_type(), Some(mime::APPLICATION_JSON));
    }

    #[test]
    fn test_entity_without_content_type() {
        let entity = Entity::new("hello");
        assert_eq!(entity.content_type(), None);
        assert!(entity.headers().is_empty());
    }
}
