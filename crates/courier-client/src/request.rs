//! Request assembly.
//!
//! [`RequestBuilder`] turns (method, uri, headers, body value) into an
//! `http::Request<Bytes>` by running the body through the encoder. The
//! encoder's headers land on the request as-is; nothing downstream is
//! allowed to re-derive them.

use bytes::Bytes;
use courier_encode::{Encoder, Value};
use http::{HeaderMap, HeaderValue, Method, Request, Uri};

use crate::error::ClientResult;

/// Builder for an encoded HTTP request.
///
/// # Example
///
/// ```rust
/// use courier_client::RequestBuilder;
/// use courier_encode::{Encoder, MultiMap, Value};
/// use http::Method;
///
/// let mut form = MultiMap::new();
/// form.add("name", "Jack");
///
/// let encoder = Encoder::new();
/// let request = RequestBuilder::new(Method::POST, "http://localhost/post".parse().unwrap())
///     .build(&encoder, &Value::from(form))
///     .unwrap();
///
/// assert_eq!(
///     request.headers()[http::header::CONTENT_TYPE],
///     "application/x-www-form-urlencoded"
/// );
/// assert_eq!(&request.body()[..], b"name=Jack");
/// ```
#[derive(Debug)]
pub struct RequestBuilder {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
}

impl RequestBuilder {
    /// Creates a builder for the given method and target.
    #[must_use]
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
        }
    }

    /// Shorthand for a POST request.
    #[must_use]
    pub fn post(uri: Uri) -> Self {
        Self::new(Method::POST, uri)
    }

    /// Shorthand for a PUT request.
    #[must_use]
    pub fn put(uri: Uri) -> Self {
        Self::new(Method::PUT, uri)
    }

    /// Adds a request header. Repeated names append.
    #[must_use]
    pub fn header(mut self, name: http::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets the explicit `Content-Type` for body encoding.
    #[must_use]
    pub fn content_type(mut self, value: HeaderValue) -> Self {
        self.headers.insert(http::header::CONTENT_TYPE, value);
        self
    }

    /// Encodes `body` and assembles the request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Encode`](crate::ClientError::Encode) when the
    /// body has no eligible converter, or
    /// [`ClientError::Http`](crate::ClientError::Http) when request
    /// assembly fails.
    pub fn build(self, encoder: &Encoder, body: &Value) -> ClientResult<Request<Bytes>> {
        let encoded = encoder.encode(body, Some(&self.headers))?;
        let (headers, bytes) = encoded.into_parts();

        tracing::debug!(method = %self.method, uri = %self.uri, bytes = bytes.len(), "built request");

        let mut request = Request::builder().method(self.method).uri(self.uri);
        if let Some(request_headers) = request.headers_mut() {
            *request_headers = headers;
        }
        Ok(request.body(bytes)?)
    }
}
