//! The transport boundary.

use bytes::Bytes;
use http::{Request, Response};

use crate::error::TransportError;

/// Executes an already-encoded request.
///
/// The request's headers and body come straight from the encoder. An
/// implementation must not mutate or re-derive any header the encoder set,
/// in particular `Content-Type` with its `boundary` parameter and
/// `Content-Length`. It may add transport-level headers such as `Host` or
/// `Connection` while writing the wire message.
///
/// A request whose body has no `Content-Length` header has an unknown
/// length; the transport chooses the framing (for HTTP/1.1, chunked
/// transfer coding).
pub trait Transport {
    /// Sends `request` and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on connection, timeout, or protocol
    /// failures.
    fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    /// Test double that echoes the request body back.
    struct EchoTransport;

    impl Transport for EchoTransport {
        fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
            Response::builder()
                .status(StatusCode::OK)
                .body(request.into_body())
                .map_err(|e| TransportError::other(e.to_string()))
        }
    }

    #[test]
    fn test_transport_object_safety() {
        let transport: Box<dyn Transport> = Box::new(EchoTransport);

        let request = Request::builder()
            .method(http::Method::POST)
            .uri("http://localhost/post")
            .body(Bytes::from_static(b"name=Jack"))
            .unwrap();

        let response = transport.execute(request).unwrap();
        assert_eq!(&response.into_body()[..], b"name=Jack");
    }
}
