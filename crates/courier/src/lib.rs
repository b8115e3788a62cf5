//! # Courier
//!
//! **Client-side HTTP body encoding and request building**
//!
//! Courier decides how an arbitrary outgoing value (a string, a structured
//! object, a name/value multimap, a file-like resource, or a nested
//! entity-with-headers) becomes wire bytes:
//!
//! - **Converter registry** – a fixed, priority-ordered set of body encoders
//! - **Form and JSON encoding** – `application/x-www-form-urlencoded` and
//!   `application/json`, with the multimap array form under forced JSON
//! - **Multipart composition** – recursive decomposition of a named
//!   collection into independently-headered parts, any nesting depth
//! - **Explicit transport boundary** – encoded headers are final; transports
//!   plug in at the edge with their own explicit configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use courier::prelude::*;
//!
//! let mut body = MultiMap::new();
//! body.add(
//!     "file",
//!     Resource::from_bytes(b"binary content".as_slice()).with_filename("data"),
//! );
//! body.add("comment", "This is a binary file");
//!
//! let encoder = Encoder::new();
//! let encoded = encoder.encode(&Value::from(body), None).unwrap();
//!
//! assert_eq!(
//!     encoded.content_type().unwrap().essence_str(),
//!     "multipart/form-data"
//! );
//! ```

#![doc(html_root_url = "https://docs.rs/courier/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export encoding types
pub use courier_encode as encode;

// Re-export client types
pub use courier_client as client;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use courier::prelude::*;
///
/// let encoder = Encoder::new();
/// let body = encoder.encode(&Value::text("ping"), None).unwrap();
/// assert_eq!(&body.bytes()[..], b"ping");
/// ```
pub mod prelude {
    pub use courier_client::{
        ClientError, ProxyConfig, RequestBuilder, Transport, TransportConfig,
    };
    pub use courier_encode::{
        EncodeError, EncodedBody, Encoder, Entity, MultiMap, MultipartLimits, Resource,
        StreamBody, Value,
    };
}
