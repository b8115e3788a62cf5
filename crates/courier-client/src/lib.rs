//! # Courier Client
//!
//! Transport boundary and request building for the Courier HTTP client.
//!
//! This crate turns encoded bodies into `http::Request` values and defines
//! the contract a transport has to honor. It contains no socket code: a
//! [`Transport`] implementation (blocking, async, or a test double) is
//! plugged in at the edge, configured explicitly through
//! [`TransportConfig`].
//!
//! ## Example
//!
//! ```rust
//! use courier_client::{RequestBuilder, TransportConfig};
//! use courier_encode::{Encoder, MultiMap, Value};
//! use std::time::Duration;
//!
//! let config = TransportConfig::new()
//!     .connect_timeout(Duration::from_secs(2))
//!     .read_timeout(Duration::from_secs(5));
//!
//! let mut form = MultiMap::new();
//! form.add("name", "Jack");
//!
//! let encoder = Encoder::new();
//! let request = RequestBuilder::post("http://localhost/post".parse().unwrap())
//!     .build(&encoder, &Value::from(form))
//!     .unwrap();
//!
//! // Hand `request` to a Transport built with `config`.
//! assert_eq!(&request.body()[..], b"name=Jack");
//! # let _ = config;
//! ```

#![doc(html_root_url = "https://docs.rs/courier-client/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod request;
mod transport;

// Re-export main types
pub use config::{ProxyConfig, TransportConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT};
pub use error::{ClientError, ClientResult, TransportError};
pub use request::RequestBuilder;
pub use transport::Transport;
