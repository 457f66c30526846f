//! The `hawk_sign` crate signs HTTP requests with the Hawk authentication scheme, and verifies
//! the `Server-Authorization` headers that come back.
//!
//! # Examples
//!
//! ## Signing a request
//!
//! A [`Client`] turns a method, URL and body into an `http::Request` carrying an `Authorization`
//! header.  The envelope of the signed request is kept to check the server's response.
//!
//! ```
//! use hawk_sign::{Client, Credentials, SHA256};
//!
//! let client = Client::new(Credentials::new("test-client", "no-secret", SHA256));
//! let signed = client
//!     .new_request("GET", "http://localhost:8000/resource", std::io::empty(), "", None)
//!     .unwrap();
//!
//! let header = signed.request().headers()["authorization"].to_str().unwrap();
//! assert!(header.starts_with("Hawk id=\"test-client\""));
//! assert!(header.contains("mac="));
//! ```
//!
//! ## Verifying a response
//!
//! ```
//! use hawk_sign::{Client, Credentials, SHA256};
//!
//! let credentials = Credentials::new("test-client", "no-secret", SHA256);
//! let client = Client::new(credentials.clone());
//! let (_, envelope) = client
//!     .new_request("GET", "https://localhost/resource", std::io::empty(), "", None)
//!     .unwrap()
//!     .into_parts();
//!
//! // the server, sharing the key, answers with a Server-Authorization header
//! let server_auth = envelope
//!     .server_authorization(&credentials.key, Some("text/plain"), b"Hello", None)
//!     .unwrap();
//!
//! client
//!     .verify_response(&envelope, &server_auth, Some("text/plain"), b"Hello")
//!     .unwrap();
//! ```
//!
//! ## Lower-level signing
//!
//! [`RequestBuilder`] and [`RequestContext`] expose each step, for callers that manage their own
//! URLs, nonces and timestamps.
//!
//! ```
//! use hawk_sign::{Key, RequestBuilder, State, SHA256};
//! use std::time::{Duration, UNIX_EPOCH};
//!
//! let key = Key::new("werxhqb98rpaxn39848xrunpaw3489ruxnpa98w4rxn", SHA256);
//! let mut request = RequestBuilder::new()
//!     .algorithm(SHA256)
//!     .method("GET")
//!     .host("example.com")
//!     .port(8000)
//!     .uri("/resource/1?b=1&a=2")
//!     .ts(UNIX_EPOCH + Duration::new(1353832234, 0))
//!     .nonce("j4h3g2")
//!     .ext("some-app-ext-data")
//!     .build()
//!     .unwrap();
//! request.finalize(&key).unwrap();
//! assert_eq!(request.state(), State::Finalized);
//! assert_eq!(
//!     request.mac().unwrap().to_string(),
//!     "6R4rV5iE+NPoym+WwjeHzjAGXUtLNIxmo1vpMofpLAE="
//! );
//! ```

mod b64;

mod client;
pub use crate::client::{
    Client, ClientBuilder, SignedRequest, DEFAULT_MAX_PAYLOAD_LENGTH, MAX_NONCE_LENGTH,
};

mod credentials;
pub use crate::credentials::{Credentials, Key};

mod crypto;
pub use crate::crypto::DigestAlgorithm;

mod endpoint;
pub use crate::endpoint::{Endpoint, Scheme};

mod error;
pub use crate::error::*;

mod header;
pub use crate::header::Header;

mod mac;
pub use crate::mac::{Mac, MacType};

mod nonce;
pub use crate::nonce::{generate_nonce, NonceGenerator};

mod payload;
pub use crate::payload::PayloadHasher;

mod request;
pub use crate::request::{Envelope, RequestBuilder, RequestContext, State, DEFAULT_NONCE_LENGTH};

mod response;
pub use crate::response::ResponseContext;

pub const SHA1: DigestAlgorithm = DigestAlgorithm::Sha1;
pub const SHA256: DigestAlgorithm = DigestAlgorithm::Sha256;
pub const SHA384: DigestAlgorithm = DigestAlgorithm::Sha384;
pub const SHA512: DigestAlgorithm = DigestAlgorithm::Sha512;
