use crate::credentials::Key;
use crate::crypto::DigestAlgorithm;
use crate::endpoint::Endpoint;
use crate::error::*;
use crate::header::Header;
use crate::mac::{unix_secs, Mac, MacType};
use crate::nonce::generate_nonce;
use crate::payload::PayloadHasher;
use log::debug;
use std::time::SystemTime;

/// Length of the nonce invented when a request does not supply one.
pub const DEFAULT_NONCE_LENGTH: usize = 6;

/// The request fields covered by a Hawk MAC: everything but the payload hash and `ext`.
///
/// An Envelope is created along with a [`RequestContext`] and outlives it, so that the
/// response to the request can be verified after the request itself has been sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    algorithm: DigestAlgorithm,
    method: String,
    uri: String,
    host: String,
    port: u16,
    ts: SystemTime,
    nonce: String,
}

impl Envelope {
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn ts(&self) -> SystemTime {
        self.ts
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Check that every field needed for a MAC is present.
    fn check(&self) -> Result<()> {
        if unix_secs(self.ts) == 0 {
            return Err(Error::MissingField("ts"));
        }
        let fields = [
            ("nonce", &self.nonce),
            ("method", &self.method),
            ("uri", &self.uri),
            ("host", &self.host),
        ];
        for (name, value) in fields.iter() {
            if value.is_empty() {
                return Err(Error::MissingField(*name));
            }
        }
        if self.port == 0 {
            return Err(Error::MissingField("port"));
        }
        Ok(())
    }

    /// Calculate the MAC over this envelope.
    pub(crate) fn make_mac(
        &self,
        mac_type: MacType,
        key: &Key,
        hash: Option<&[u8]>,
        ext: Option<&str>,
    ) -> Result<Mac> {
        if key.algorithm() != self.algorithm {
            return Err(Error::AlgorithmMismatch(key.algorithm(), self.algorithm));
        }
        Ok(Mac::new(
            mac_type,
            key,
            self.ts,
            &self.nonce,
            &self.method,
            &self.host,
            self.port,
            &self.uri,
            hash,
            ext,
        ))
    }
}

/// The stages a [`RequestContext`] passes through.  Each stage may only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// All required fields are present; no hash or MAC has been calculated.
    Created,
    /// The payload hash has been calculated.
    PayloadHashed,
    /// The MAC has been calculated, and the context can no longer change.
    Finalized,
    /// The `Authorization` header has been produced.
    HeaderEmitted,
}

/// RequestContext represents a single HTTP request being signed.
///
/// A context is created with a [`RequestBuilder`], optionally has its payload hash calculated
/// with [`validate`](RequestContext::validate), is signed exactly once with
/// [`finalize`](RequestContext::finalize), and then yields its `Authorization` header.
///
/// # Examples
///
/// ```
/// use hawk_sign::{Key, RequestBuilder, SHA256};
///
/// let key = Key::new("werxhqb98rpaxn39848xrunpaw3489ruxnpa98w4rxn", SHA256);
/// let mut request = RequestBuilder::new()
///     .algorithm(SHA256)
///     .method("POST")
///     .host("example.com")
///     .port(8000)
///     .uri("/resource/1")
///     .content_type("text/plain")
///     .content("Thank you for flying Hawk")
///     .build()
///     .unwrap();
/// request.validate().unwrap();
/// request.finalize(&key).unwrap();
/// let header = request.authorization("dh37fgj492je").unwrap();
/// assert!(header.starts_with("Hawk id=\"dh37fgj492je\""));
/// assert!(request.finalize(&key).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    envelope: Envelope,
    content_type: Option<String>,
    content: Vec<u8>,
    ext: Option<String>,
    hash: Option<Vec<u8>>,
    mac: Option<Mac>,
    state: State,
}

impl RequestContext {
    /// Calculate the payload hash from the content type and content.
    ///
    /// This fails, leaving the context unchanged, if the request has no content type or has
    /// already been finalized; so it is safe to call unconditionally before `finalize`.
    pub fn validate(&mut self) -> Result<()> {
        if self.mac.is_some() {
            return Err(Error::AlreadyFinalized);
        }
        let content_type = match self.content_type {
            Some(ref ct) => ct,
            None => return Err(Error::MissingField("content_type")),
        };
        self.hash = Some(PayloadHasher::hash(
            content_type,
            self.envelope.algorithm,
            &self.content,
        ));
        self.state = State::PayloadHashed;
        debug!(
            "hashed {}-byte payload for {} {}",
            self.content.len(),
            self.envelope.method,
            self.envelope.uri
        );
        Ok(())
    }

    /// Calculate the request MAC with the given key.  This can only succeed once.
    pub fn finalize(&mut self, key: &Key) -> Result<()> {
        if self.mac.is_some() {
            return Err(Error::AlreadyFinalized);
        }
        self.envelope.check()?;
        let mac = self.envelope.make_mac(
            MacType::Header,
            key,
            self.hash.as_deref(),
            self.ext.as_deref(),
        )?;
        self.mac = Some(mac);
        self.state = State::Finalized;
        debug!(
            "finalized {} {} with nonce {}",
            self.envelope.method, self.envelope.uri, self.envelope.nonce
        );
        Ok(())
    }

    /// Get the value for the `Authorization` header, including the `Hawk ` scheme, for the
    /// given client id.  This is `None` until the context has been finalized.
    pub fn authorization(&mut self, id: &str) -> Option<String> {
        let mac = self.mac.clone()?;
        let header = Header::new(
            Some(id),
            Some(self.envelope.ts),
            Some(&self.envelope.nonce[..]),
            Some(mac),
            self.ext.as_deref(),
            self.hash.clone(),
        );
        match header {
            Ok(header) => {
                self.state = State::HeaderEmitted;
                Some(header.to_header_value())
            }
            Err(e) => {
                debug!("cannot emit header: {}", e);
                None
            }
        }
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Consume the context, keeping the fields needed to verify the response.
    pub fn into_envelope(self) -> Envelope {
        self.envelope
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// The payload hash, if `validate` has succeeded.
    pub fn hash(&self) -> Option<&[u8]> {
        self.hash.as_deref()
    }

    /// The request MAC, if `finalize` has succeeded.
    pub fn mac(&self) -> Option<&Mac> {
        self.mac.as_ref()
    }

    pub fn ext(&self) -> Option<&str> {
        self.ext.as_deref()
    }
}

/// Builder for a [`RequestContext`].
///
/// Most uses of this library will hold several of the fields fixed.  Cloning the builder with
/// these fields applied is a convenient way to avoid repeating them.
///
/// The `algorithm`, `method`, `uri`, `host` and `port` fields are required.  If `ts` or `nonce`
/// are not given, the current time and a fresh nonce are used.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    algorithm: Option<DigestAlgorithm>,
    method: String,
    uri: String,
    host: String,
    port: u16,
    ts: Option<SystemTime>,
    nonce: Option<String>,
    content_type: Option<String>,
    content: Vec<u8>,
    ext: Option<String>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the digest algorithm used for the payload hash and MAC.
    pub fn algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Set the request method. This should be a capitalized string.
    pub fn method<S: Into<String>>(mut self, method: S) -> Self {
        self.method = method.into();
        self
    }

    /// Set the path and query for the request.
    pub fn uri<S: Into<String>>(mut self, uri: S) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the host, port, and uri for the request from a decomposed URL.
    pub fn endpoint(self, endpoint: &Endpoint) -> Self {
        self.host(endpoint.host())
            .port(endpoint.port())
            .uri(endpoint.uri())
    }

    pub fn ts(mut self, ts: SystemTime) -> Self {
        self.ts = Some(ts);
        self
    }

    pub fn nonce<S: Into<String>>(mut self, nonce: S) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Set the content type.  An empty content type is treated as absent.
    pub fn content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        let content_type = content_type.into();
        self.content_type = if content_type.is_empty() {
            None
        } else {
            Some(content_type)
        };
        self
    }

    pub fn content<B: Into<Vec<u8>>>(mut self, content: B) -> Self {
        self.content = content.into();
        self
    }

    /// Set the `ext` Hawk property for the request.  An empty value is treated as absent.
    pub fn ext<S: Into<String>>(mut self, ext: S) -> Self {
        let ext = ext.into();
        self.ext = if ext.is_empty() { None } else { Some(ext) };
        self
    }

    /// Create the RequestContext, checking that all required fields are present.
    pub fn build(self) -> Result<RequestContext> {
        let algorithm = self.algorithm.ok_or(Error::MissingField("algorithm"))?;
        if self.host.is_empty() {
            return Err(Error::MissingField("host"));
        }
        if self.port == 0 {
            return Err(Error::MissingField("port"));
        }
        if self.uri.is_empty() {
            return Err(Error::MissingField("uri"));
        }
        if self.method.is_empty() {
            return Err(Error::MissingField("method"));
        }

        let nonce = match self.nonce {
            Some(nonce) if !nonce.is_empty() => nonce,
            _ => generate_nonce(DEFAULT_NONCE_LENGTH),
        };
        let ts = match self.ts {
            Some(ts) if unix_secs(ts) != 0 => ts,
            _ => SystemTime::now(),
        };

        // these values appear in the header, which has no escaping
        if nonce.contains('"') {
            return Err(Error::InvalidComponent("nonce"));
        }
        if let Some(ref ext) = self.ext {
            if ext.contains('"') {
                return Err(Error::InvalidComponent("ext"));
            }
        }

        Ok(RequestContext {
            envelope: Envelope {
                algorithm,
                method: self.method,
                uri: self.uri,
                host: self.host,
                port: self.port,
                ts,
                nonce,
            },
            content_type: self.content_type,
            content: self.content,
            ext: self.ext,
            hash: None,
            mac: None,
            state: State::Created,
        })
    }
}
