use crate::credentials::Credentials;
use crate::endpoint::Endpoint;
use crate::error::*;
use crate::nonce::NonceGenerator;
use crate::request::{Envelope, RequestBuilder, DEFAULT_NONCE_LENGTH};
use crate::response::ResponseContext;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use log::debug;
use std::io::Read;
use std::time::SystemTime;

/// The longest nonce a client can be configured to generate.
pub const MAX_NONCE_LENGTH: usize = 128;

/// The largest request body a client will read and hash, by default.
pub const DEFAULT_MAX_PAYLOAD_LENGTH: u64 = 16 * 1024 * 1024;

/// A request signed by a [`Client`], ready to be handed to an HTTP client.
#[derive(Debug)]
pub struct SignedRequest {
    request: http::Request<Vec<u8>>,
    envelope: Envelope,
}

impl SignedRequest {
    pub fn request(&self) -> &http::Request<Vec<u8>> {
        &self.request
    }

    /// The signed fields of the request, needed to verify the response.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn into_parts(self) -> (http::Request<Vec<u8>>, Envelope) {
        (self.request, self.envelope)
    }
}

/// Client creates HTTP requests that are set up for Hawk authentication, and verifies the
/// responses to them.  It does not send requests.
///
/// # Examples
///
/// ```
/// use hawk_sign::{Client, Credentials, SHA256};
///
/// let client = Client::builder(Credentials::new("jdoe", "Syp9393", SHA256))
///     .nonce_length(8)
///     .build()
///     .unwrap();
/// let signed = client
///     .new_request(
///         "POST",
///         "https://example.com/greeting",
///         &b"Hello world!"[..],
///         "text/plain",
///         None,
///     )
///     .unwrap();
/// let auth = signed.request().headers()["authorization"].to_str().unwrap();
/// assert!(auth.starts_with("Hawk id=\"jdoe\""));
/// assert!(auth.contains("hash=\""));
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    credentials: Credentials,
    nonce_length: usize,
    max_payload_length: u64,
}

impl Client {
    /// Create a client with the default nonce and payload lengths.
    pub fn new(credentials: Credentials) -> Client {
        Client {
            credentials,
            nonce_length: DEFAULT_NONCE_LENGTH,
            max_payload_length: DEFAULT_MAX_PAYLOAD_LENGTH,
        }
    }

    pub fn builder(credentials: Credentials) -> ClientBuilder {
        ClientBuilder(Client::new(credentials))
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn nonce_length(&self) -> usize {
        self.nonce_length
    }

    /// Create a signed request.  The body is read in full, up to the client's maximum payload
    /// length, and its hash is included when `content_type` is not empty.
    pub fn new_request<R: Read>(
        &self,
        method: &str,
        url: &str,
        body: R,
        content_type: &str,
        ext: Option<&str>,
    ) -> Result<SignedRequest> {
        // checks the scheme and fills in the default port
        let endpoint = Endpoint::parse(url)?;
        // the signed host and request-target are taken from the URI that is sent
        let target: http::Uri = url.parse().map_err(http::Error::from)?;
        let path = target
            .path_and_query()
            .map(|pq| pq.as_str())
            .filter(|pq| !pq.is_empty())
            .unwrap_or("/");
        let host = target.host().unwrap_or_else(|| endpoint.host());

        let mut content = Vec::new();
        body.take(self.max_payload_length.saturating_add(1))
            .read_to_end(&mut content)?;
        if content.len() as u64 > self.max_payload_length {
            return Err(Error::PayloadTooLarge(self.max_payload_length));
        }

        let nonce = NonceGenerator::new().generate(self.nonce_length);
        let mut context = RequestBuilder::new()
            .algorithm(self.credentials.key.algorithm())
            .method(method)
            .endpoint(&endpoint)
            .host(host)
            .uri(path)
            .ts(SystemTime::now())
            .nonce(nonce)
            .content_type(content_type)
            .content(content.clone())
            .ext(ext.unwrap_or(""))
            .build()?;
        if !content_type.is_empty() {
            context.validate()?;
        }
        context.finalize(&self.credentials.key)?;
        let authorization = context
            .authorization(&self.credentials.id)
            .ok_or(Error::InvalidComponent("id"))?;

        let mut builder = http::Request::builder()
            .method(method)
            .uri(target)
            .header(AUTHORIZATION, authorization);
        if !content_type.is_empty() {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let request = builder.body(content)?;
        debug!("signed {} {} for {}", method, url, self.credentials.id);

        Ok(SignedRequest {
            request,
            envelope: context.into_envelope(),
        })
    }

    /// Verify the `Server-Authorization` header of a response to a request from this client.
    ///
    /// The MAC is expected over the `hawk.1.response` canonical string, which differs from the
    /// request's `hawk.1.header` string only in its first line.
    pub fn verify_response(
        &self,
        envelope: &Envelope,
        server_authorization: &str,
        content_type: Option<&str>,
        content: &[u8],
    ) -> Result<()> {
        let mut response =
            ResponseContext::from_server_authorization(envelope, server_authorization)?
                .content(content);
        if let Some(ct) = content_type {
            response = response.content_type(ct);
        }
        response.verify(&self.credentials.key)
    }
}

/// Builder for a [`Client`].
#[derive(Debug, Clone)]
pub struct ClientBuilder(Client);

impl ClientBuilder {
    /// Set the length of generated nonces.
    pub fn nonce_length(mut self, nonce_length: usize) -> Self {
        self.0.nonce_length = nonce_length;
        self
    }

    /// Set the largest request body the client will read.
    pub fn max_payload_length(mut self, max_payload_length: u64) -> Self {
        self.0.max_payload_length = max_payload_length;
        self
    }

    pub fn build(self) -> Result<Client> {
        if self.0.nonce_length > MAX_NONCE_LENGTH {
            return Err(Error::NonceTooLong(self.0.nonce_length, MAX_NONCE_LENGTH));
        }
        Ok(self.0)
    }
}
