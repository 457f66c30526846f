use crate::credentials::Key;
use crate::error::*;
use crate::header::Header;
use crate::mac::{Mac, MacType};
use crate::payload::PayloadHasher;
use crate::request::Envelope;
use log::debug;

/// Strip any parameters (`; charset=..`) from a content type.
fn bare_content_type(content_type: &str) -> Option<&str> {
    let bare = content_type.split(';').next().unwrap_or("").trim();
    if bare.is_empty() {
        None
    } else {
        Some(bare)
    }
}

/// A ResponseContext verifies a Hawk header received from a peer, against the envelope of the
/// request it answers and the content that accompanied it.
///
/// Clients use [`from_server_authorization`](ResponseContext::from_server_authorization) to
/// check a server's response.  Servers use
/// [`from_authorization`](ResponseContext::from_authorization) to check an incoming request's
/// `Authorization` header against an envelope built from the request.
///
/// Verification is all-or-nothing: the payload hash (when the peer sent one and the content
/// type is known) and the MAC must both match.
#[derive(Debug, Clone)]
pub struct ResponseContext<'a> {
    envelope: &'a Envelope,
    mac_type: MacType,
    content_type: Option<&'a str>,
    content: &'a [u8],
    hash: Option<Vec<u8>>,
    ext: Option<String>,
    mac: Option<Mac>,
}

impl<'a> ResponseContext<'a> {
    /// Parse a `Server-Authorization` header value for the request with the given envelope.
    pub fn from_server_authorization(envelope: &'a Envelope, header: &str) -> Result<Self> {
        Self::parse(envelope, MacType::Response, header)
    }

    /// Parse an `Authorization` header value for the request with the given envelope.
    pub fn from_authorization(envelope: &'a Envelope, header: &str) -> Result<Self> {
        Self::parse(envelope, MacType::Header, header)
    }

    fn parse(envelope: &'a Envelope, mac_type: MacType, header: &str) -> Result<Self> {
        let header: Header = header.parse()?;
        Ok(ResponseContext {
            envelope,
            mac_type,
            content_type: None,
            content: &[],
            hash: header.hash,
            ext: header.ext,
            mac: header.mac,
        })
    }

    /// Set the content type of the received content.  Parameters are ignored.
    pub fn content_type(mut self, content_type: &'a str) -> Self {
        self.content_type = bare_content_type(content_type);
        self
    }

    /// Set the received content.
    pub fn content(mut self, content: &'a [u8]) -> Self {
        self.content = content;
        self
    }

    /// The `ext` value sent by the peer, if any.
    pub fn ext(&self) -> Option<&str> {
        self.ext.as_deref()
    }

    /// Check the received header with the given key.
    ///
    /// When a content type has been set, the payload hash is recalculated, and a hash sent by
    /// the peer must equal it.  The MAC is then recalculated over the envelope, the hash (the
    /// peer's, else the recalculated one) and the peer's `ext`, and compared in constant time.
    pub fn verify(&self, key: &Key) -> Result<()> {
        let header_mac = match self.mac {
            Some(ref mac) => mac,
            None => {
                debug!("rejecting Hawk header without a mac");
                return Err(Error::MacMismatch);
            }
        };

        let calculated_hash = self
            .content_type
            .map(|ct| PayloadHasher::hash(ct, self.envelope.algorithm(), self.content));

        if let (Some(received), Some(calculated)) = (&self.hash, &calculated_hash) {
            if received != calculated {
                debug!("rejecting Hawk header: payload hash mismatch");
                return Err(Error::HashMismatch);
            }
        }

        let hash = self.hash.as_ref().or_else(|| calculated_hash.as_ref());
        let calculated_mac = self.envelope.make_mac(
            self.mac_type,
            key,
            hash.map(|h| &h[..]),
            self.ext.as_deref(),
        )?;
        if calculated_mac != *header_mac {
            debug!("rejecting Hawk header: mac mismatch");
            return Err(Error::MacMismatch);
        }

        Ok(())
    }

    /// Like `verify`, but only reporting whether the header is valid.
    pub fn is_valid(&self, key: &Key) -> bool {
        self.verify(key).is_ok()
    }
}

impl Envelope {
    /// Create a `Server-Authorization` header value answering the request with this envelope.
    ///
    /// The payload hash is included when a content type is given.  Per the JS implementation,
    /// the header includes only `hash`, `ext`, and `mac`.
    pub fn server_authorization(
        &self,
        key: &Key,
        content_type: Option<&str>,
        content: &[u8],
        ext: Option<&str>,
    ) -> Result<String> {
        let hash = content_type
            .and_then(bare_content_type)
            .map(|ct| PayloadHasher::hash(ct, self.algorithm(), content));
        let mac = self.make_mac(MacType::Response, key, hash.as_deref(), ext)?;
        let header = Header::new(None, None, None, Some(mac), ext, hash)?;
        Ok(header.to_header_value())
    }
}
