//! Digest and HMAC primitives, selected by [`DigestAlgorithm`].
//!
//! The algorithm is chosen once, when a [`Key`](crate::Key) or request is created, and every
//! digest or MAC computed for that request uses it.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

mod ring;

pub(crate) use self::ring::{Hasher, HmacKey};

/// The digest algorithms supported for Hawk payload hashes and MACs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    /// SHA-1; 160-bit output.  Only for peers that cannot do better.
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// The lower-case name used by Hawk implementations to identify this algorithm.
    pub fn name(self) -> &'static str {
        match self {
            DigestAlgorithm::Sha1 => "sha1",
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha384 => "sha384",
            DigestAlgorithm::Sha512 => "sha512",
        }
    }

    /// Length of the digest in bytes.
    pub fn output_len(self) -> usize {
        self.ring_digest().output_len()
    }

    /// Compute a plain digest of `data`.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        let mut hasher = Hasher::new(self);
        hasher.update(data);
        hasher.finish()
    }

    /// Compute an HMAC of `data` under `key`, using this digest.
    pub fn mac(self, key: &[u8], data: &[u8]) -> Vec<u8> {
        HmacKey::new(self, key).sign(data)
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<DigestAlgorithm> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha1" => Ok(DigestAlgorithm::Sha1),
            "sha256" => Ok(DigestAlgorithm::Sha256),
            "sha384" => Ok(DigestAlgorithm::Sha384),
            "sha512" => Ok(DigestAlgorithm::Sha512),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}
