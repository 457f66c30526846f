use crate::crypto::{DigestAlgorithm, HmacKey};
use std::fmt;

/// Hawk key.
///
/// While any sequence of bytes can be specified as a key, note that each digest algorithm has
/// a suggested key length, and that passwords should *not* be used as keys.  Keys of incorrect
/// length are handled according to the digest's implementation.
#[derive(Clone)]
pub struct Key {
    algorithm: DigestAlgorithm,
    key: HmacKey,
}

impl Key {
    pub fn new<B>(key: B, algorithm: DigestAlgorithm) -> Key
    where
        B: AsRef<[u8]>,
    {
        Key {
            algorithm,
            key: HmacKey::new(algorithm, key.as_ref()),
        }
    }

    /// The digest algorithm bound to this key.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub(crate) fn sign(&self, data: &[u8]) -> Vec<u8> {
        self.key.sign(data)
    }
}

// Never show key material, even in debug output.
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Key")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Hawk credentials: an ID and a key associated with that ID.  The digest algorithm
/// must be agreed between the server and the client, and the length of the key is
/// specific to that algorithm.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub id: String,
    pub key: Key,
}

impl Credentials {
    pub fn new<S, B>(id: S, key: B, algorithm: DigestAlgorithm) -> Credentials
    where
        S: Into<String>,
        B: AsRef<[u8]>,
    {
        Credentials {
            id: id.into(),
            key: Key::new(key, algorithm),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_sha256() {
        let key = Key::new(vec![77u8; 32], DigestAlgorithm::Sha256);
        assert_eq!(key.algorithm(), DigestAlgorithm::Sha256);
        assert_eq!(key.sign(b"data").len(), 32);
    }

    #[test]
    fn test_new_sha256_bad_length() {
        // HMAC accepts any key length; only the output length is fixed
        let key = Key::new(vec![0u8; 99], DigestAlgorithm::Sha256);
        assert_eq!(key.sign(b"data").len(), 32);
    }

    #[test]
    fn test_sign_matches_algorithm_mac() {
        let key = Key::new("no-secret", DigestAlgorithm::Sha1);
        assert_eq!(
            key.sign(b"data"),
            DigestAlgorithm::Sha1.mac(b"no-secret", b"data")
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let creds = Credentials::new("me", "sekrit-sekrit", DigestAlgorithm::Sha256);
        let dbg = format!("{:?}", creds);
        assert!(dbg.contains("me"));
        assert!(!dbg.contains("sekrit"));
    }
}
