use crate::crypto::{DigestAlgorithm, Hasher};

/// A utility for hashing payloads. Feed your entity body to this, then pass the `finish`
/// result to a request or response.
///
/// The hash covers the canonical payload string
/// `hawk.1.payload\n<content-type>\n<content>\n`, with the content included verbatim.
pub struct PayloadHasher {
    hasher: Hasher,
}

impl PayloadHasher {
    /// Create a new PayloadHasher. The `content_type` should not include parameters. The digest
    /// must be the same as the digest used for the credentials in the request.
    pub fn new(content_type: &str, algorithm: DigestAlgorithm) -> Self {
        let mut hasher = PayloadHasher {
            hasher: Hasher::new(algorithm),
        };
        hasher.update(b"hawk.1.payload\n");
        hasher.update(content_type.as_bytes());
        hasher.update(b"\n");
        hasher
    }

    /// Hash a single value and return it
    pub fn hash<B>(content_type: &str, algorithm: DigestAlgorithm, payload: B) -> Vec<u8>
    where
        B: AsRef<[u8]>,
    {
        let mut hasher = PayloadHasher::new(content_type, algorithm);
        hasher.update(payload);
        hasher.finish()
    }

    /// Update the hash with new data.
    pub fn update<B>(&mut self, data: B)
    where
        B: AsRef<[u8]>,
    {
        self.hasher.update(data.as_ref());
    }

    /// Finish hashing and return the result
    pub fn finish(mut self) -> Vec<u8> {
        self.update(b"\n");
        self.hasher.finish()
    }
}
