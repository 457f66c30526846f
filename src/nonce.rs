//! Random nonces for signed requests.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Bits needed to index `ALPHABET`.
const INDEX_BITS: u32 = 6;
const INDEX_MASK: u64 = (1 << INDEX_BITS) - 1;
/// Number of whole indices in one `u64` draw.
const INDICES_PER_DRAW: u32 = 64 / INDEX_BITS;

/// Generates alphanumeric nonces from a cryptographically secure random source.
///
/// Each generator owns its random source, so generators on different threads never share
/// state.  The default source is the operating system's RNG.
///
/// Characters are drawn uniformly: each 6-bit group of a random word selects a character, and
/// groups that fall past the end of the 62-character alphabet are discarded rather than
/// reduced modulo the alphabet size.
#[derive(Debug, Default)]
pub struct NonceGenerator<R = OsRng> {
    rng: R,
}

impl NonceGenerator<OsRng> {
    pub fn new() -> Self {
        NonceGenerator { rng: OsRng }
    }
}

impl<R> NonceGenerator<R>
where
    R: RngCore + CryptoRng,
{
    /// Create a generator drawing from the given random source.
    pub fn with_rng(rng: R) -> Self {
        NonceGenerator { rng }
    }

    /// Generate a nonce of exactly `len` characters.
    pub fn generate(&mut self, len: usize) -> String {
        let mut nonce = String::with_capacity(len);
        let mut cache = 0u64;
        let mut remain = 0;
        while nonce.len() < len {
            if remain == 0 {
                cache = self.rng.next_u64();
                remain = INDICES_PER_DRAW;
            }
            let idx = (cache & INDEX_MASK) as usize;
            if idx < ALPHABET.len() {
                nonce.push(ALPHABET[idx] as char);
            }
            cache >>= INDEX_BITS;
            remain -= 1;
        }
        nonce
    }
}

/// Generate a nonce of `len` characters using the operating system's RNG.
pub fn generate_nonce(len: usize) -> String {
    NonceGenerator::new().generate(len)
}
