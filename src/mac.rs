use crate::b64;
use crate::credentials::Key;
use std::fmt;
use std::ops::Deref;
use std::time::{SystemTime, UNIX_EPOCH};
use subtle::ConstantTimeEq;

/// The kind of MAC being calculated; this selects the first line of the canonical string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MacType {
    /// The MAC in an `Authorization` header.
    Header,
    /// The MAC in a `Server-Authorization` header.
    Response,
}

impl MacType {
    fn prefix(self) -> &'static [u8] {
        match self {
            MacType::Header => b"hawk.1.header",
            MacType::Response => b"hawk.1.response",
        }
    }
}

/// Seconds since the Unix epoch; times before the epoch are reported as zero.
pub(crate) fn unix_secs(ts: SystemTime) -> u64 {
    ts.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs()
}

/// Build the canonical string covered by a Hawk MAC.  Every field is followed by a newline
/// and included verbatim; absent `hash` and `ext` become empty lines.
#[allow(clippy::too_many_arguments)]
pub(crate) fn normalized_string(
    mac_type: MacType,
    ts: SystemTime,
    nonce: &str,
    method: &str,
    host: &str,
    port: u16,
    path: &str,
    hash: Option<&[u8]>,
    ext: Option<&str>,
) -> Vec<u8> {
    let mut buffer: Vec<u8> = Vec::with_capacity(128);
    let mut line = |field: &[u8]| {
        buffer.extend_from_slice(field);
        buffer.push(b'\n');
    };

    line(mac_type.prefix());
    line(unix_secs(ts).to_string().as_bytes());
    line(nonce.as_bytes());
    line(method.as_bytes());
    line(path.as_bytes());
    line(host.as_bytes());
    line(port.to_string().as_bytes());
    match hash {
        Some(h) => line(b64::encode(h).as_bytes()),
        None => line(b""),
    }
    line(ext.unwrap_or("").as_bytes());

    buffer
}

/// Mac represents a message authentication code, the signature in a Hawk transaction.
///
/// This class supports creating Macs using the Hawk specification, and comparing Macs
/// using a constant-time comparison (thus preventing timing side-channel attacks).
#[derive(Debug, Clone)]
pub struct Mac(Vec<u8>);

impl Mac {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mac_type: MacType,
        key: &Key,
        ts: SystemTime,
        nonce: &str,
        method: &str,
        host: &str,
        port: u16,
        path: &str,
        hash: Option<&[u8]>,
        ext: Option<&str>,
    ) -> Mac {
        let normalized =
            normalized_string(mac_type, ts, nonce, method, host, port, path, hash, ext);
        Mac(key.sign(&normalized))
    }
}

impl From<Vec<u8>> for Mac {
    fn from(original: Vec<u8>) -> Self {
        Mac(original)
    }
}

impl AsRef<[u8]> for Mac {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl Deref for Mac {
    type Target = Vec<u8>;
    fn deref(&self) -> &Vec<u8> {
        &self.0
    }
}

/// Formats as standard, padded base64, as it appears in headers.
impl fmt::Display for Mac {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", b64::display(&self.0))
    }
}

impl PartialEq for Mac {
    fn eq(&self, other: &Mac) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}
