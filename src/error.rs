use crate::crypto::DigestAlgorithm;
use failure::Fail;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Fail, Debug)]
pub enum Error {
    #[fail(display = "Missing required field `{}`", _0)]
    MissingField(&'static str),

    #[fail(display = "Unsupported URL scheme `{}`", _0)]
    UnsupportedScheme(String),

    #[fail(display = "Malformed URL: {}", _0)]
    MalformedUrl(String),

    #[fail(display = "Request MAC has already been calculated")]
    AlreadyFinalized,

    #[fail(display = "Payload hash does not match the received content")]
    HashMismatch,

    #[fail(display = "MAC does not match")]
    MacMismatch,

    #[fail(display = "Unparseable Hawk header: {}", _0)]
    HeaderParseError(String),

    #[fail(display = "Hawk header component `{}` cannot contain `\"`", _0)]
    InvalidComponent(&'static str),

    #[fail(display = "Key uses {} but the request uses {}", _0, _1)]
    AlgorithmMismatch(DigestAlgorithm, DigestAlgorithm),

    #[fail(display = "Unsupported digest algorithm `{}`", _0)]
    UnsupportedAlgorithm(String),

    #[fail(display = "Nonce length {} exceeds the maximum of {}", _0, _1)]
    NonceTooLong(usize, usize),

    #[fail(display = "Payload exceeds the maximum of {} bytes", _0)]
    PayloadTooLarge(u64),

    #[fail(display = "{}", _0)]
    Io(#[fail(cause)] std::io::Error),

    #[fail(display = "Base64 Decode error: {}", _0)]
    Decode(#[fail(cause)] base64::DecodeError),

    #[fail(display = "{}", _0)]
    Http(#[fail(cause)] http::Error),
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::Decode(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Self {
        Error::Http(e)
    }
}
