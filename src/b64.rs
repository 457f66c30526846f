//! This module contains basic base64 functionality as used in Hawk.

use base64::display::Base64Display;

/// Hawk hashes and MACs are encoded with the standard alphabet, including padding.
pub(crate) const STANDARD: base64::Config = base64::STANDARD;

pub(crate) fn encode(bytes: &[u8]) -> String {
    base64::encode_config(bytes, STANDARD)
}

pub(crate) fn decode(value: &str) -> Result<Vec<u8>, base64::DecodeError> {
    base64::decode_config(value, STANDARD)
}

/// Format bytes as base64 without an intermediate allocation.
pub(crate) fn display(bytes: &[u8]) -> Base64Display<'_> {
    Base64Display::with_config(bytes, STANDARD)
}
