use crate::b64;
use crate::error::*;
use crate::mac::{unix_secs, Mac};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Representation of a Hawk `Authorization` or `Server-Authorization` header value.
///
/// All fields are optional: a `Server-Authorization` header carries only `mac`, `hash` and
/// `ext`.  Formatting with `Display` does not include the `Hawk ` scheme prefix.
#[derive(Clone, PartialEq, Debug)]
pub struct Header {
    pub id: Option<String>,
    pub ts: Option<SystemTime>,
    pub nonce: Option<String>,
    pub mac: Option<Mac>,
    pub ext: Option<String>,
    pub hash: Option<Vec<u8>>,
}

impl Header {
    /// Create a new Header with the full set of Hawk fields.
    ///
    /// None of the header components can contain the character `\"`.  This function will
    /// return an error if any such characters appear.
    pub fn new<S>(
        id: Option<S>,
        ts: Option<SystemTime>,
        nonce: Option<S>,
        mac: Option<Mac>,
        ext: Option<S>,
        hash: Option<Vec<u8>>,
    ) -> Result<Header>
    where
        S: Into<String>,
    {
        Ok(Header {
            id: Header::check_component("id", id)?,
            ts,
            nonce: Header::check_component("nonce", nonce)?,
            mac,
            ext: Header::check_component("ext", ext)?,
            hash,
        })
    }

    /// Check a header component for validity.
    fn check_component<S>(name: &'static str, value: Option<S>) -> Result<Option<String>>
    where
        S: Into<String>,
    {
        match value {
            Some(value) => {
                let value = value.into();
                if value.contains('\"') {
                    return Err(Error::InvalidComponent(name));
                }
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Format the header for inclusion in an HTTP header, with the `Hawk ` scheme prefix.
    pub fn to_header_value(&self) -> String {
        format!("Hawk {}", self)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut sep = "";
        if let Some(ref id) = self.id {
            write!(f, "{}id=\"{}\"", sep, id)?;
            sep = ", ";
        }
        if let Some(ts) = self.ts {
            write!(f, "{}ts=\"{}\"", sep, unix_secs(ts))?;
            sep = ", ";
        }
        if let Some(ref nonce) = self.nonce {
            write!(f, "{}nonce=\"{}\"", sep, nonce)?;
            sep = ", ";
        }
        if let Some(ref hash) = self.hash {
            write!(f, "{}hash=\"{}\"", sep, b64::display(hash))?;
            sep = ", ";
        }
        if let Some(ref ext) = self.ext {
            write!(f, "{}ext=\"{}\"", sep, ext)?;
            sep = ", ";
        }
        if let Some(ref mac) = self.mac {
            write!(f, "{}mac=\"{}\"", sep, mac)?;
        }
        Ok(())
    }
}

impl FromStr for Header {
    type Err = Error;
    fn from_str(s: &str) -> Result<Header> {
        let mut p = s.trim_start();

        // The scheme is optional, so that values with or without it can be parsed
        if p.get(..5).map_or(false, |scheme| scheme.eq_ignore_ascii_case("hawk ")) {
            p = &p[5..];
        }

        let mut id: Option<&str> = None;
        let mut ts: Option<SystemTime> = None;
        let mut nonce: Option<&str> = None;
        let mut mac: Option<Vec<u8>> = None;
        let mut hash: Option<Vec<u8>> = None;
        let mut ext: Option<&str> = None;

        while !p.is_empty() {
            // Skip whitespace and commas used as separators
            p = p.trim_start_matches(|c: char| c == ',' || char::is_whitespace(c));
            if p.is_empty() {
                break;
            }
            // Find first '=' which delimits attribute name from value
            let assign_end = p
                .find('=')
                .ok_or_else(|| Error::HeaderParseError(format!("expected `=` in {:?}", p)))?;
            let attr = p[..assign_end].trim();
            p = p[assign_end + 1..].trim_start();
            if !p.starts_with('"') {
                return Err(Error::HeaderParseError(format!(
                    "value of `{}` is not quoted",
                    attr
                )));
            }
            p = &p[1..];
            // We have poor RFC 7235 compliance here as we ought to support backslash
            // escaped characters, but hawk doesn't allow this we won't either.  All
            // strings must be surrounded by ".." and contain no such characters.
            let end = p.find('"').ok_or_else(|| {
                Error::HeaderParseError(format!("unterminated value for `{}`", attr))
            })?;
            let val = &p[..end];
            match attr {
                "id" => id = Some(val),
                "ts" => {
                    let secs = u64::from_str(val).map_err(|_| {
                        Error::HeaderParseError(format!("invalid timestamp {:?}", val))
                    })?;
                    let when = UNIX_EPOCH.checked_add(Duration::from_secs(secs)).ok_or_else(|| {
                        Error::HeaderParseError(format!("timestamp {:?} out of range", val))
                    })?;
                    ts = Some(when);
                }
                "mac" => mac = Some(b64::decode(val)?),
                "nonce" => nonce = Some(val),
                "ext" => ext = Some(val),
                "hash" => hash = Some(b64::decode(val)?),
                // Unknown attributes (such as `app` and `dlg`) are not interpreted
                _ => {}
            };
            p = &p[end + 1..];
        }

        Ok(Header {
            id: id.map(str::to_string),
            ts,
            nonce: nonce.map(str::to_string),
            mac: mac.map(Mac::from),
            ext: ext.map(str::to_string),
            hash,
        })
    }
}
