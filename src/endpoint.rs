use crate::error::*;
use std::fmt;
use std::str::FromStr;
use url::{Position, Url};

/// The URL schemes a request can be sent over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        })
    }
}

/// An absolute URL split into the parts that Hawk signs: host, port, and the path with query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    scheme: Scheme,
    host: String,
    port: u16,
    uri: String,
}

impl Endpoint {
    /// Decompose `scheme://host[:port][/path]`.  Only `http` and `https` are accepted; a
    /// missing port is filled in from the scheme.
    pub fn parse(input: &str) -> Result<Endpoint> {
        let url =
            Url::parse(input).map_err(|e| Error::MalformedUrl(format!("{}: {}", input, e)))?;

        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => return Err(Error::UnsupportedScheme(other.to_string())),
        };
        let host = url
            .host_str()
            .ok_or_else(|| Error::MalformedUrl(format!("{} has no host", input)))?;
        let port = url.port().unwrap_or_else(|| scheme.default_port());
        let uri = &url[Position::BeforePath..Position::AfterQuery];

        Ok(Endpoint {
            scheme,
            host: host.to_string(),
            port,
            uri: uri.to_string(),
        })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The path and query of the URL, as it is signed.
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl FromStr for Endpoint {
    type Err = Error;
    fn from_str(s: &str) -> Result<Endpoint> {
        Endpoint::parse(s)
    }
}
