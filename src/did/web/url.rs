//! Conversion between `did:web` identifiers and HTTP URLs.

use std::fmt::Write;

use url::{Host, Url};

use super::{METHOD, WebOptions};
use crate::did::Did;
use crate::error::Error;

const WELL_KNOWN_DID_JSON: &str = "/.well-known/did.json";
const PATH_DID_JSON: &str = "/did.json";

impl Did {
    /// Convert a `did:web` identifier to the URL of its DID document.
    ///
    /// `did:web:example.com` resolves to
    /// `https://example.com/.well-known/did.json` while an identifier with
    /// path segments, `did:web:example.com:user:alice`, resolves to
    /// `https://example.com/user/alice/did.json`. A port is carried as `%3A`
    /// in the identifier: `did:web:example.com%3A3000`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDidMethod`] if the method is not `web` and
    /// [`Error::UrlConstruction`] if the result is not a valid URL.
    pub fn to_web_http(&self, options: &WebOptions) -> Result<Url, Error> {
        if self.method() != METHOD {
            return Err(Error::UnsupportedDidMethod(self.method().to_string()));
        }

        let id = self.method_specific_id();
        let contains_path = id.contains(':');

        // Separators become slashes first so an escaped port colon is not
        // turned into a path separator.
        let host_and_path = id.replace(':', "/").replace("%3A", ":");

        let mut url = format!("{}://{host_and_path}", options.scheme());
        url.push_str(if contains_path { PATH_DID_JSON } else { WELL_KNOWN_DID_JSON });

        let url = Url::parse(&url)?;
        tracing::debug!(did = %self, %url, "built did:web document URL");
        Ok(url)
    }
}

/// Convert a `did:web` identifier to the URL of its DID document.
///
/// # Errors
///
/// See [`Did::to_web_http`].
pub fn resolve_url(did: &Did, enforce_https: bool) -> Result<Url, Error> {
    did.to_web_http(&WebOptions { enforce_https })
}

/// Convert an HTTP URL into a host and path separated by colons suitable
/// for use as a `did:web` method-specific identifier.
///
/// Valid examples:
/// - `https://example.com`
/// - `http://example.com/custom/path/`
/// - `https://example.com:8080`
///
/// # Errors
///
/// Will return an error if the url is not a valid URL, a host cannot be
/// parsed or the host is an IPv6 address. An IPv6 address has no
/// representation in a `did:web` identifier.
pub fn parse_url(url: &str) -> Result<String, Error> {
    let url = Url::parse(url)?;
    let mut host = match url.host() {
        Some(Host::Domain(domain)) => domain.to_string(),
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => {
            return Err(Error::MalformedDid(format!("IPv6 host {addr} is not supported")));
        }
        None => return Err(Error::MalformedDid(format!("no host in url {url}"))),
    };
    if let Some(port) = url.port() {
        let _ = write!(host, "%3A{port}");
    }
    if let Some(path) = url.path().strip_prefix('/') {
        let path = path.trim_end_matches('/');
        if !path.is_empty() {
            let _ = write!(host, ":{}", path.replace('/', ":"));
        }
    }
    Ok(host)
}

/// Construct a `did:web` DID from an HTTP URL.
///
/// # Errors
///
/// Will return an error if the url is not a valid URL or a host cannot be
/// parsed.
pub fn default_did(url: &str) -> Result<Did, Error> {
    let host_and_path = parse_url(url)?;
    format!("did:{METHOD}:{host_and_path}").parse()
}
