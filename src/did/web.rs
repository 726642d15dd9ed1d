//! # DID Web
//!
//! The `did:web` method uses a web domain's reputation to confer trust. A
//! `did:web` identifier is resolved by building the HTTPS URL of its DID
//! document and fetching that document.
//!
//! See:
//!
//! - <https://w3c-ccg.github.io/did-method-web>
//! - <https://w3c.github.io/did-resolution>

mod resolve;
mod url;

use serde::{Deserialize, Serialize};

pub use self::resolve::*;
pub use self::url::*;

/// Method name for `did:web`.
pub const METHOD: &str = "web";

/// Options controlling how a `did:web` identifier is turned into a URL.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct WebOptions {
    /// Use `https://` when true (the default), `http://` otherwise.
    pub enforce_https: bool,
}

impl Default for WebOptions {
    fn default() -> Self {
        Self { enforce_https: true }
    }
}

impl WebOptions {
    /// Options that build plain `http://` URLs. Intended for local testing.
    #[must_use]
    pub const fn insecure() -> Self {
        Self { enforce_https: false }
    }

    const fn scheme(self) -> &'static str {
        if self.enforce_https { "https" } else { "http" }
    }
}
