//! # Provider Traits
//!
//! Capabilities supplied by the caller. The core builds URLs and canonical
//! forms; transport and structural validation are left to implementers.

use std::future::Future;

use anyhow::Result;
use serde_json::Value;
use url::Url;

/// [`DocumentFetcher`] is used to proxy the retrieval of a DID document.
///
/// Implementers need only return the raw bytes found at the URL. This may be
/// by making an HTTP request, looking up a local cache, or reading a fixture.
/// Timeout, retry and cancellation policy belong to the implementer.
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the document at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or an unsuccessful HTTP status.
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Structural validation of a JSON-LD document.
///
/// Invoked by callers before or after canonicalization. Nothing in this crate
/// calls it.
pub trait JsonLdValidator {
    /// Returns `true` if the document is structurally valid.
    fn validate(&self, document: &Value) -> bool;
}

impl<F> JsonLdValidator for F
where
    F: Fn(&Value) -> bool,
{
    fn validate(&self, document: &Value) -> bool {
        self(document)
    }
}
