//! Resolve a `did:web` identifier to its DID Document.

use crate::did::{Did, Document};
use crate::error::ResolutionError;
use crate::provider::DocumentFetcher;

use super::WebOptions;

/// Convert the DID to an HTTP URL and use the provided fetcher to retrieve
/// its DID document.
///
/// # Errors
///
/// Every failure is reported as a [`ResolutionError`]: the DID is not a
/// `did:web` identifier or does not form a valid URL, the fetcher fails, the
/// response is not a DID document, or the document's `id` does not match the
/// DID.
pub async fn resolve(
    did: &Did, options: &WebOptions, fetcher: &impl DocumentFetcher,
) -> Result<Document, ResolutionError> {
    let url = did.to_web_http(options)?;

    let bytes = match fetcher.fetch(&url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Error fetching DID document from {url}: {e}");
            return Err(ResolutionError::with_cause(
                format!("failed to fetch DID document from {url}"),
                e,
            ));
        }
    };

    let doc: Document = serde_json::from_slice(&bytes).map_err(|e| {
        ResolutionError::with_cause(format!("invalid DID document at {url}"), e)
    })?;

    let expected = did.to_string();
    if doc.id != expected {
        tracing::trace!("DID document id {} does not match {expected}", doc.id);
        return Err(ResolutionError::new(format!(
            "DID document id {} does not match {expected}",
            doc.id
        )));
    }

    Ok(doc)
}
