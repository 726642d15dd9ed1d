//! # Canonicalization
//!
//! Turns a credential into the exact byte sequence that is hashed and signed.
//! The embedded `proof` is always removed first so a signer and a verifier
//! reconstruct the same bytes whether or not a proof is attached.
//!
//! Normalization itself is a capability ([`RdfNormalizer`]). The built-in
//! [`Rdfc10`] normalizer expands the document as JSON-LD, converts it to an
//! RDF dataset and serializes the dataset as canonical N-Quads using
//! [RDF Dataset Canonicalization](https://www.w3.org/TR/rdf-canon/).

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use anyhow::{anyhow, bail};
use serde_json::Value;
use sha2::{Digest, Sha256};
use sophia_api::parser::QuadParser;
use sophia_api::source::QuadSource;
use sophia_c14n::rdfc10;
use sophia_inmem::dataset::LightDataset;
use sophia_jsonld::JsonLdParser;

use crate::credential::{BASE_CONTEXT, VerifiableCredential};
use crate::did;
use crate::error::Error;

/// Member holding an embedded proof.
const PROOF: &str = "proof";

/// Remote contexts may reference further contexts, but not without bound.
const MAX_CONTEXT_DEPTH: usize = 8;

/// Context documents available without a network fetch.
const BUNDLED_CONTEXTS: [(&str, &str); 2] =
    [(BASE_CONTEXT, ssi_contexts::CREDENTIALS_V1), (did::CONTEXT, ssi_contexts::DID_V1)];

/// Deterministic normalization of a JSON-LD document.
///
/// Implementations must produce identical output for documents that are
/// equivalent under their algorithm, and must not retain state between calls
/// so that normalization can run on any worker thread.
pub trait RdfNormalizer: Send + Sync {
    /// Normalize the document into its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be expanded or normalized.
    fn normalize(&self, document: &Value) -> anyhow::Result<String>;
}

/// RDFC-1.0 normalizer producing canonical N-Quads.
///
/// Remote contexts are never fetched. The W3C credentials v1 and DID v1
/// contexts are bundled; others are registered with
/// [`Rdfc10::with_context`]. A document referencing any other context cannot
/// be expanded and is rejected.
#[derive(Clone, Debug)]
pub struct Rdfc10 {
    contexts: HashMap<String, Value>,
}

impl Default for Rdfc10 {
    fn default() -> Self {
        Self::new()
    }
}

impl Rdfc10 {
    /// Create a normalizer with the bundled contexts.
    #[must_use]
    pub fn new() -> Self {
        let mut contexts = HashMap::new();
        for (url, document) in BUNDLED_CONTEXTS {
            match serde_json::from_str::<Value>(document) {
                Ok(document) => {
                    contexts.insert(url.to_string(), context_of(document));
                }
                Err(e) => tracing::warn!("skipping bundled context {url}: {e}"),
            }
        }
        Self { contexts }
    }

    /// Make the context document served at `url` available to expansion.
    ///
    /// `document` is the full JSON-LD document, i.e. an object with an
    /// `@context` member.
    #[must_use]
    pub fn with_context(mut self, url: impl Into<String>, document: Value) -> Self {
        self.contexts.insert(url.into(), context_of(document));
        self
    }

    // Replace every context reference in the document with its definition.
    fn inline_contexts(&self, value: &mut Value, depth: usize) -> anyhow::Result<()> {
        match value {
            Value::Object(members) => {
                for (key, member) in members.iter_mut() {
                    if key == "@context" {
                        self.resolve_context(member, depth)?;
                    } else {
                        self.inline_contexts(member, depth)?;
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.inline_contexts(item, depth)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn resolve_context(&self, context: &mut Value, depth: usize) -> anyhow::Result<()> {
        if depth > MAX_CONTEXT_DEPTH {
            bail!("contexts nested more than {MAX_CONTEXT_DEPTH} levels deep");
        }

        match context {
            Value::String(url) => {
                let Some(resolved) = self.contexts.get(url.as_str()) else {
                    bail!("context {url} is not available");
                };
                let mut resolved = resolved.clone();
                self.resolve_context(&mut resolved, depth + 1)?;
                *context = resolved;
            }
            Value::Array(entries) => {
                let mut flattened = Vec::with_capacity(entries.len());
                for mut entry in entries.drain(..) {
                    self.resolve_context(&mut entry, depth)?;
                    match entry {
                        Value::Array(nested) => flattened.extend(nested),
                        other => flattened.push(other),
                    }
                }
                *entries = flattened;
            }
            // scoped contexts of term definitions
            Value::Object(definitions) => {
                for definition in definitions.values_mut() {
                    if let Value::Object(term) = definition {
                        if let Some(scoped) = term.get_mut("@context") {
                            self.resolve_context(scoped, depth + 1)?;
                        }
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl RdfNormalizer for Rdfc10 {
    fn normalize(&self, document: &Value) -> anyhow::Result<String> {
        if !document.is_object() {
            bail!("document is not a JSON object");
        }
        match document.get("@context") {
            None | Some(Value::Null) => bail!("document has no @context"),
            Some(Value::Array(entries)) if entries.is_empty() => {
                bail!("document has an empty @context");
            }
            Some(_) => {}
        }

        let mut local = document.clone();
        self.inline_contexts(&mut local, 0)?;
        let json = serde_json::to_string(&local)?;

        let dataset: LightDataset = JsonLdParser::new()
            .parse(json.as_bytes())
            .collect_quads()
            .map_err(|e| anyhow!("document cannot be expanded: {e}"))?;

        let mut nquads = Vec::new();
        rdfc10::normalize(&dataset, &mut nquads)
            .map_err(|e| anyhow!("issue normalizing dataset: {e}"))?;
        if nquads.is_empty() {
            bail!("document expands to an empty dataset");
        }
        Ok(String::from_utf8(nquads)?)
    }
}

// The context definition held by a context document.
fn context_of(document: Value) -> Value {
    match document {
        Value::Object(mut members) => match members.remove("@context") {
            Some(context) => context,
            None => Value::Object(members),
        },
        other => other,
    }
}

/// Canonical form of a credential, ready for hashing and signing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalForm(String);

impl CanonicalForm {
    /// The canonical string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The canonical bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// SHA-256 digest of the canonical bytes.
    #[must_use]
    pub fn digest(&self) -> [u8; 32] {
        Sha256::digest(self.as_bytes()).into()
    }
}

impl AsRef<[u8]> for CanonicalForm {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Display for CanonicalForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonicalize a credential, excluding any embedded proof.
///
/// The credential is serialized to JSON first; a deserialized credential
/// serializes back to the JSON it was read from.
///
/// # Errors
///
/// Returns [`Error::Canonicalization`] if the credential cannot be
/// serialized or normalized.
pub fn canonicalize(
    vc: &VerifiableCredential, normalizer: &impl RdfNormalizer,
) -> Result<CanonicalForm, Error> {
    let document = serde_json::to_value(vc)
        .map_err(|e| Error::Canonicalization(format!("issue serializing credential: {e}")))?;
    canonicalize_value(&document, normalizer)
}

/// Canonicalize an arbitrary JSON credential, excluding its top-level `proof`
/// member.
///
/// # Errors
///
/// Returns [`Error::Canonicalization`] if the document cannot be expanded or
/// normalized.
pub fn canonicalize_value(
    document: &Value, normalizer: &impl RdfNormalizer,
) -> Result<CanonicalForm, Error> {
    let stripped = without_proof(document);
    let canonical =
        normalizer.normalize(&stripped).map_err(|e| Error::Canonicalization(format!("{e:#}")))?;
    tracing::trace!(len = canonical.len(), "canonicalized document");
    Ok(CanonicalForm(canonical))
}

/// A copy of the document with its top-level `proof` member removed.
pub(crate) fn without_proof(document: &Value) -> Value {
    let mut stripped = document.clone();
    if let Value::Object(members) = &mut stripped {
        members.remove(PROOF);
    }
    stripped
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const VOCAB: &str = "https://example.org/vocab#";

    #[test]
    fn canonical_nquads() {
        let doc = json!({
            "@context": {"@vocab": VOCAB},
            "@id": "https://example.org/alice",
            "name": "Alice"
        });
        let canonical = canonicalize_value(&doc, &Rdfc10::new()).expect("should canonicalize");
        assert_eq!(
            canonical.as_str(),
            "<https://example.org/alice> <https://example.org/vocab#name> \"Alice\" .\n"
        );
    }

    // Blank nodes get canonical labels regardless of input order.
    #[test]
    fn blank_nodes() {
        let a = json!({
            "@context": {"@vocab": VOCAB},
            "knows": [{"name": "Bob"}, {"name": "Carol"}]
        });
        let b = json!({
            "knows": [{"name": "Carol"}, {"name": "Bob"}],
            "@context": {"@vocab": VOCAB}
        });
        let normalizer = Rdfc10::new();
        let a = canonicalize_value(&a, &normalizer).expect("should canonicalize");
        let b = canonicalize_value(&b, &normalizer).expect("should canonicalize");
        assert_eq!(a, b);
        assert!(a.as_str().contains("_:c14n0"));
    }

    #[test]
    fn bundled_credentials_context() {
        let doc = json!({
            "@context": [BASE_CONTEXT, {"@vocab": VOCAB}],
            "type": ["VerifiableCredential"],
            "issuer": "did:web:issuer.example",
            "issuanceDate": "2010-01-01T19:23:24Z",
            "credentialSubject": {"id": "did:web:holder.example", "name": "Alice"}
        });
        let canonical = canonicalize_value(&doc, &Rdfc10::new()).expect("should canonicalize");
        let nquads = canonical.as_str();
        assert!(nquads.contains("<https://www.w3.org/2018/credentials#issuer> <did:web:issuer.example>"));
        assert!(nquads.contains(
            "\"2010-01-01T19:23:24Z\"^^<http://www.w3.org/2001/XMLSchema#dateTime>"
        ));
        assert!(nquads.contains("<did:web:holder.example> <https://example.org/vocab#name> \"Alice\""));
    }

    #[test]
    fn registered_context() {
        let normalizer = Rdfc10::new().with_context(
            "https://example.org/contexts/v1",
            json!({"@context": {"name": "https://schema.org/name"}}),
        );
        let doc = json!({
            "@context": "https://example.org/contexts/v1",
            "@id": "https://example.org/alice",
            "name": "Alice"
        });
        let canonical = canonicalize_value(&doc, &normalizer).expect("should canonicalize");
        assert_eq!(
            canonical.as_str(),
            "<https://example.org/alice> <https://schema.org/name> \"Alice\" .\n"
        );
    }

    #[test]
    fn proof_removed() {
        let doc = json!({"@context": {"@vocab": VOCAB}, "name": "Alice"});
        let mut with_proof = doc.clone();
        with_proof["proof"] = json!({"type": "foo"});

        let a = canonicalize_value(&doc, &Rdfc10::new()).expect("should canonicalize");
        let b = canonicalize_value(&with_proof, &Rdfc10::new()).expect("should canonicalize");
        assert_eq!(a, b);
        assert!(!b.as_str().contains("proof"));
    }

    #[test]
    fn nested_proof_kept() {
        let doc = json!({
            "@context": {"@vocab": VOCAB},
            "credentialSubject": {"proof": "of age"}
        });
        let canonical = canonicalize_value(&doc, &Rdfc10::new()).expect("should canonicalize");
        assert!(canonical.as_str().contains("<https://example.org/vocab#proof> \"of age\""));
    }

    #[test]
    fn not_expandable() {
        let cases = [
            json!("just a string"),
            json!({"issuer": "did:web:a"}),
            json!({"@context": [], "issuer": "did:web:a"}),
            json!({"@context": "credentials-v1", "issuer": "did:web:a"}),
            json!({"@context": "https://example.org/unknown/v1", "issuer": "did:web:a"}),
            json!({"@context": [42], "issuer": "did:web:a"}),
            json!({"@context": {"@vocab": VOCAB}}),
        ];
        for doc in cases {
            let err = canonicalize_value(&doc, &Rdfc10::new()).expect_err("should fail");
            assert!(matches!(err, Error::Canonicalization(_)), "{doc}: {err}");
        }
    }

    #[test]
    fn digest_is_sha256() {
        let doc = json!({"@context": {"@vocab": VOCAB}, "name": "Alice"});
        let canonical = canonicalize_value(&doc, &Rdfc10::new()).expect("should canonicalize");
        let expected: [u8; 32] = Sha256::digest(canonical.as_bytes()).into();
        assert_eq!(canonical.digest(), expected);
    }
}
