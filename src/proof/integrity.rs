//! # Data Integrity Proofs
//!
//! Embedded proofs using the `eddsa-jcs-2022` cryptosuite. The cryptosuite
//! canonicalizes with JCS (RFC 8785) by definition, independent of any
//! [`RdfNormalizer`](super::RdfNormalizer). The signed payload is the SHA-256
//! hash of the JCS proof configuration followed by the SHA-256 hash of the JCS
//! credential without its `proof`.
//!
//! The `*_value` functions operate on the credential JSON exactly as received,
//! so members the typed model does not know about are still covered by the
//! signature.

use chrono::{SecondsFormat, Utc};
use ed25519_dalek::{Signature, Signer as _, SigningKey, VerifyingKey};
use multibase::Base;
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::Proof;
use super::canonical::without_proof;
use crate::credential::VerifiableCredential;
use crate::error::Error;

/// Proof type of an embedded Data Integrity proof.
pub const PROOF_TYPE: &str = "DataIntegrityProof";

/// Cryptosuite used for signing.
pub const CRYPTOSUITE: &str = "eddsa-jcs-2022";

/// Proof purpose used when issuing credentials.
pub const ASSERTION_METHOD: &str = "assertionMethod";

const CONTEXT: &str = "@context";
const PROOF: &str = "proof";
const PROOF_VALUE: &str = "proofValue";

/// Produces signatures over a proof payload.
pub trait ProofSigner {
    /// Sign the payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the signing key is unavailable.
    fn try_sign(&self, msg: &[u8]) -> anyhow::Result<Vec<u8>>;

    /// The verification method a verifier should use, typically a DID URL
    /// with a key fragment.
    fn verification_method(&self) -> String;
}

/// Verifies signatures over a proof payload.
pub trait ProofVerifier {
    /// Verify the signature over the payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature does not verify.
    fn verify_signature(&self, msg: &[u8], signature: &[u8]) -> anyhow::Result<()>;
}

/// Ed25519 signer bound to a verification method.
#[derive(Clone, Debug)]
pub struct Ed25519Signer {
    signing_key: SigningKey,
    verification_method: String,
}

impl Ed25519Signer {
    /// Create a signer.
    #[must_use]
    pub fn new(signing_key: SigningKey, verification_method: impl Into<String>) -> Self {
        Self {
            signing_key,
            verification_method: verification_method.into(),
        }
    }

    /// The public key matching this signer.
    #[must_use]
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }
}

impl ProofSigner for Ed25519Signer {
    fn try_sign(&self, msg: &[u8]) -> anyhow::Result<Vec<u8>> {
        Ok(self.signing_key.sign(msg).to_bytes().to_vec())
    }

    fn verification_method(&self) -> String {
        self.verification_method.clone()
    }
}

impl ProofVerifier for VerifyingKey {
    fn verify_signature(&self, msg: &[u8], signature: &[u8]) -> anyhow::Result<()> {
        let signature = Signature::from_slice(signature)?;
        self.verify_strict(msg, &signature)?;
        Ok(())
    }
}

/// Create a proof for the credential. Any proof already attached is ignored.
///
/// The returned proof is not attached; set it on the credential to issue it.
///
/// # Errors
///
/// Returns [`Error::Canonicalization`] if the credential cannot be
/// serialized and [`Error::InvalidProof`] if signing fails.
pub fn sign(vc: &VerifiableCredential, signer: &impl ProofSigner) -> Result<Proof, Error> {
    let document = serde_json::to_value(vc)
        .map_err(|e| Error::Canonicalization(format!("issue serializing credential: {e}")))?;
    sign_value(&document, signer)
}

/// Create a proof for a credential held as JSON.
///
/// The proof configuration takes the credential's `@context`.
///
/// # Errors
///
/// Returns [`Error::Canonicalization`] if the credential cannot be
/// canonicalized and [`Error::InvalidProof`] if signing fails.
pub fn sign_value(document: &Value, signer: &impl ProofSigner) -> Result<Proof, Error> {
    let unsecured = without_proof(document);

    let mut proof = Proof {
        type_: PROOF_TYPE.to_string(),
        cryptosuite: Some(CRYPTOSUITE.to_string()),
        proof_purpose: ASSERTION_METHOD.to_string(),
        verification_method: signer.verification_method(),
        created: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        ..Proof::default()
    };
    if let Some(context) = unsecured.get(CONTEXT) {
        proof.additional.insert(CONTEXT.to_string(), context.clone());
    }

    let config = serde_json::to_value(&proof)
        .map_err(|e| Error::Canonicalization(format!("issue serializing proof config: {e}")))?;
    let payload = payload(&config, &unsecured)?;
    let signature = signer
        .try_sign(&payload)
        .map_err(|e| Error::InvalidProof(format!("issue signing credential: {e}")))?;
    proof.proof_value = Some(multibase::encode(Base::Base58Btc, signature));

    Ok(proof)
}

/// Verify the proof embedded in the credential.
///
/// # Errors
///
/// See [`verify_value`].
pub fn verify(vc: &VerifiableCredential, verifier: &impl ProofVerifier) -> Result<(), Error> {
    let document = serde_json::to_value(vc)
        .map_err(|e| Error::Canonicalization(format!("issue serializing credential: {e}")))?;
    verify_value(&document, verifier)
}

/// Verify the proof embedded in a credential held as JSON.
///
/// # Errors
///
/// Returns [`Error::InvalidProof`] if the proof is missing, uses an
/// unsupported type, cryptosuite or purpose, or the signature does not
/// verify. Returns [`Error::Canonicalization`] if the credential cannot be
/// canonicalized.
pub fn verify_value(document: &Value, verifier: &impl ProofVerifier) -> Result<(), Error> {
    let Some(raw_proof) = document.get(PROOF) else {
        return Err(Error::InvalidProof("credential has no proof".to_string()));
    };
    let proof: Proof = serde_json::from_value(raw_proof.clone())
        .map_err(|e| Error::InvalidProof(format!("issue deserializing proof: {e}")))?;

    if proof.type_ != PROOF_TYPE {
        return Err(Error::InvalidProof(format!(
            "unsupported proof type {} - must be '{PROOF_TYPE}'",
            proof.type_
        )));
    }
    if proof.cryptosuite.as_deref() != Some(CRYPTOSUITE) {
        return Err(Error::InvalidProof(format!(
            "unsupported cryptosuite {} - must be '{CRYPTOSUITE}'",
            proof.cryptosuite.as_deref().unwrap_or("")
        )));
    }
    if proof.proof_purpose != ASSERTION_METHOD && proof.proof_purpose != "authentication" {
        return Err(Error::InvalidProof(format!(
            "unsupported proof purpose {}",
            proof.proof_purpose
        )));
    }
    let Some(proof_value) = &proof.proof_value else {
        return Err(Error::InvalidProof("proof value is missing".to_string()));
    };
    let (base, signature) = multibase::decode(proof_value)
        .map_err(|e| Error::InvalidProof(format!("issue decoding proof value: {e}")))?;
    if base != Base::Base58Btc {
        return Err(Error::InvalidProof("unsupported multibase encoding".to_string()));
    }

    // the credential context must begin with the proof context
    if let Some(proof_context) = proof.additional.get(CONTEXT) {
        let expected = as_list(proof_context);
        let actual = document.get(CONTEXT).map(as_list).unwrap_or_default();
        if !actual.starts_with(&expected) {
            return Err(Error::InvalidProof(
                "proof context does not match credential context".to_string(),
            ));
        }
    }

    // proof configuration is the proof exactly as received, less its value
    let mut config = raw_proof.clone();
    if let Value::Object(members) = &mut config {
        members.remove(PROOF_VALUE);
    }

    let payload = payload(&config, &without_proof(document))?;
    verifier
        .verify_signature(&payload, &signature)
        .map_err(|e| Error::InvalidProof(format!("signature verification failed: {e}")))
}

fn as_list(context: &Value) -> Vec<Value> {
    match context {
        Value::Array(entries) => entries.clone(),
        other => vec![other.clone()],
    }
}

// SHA-256(JCS(proof config)) || SHA-256(JCS(credential))
fn payload(config: &Value, unsecured: &Value) -> Result<Vec<u8>, Error> {
    let config_hash = Sha256::digest(jcs(config, "proof config")?);
    let document_hash = Sha256::digest(jcs(unsecured, "credential")?);
    Ok([config_hash.as_slice(), document_hash.as_slice()].concat())
}

fn jcs(value: &Value, what: &str) -> Result<String, Error> {
    serde_json_canonicalizer::to_string(value)
        .map_err(|e| Error::Canonicalization(format!("issue canonicalizing {what}: {e}")))
}
