//! # DID Document
//!
//! A DID Document is a JSON-LD document that contains information related to a
//! DID.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{Kind, OneMany};
use crate::key::MultibaseKey;

/// Base context of a DID document.
pub const CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// DID Document
///
/// Members not modelled here are retained in `additional` so a resolved
/// document round-trips unchanged.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// The context of the DID document.
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<OneMany<Kind<Map<String, Value>>>>,

    /// The DID for a particular DID subject.
    pub id: String,

    /// One or more DIDs that control the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<OneMany<String>>,

    /// If set, MUST be a set of verification methods for the DID subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<Vec<VerificationMethod>>,

    /// The `assertion_method` verification relationship is used to specify how
    /// the DID subject is expected to express claims, such as for the
    /// purposes of issuing a Verifiable Credential.
    ///
    /// <https://www.w3.org/TR/did-core/#assertion>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion_method: Option<Vec<Kind<VerificationMethod>>>,

    /// Any other document members.
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl Document {
    /// Find a verification method by its id.
    ///
    /// The id may be absolute (`did:web:example.com#key-0`) or relative to
    /// the document (`#key-0`).
    #[must_use]
    pub fn verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        let absolute =
            if id.starts_with('#') { format!("{}{id}", self.id) } else { id.to_string() };
        let embedded = self
            .assertion_method
            .iter()
            .flatten()
            .filter_map(|k| match k {
                Kind::Object(vm) => Some(vm),
                Kind::String(_) => None,
            });
        self.verification_method
            .iter()
            .flatten()
            .chain(embedded)
            .find(|vm| vm.id == absolute || vm.id == id)
    }
}

/// A verification method, such as a public key, that can be used to verify a
/// proof created by the DID subject.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// A DID URL that identifies the verification method.
    pub id: String,

    /// The verification method type, for example `Multikey` or
    /// `Ed25519VerificationKey2020`.
    #[serde(rename = "type")]
    pub type_: String,

    /// The DID of the controller of the verification method.
    pub controller: String,

    /// The public key encoded as a Multibase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_multibase: Option<MultibaseKey>,

    /// The public key encoded as a JWK.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_jwk: Option<Value>,
}
