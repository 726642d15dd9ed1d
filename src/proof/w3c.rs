//! # W3C Data Integrity Proof
//!
//! [W3C Data Integrity 1.0 Report](https://www.w3.org/community/reports/credentials/CG-FINAL-data-integrity-20220722)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::OneMany;

/// To be verifiable, a credential must contain at least one proof mechanism,
/// and details necessary to evaluate that proof.
///
/// The `proof_value` field is computed using a cryptosuite algorithm. The
/// same structure without `proof_value` is the proof configuration that is
/// itself hashed into the signed payload. Hence the field being optional on
/// this struct.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_field_names)]
pub struct Proof {
    /// An optional identifier for the proof. MUST be a URL, such as a UUID as a
    /// URN e.g. "`urn:uuid:6a1676b8-b51f-11ed-937b-d76685a20ff5`".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The specific proof type. MUST map to a URL. Examples include
    /// "`DataIntegrityProof`" and "`Ed25519Signature2020`".
    #[serde(rename = "type")]
    pub type_: String,

    /// The value of the cryptosuite property identifies the cryptographic
    /// suite. For example, 'eddsa-jcs-2022', 'eddsa-rdfc-2022'.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cryptosuite: Option<String>,

    /// The reason for the proof. MUST map to a URL. The proof purpose acts as a
    /// safeguard to prevent the proof from being misused.
    pub proof_purpose: String,

    /// Used to verify the proof. MUST map to a URL. For example, a link to a
    /// public key that is used by a verifier during the verification
    /// process. e.g did:example:123456789abcdefghi#keys-1.
    pub verification_method: String,

    /// The date-time the proof was created. MUST be an XMLSCHEMA11-2 date-time.
    /// Held as written so the proof configuration hashes to the signed bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// The date-time the proof expires. MUST be an XMLSCHEMA11-2 date-time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,

    /// One or more security domains in which the proof is meant to be used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<OneMany<String>>,

    /// Used to mitigate replay attacks. SHOULD be included if a domain is
    /// specified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,

    /// Contains the data needed to verify the proof using the
    /// verificationMethod specified. MUST be a MULTIBASE-encoded binary
    /// value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_value: Option<String>,

    /// Supplied by the proof creator. Can be used to increase privacy by
    /// decreasing linkability that results from deterministically generated
    /// signatures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,

    /// Any other proof members, such as the `@context` of an `eddsa-jcs-2022`
    /// proof configuration.
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn keeps_unknown_members() {
        let raw = json!({
            "@context": ["https://www.w3.org/ns/credentials/v2"],
            "type": "DataIntegrityProof",
            "cryptosuite": "eddsa-jcs-2022",
            "proofPurpose": "assertionMethod",
            "verificationMethod": "did:web:issuer.example#key-0",
            "created": "2024-01-01T00:00:00Z",
            "proofValue": "z5C5b"
        });
        let proof: Proof = serde_json::from_value(raw.clone()).expect("should deserialize");
        assert!(proof.additional.contains_key("@context"));
        assert_eq!(serde_json::to_value(&proof).expect("should serialize"), raw);
    }
}
