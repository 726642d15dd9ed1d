//! Credential and key fixtures.

use base64ct::{Base64, Encoding};
use credibil_ssi::core::Kind;
use credibil_ssi::key::ED25519_SPKI_PREFIX;
use credibil_ssi::{CredentialSubject, VerifiableCredential};
use ed25519_dalek::SigningKey;
use serde_json::{Value, json};

/// Issuer DID used by the fixtures.
pub const ISSUER: &str = "did:web:issuer.example";

/// Vocabulary for fixture claims the credentials context does not define.
pub const VOCAB: &str = "https://example.org/vocab#";

/// Fixed signing key so signatures are reproducible across runs.
#[must_use]
pub fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[
        0x9d, 0x61, 0xb1, 0x9d, 0xef, 0xfd, 0x5a, 0x60, 0xba, 0x84, 0x4a, 0xf4, 0x92, 0xec, 0x2c,
        0xc4, 0x44, 0x49, 0xc5, 0x69, 0x7b, 0x32, 0x69, 0x19, 0x70, 0x3b, 0xac, 0x03, 0x1c, 0xae,
        0x7f, 0x60,
    ])
}

/// PEM `SubjectPublicKeyInfo` for the verifying half of `key`.
#[must_use]
pub fn public_key_pem(key: &SigningKey) -> String {
    let spki = [&ED25519_SPKI_PREFIX[..], key.verifying_key().as_bytes()].concat();
    format!("-----BEGIN PUBLIC KEY-----\n{}\n-----END PUBLIC KEY-----\n", Base64::encode_string(&spki))
}

/// Subject claims for a university degree.
#[must_use]
pub fn degree_subject() -> CredentialSubject {
    let Value::Object(claims) = json!({
        "degree": {
            "type": "BachelorDegree",
            "name": "Bachelor of Science and Arts"
        }
    }) else {
        unreachable!("literal is an object");
    };
    CredentialSubject { id: Some("did:web:holder.example".to_string()), claims }
}

/// A credential without a proof.
///
/// # Panics
///
/// Never: the builder always has an issuer and subject.
#[must_use]
pub fn credential() -> VerifiableCredential {
    let Value::Object(vocab) = json!({"@vocab": VOCAB}) else {
        unreachable!("literal is an object");
    };
    VerifiableCredential::builder()
        .add_context(Kind::Object(vocab))
        .id("http://university.example/credentials/3732")
        .add_type("UniversityDegreeCredential")
        .issuer(ISSUER)
        .add_subject(degree_subject())
        .build()
        .expect("fixture should build")
}
