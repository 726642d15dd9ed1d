//! # Verifiable Credentials
//!
//! The parts of the [W3C Verifiable Credentials Data Model](https://www.w3.org/TR/vc-data-model)
//! that canonicalization and proofs touch. Members not modelled here are
//! carried in `additional` so they are still covered by the signature.
//!
//! Deserializing then serializing a credential reproduces the original JSON
//! value: dates keep their lexical form and single values stay single.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{Kind, OneMany};
use crate::error::Error;
use crate::proof::Proof;

/// Base context of a Verifiable Credential.
pub const BASE_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// Base type of a Verifiable Credential.
pub const BASE_TYPE: &str = "VerifiableCredential";

/// A Verifiable Credential, optionally carrying an embedded proof.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerifiableCredential {
    /// JSON-LD contexts defining the terms used by the credential.
    #[serde(rename = "@context")]
    pub context: OneMany<Kind<Map<String, Value>>>,

    /// Credential identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Credential types, starting with `VerifiableCredential`.
    #[serde(rename = "type")]
    pub type_: OneMany<String>,

    /// The issuer of the credential: a DID or an object with an `id`.
    pub issuer: Kind<Map<String, Value>>,

    /// When the credential becomes valid, as an XML Schema `dateTime`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuance_date: Option<String>,

    /// When the credential ceases to be valid, as an XML Schema `dateTime`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,

    /// Claims about one or more subjects.
    pub credential_subject: OneMany<CredentialSubject>,

    /// Embedded proof. Never part of the signed data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,

    /// Any other credential members.
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl VerifiableCredential {
    /// Start building a credential.
    #[must_use]
    pub fn builder() -> VcBuilder {
        VcBuilder::new()
    }
}

/// Claims about a credential subject.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CredentialSubject {
    /// Subject identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Claims made about the subject.
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

impl From<Map<String, Value>> for CredentialSubject {
    fn from(claims: Map<String, Value>) -> Self {
        Self { id: None, claims }
    }
}

/// A builder for creating a Verifiable Credential.
#[derive(Clone, Debug)]
pub struct VcBuilder {
    vc: VerifiableCredential,
    subjects: Vec<CredentialSubject>,
}

impl Default for VcBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VcBuilder {
    /// Creates a builder with the base context and type.
    #[must_use]
    pub fn new() -> Self {
        let vc = VerifiableCredential {
            context: OneMany::Many(vec![Kind::String(BASE_CONTEXT.to_string())]),
            type_: OneMany::Many(vec![BASE_TYPE.to_string()]),
            ..VerifiableCredential::default()
        };
        Self { vc, subjects: vec![] }
    }

    /// Add a context.
    ///
    /// Chain to add multiple contexts.
    #[must_use]
    pub fn add_context(mut self, context: Kind<Map<String, Value>>) -> Self {
        let mut contexts = self.vc.context.to_vec();
        contexts.push(context);
        self.vc.context = OneMany::Many(contexts);
        self
    }

    /// Set the credential identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.vc.id = Some(id.into());
        self
    }

    /// Add a credential type.
    ///
    /// Chain to add multiple types.
    #[must_use]
    pub fn add_type(mut self, type_: impl Into<String>) -> Self {
        let mut types = self.vc.type_.to_vec();
        types.push(type_.into());
        self.vc.type_ = OneMany::Many(types);
        self
    }

    /// Set the issuer.
    #[must_use]
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.vc.issuer = Kind::String(issuer.into());
        self
    }

    /// Set the issuance date.
    #[must_use]
    pub fn issuance_date(mut self, date: DateTime<Utc>) -> Self {
        self.vc.issuance_date = Some(date.to_rfc3339_opts(SecondsFormat::Secs, true));
        self
    }

    /// Set the expiration date.
    #[must_use]
    pub fn expiration_date(mut self, date: DateTime<Utc>) -> Self {
        self.vc.expiration_date = Some(date.to_rfc3339_opts(SecondsFormat::Secs, true));
        self
    }

    /// Add a credential subject.
    ///
    /// Chain to add multiple subjects.
    #[must_use]
    pub fn add_subject(mut self, subject: CredentialSubject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Attach a proof.
    #[must_use]
    pub fn proof(mut self, proof: Proof) -> Self {
        self.vc.proof = Some(proof);
        self
    }

    /// Build the credential.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredential`] if no issuer is set or no subject
    /// was added.
    pub fn build(self) -> Result<VerifiableCredential, Error> {
        let mut vc = self.vc;
        let mut subjects = self.subjects;
        if vc.issuer.as_str().is_some_and(str::is_empty) {
            return Err(Error::InvalidCredential("credential has no issuer".to_string()));
        }
        vc.credential_subject = match subjects.len() {
            0 => return Err(Error::InvalidCredential("credential has no subject".to_string())),
            1 => OneMany::One(subjects.remove(0)),
            _ => OneMany::Many(subjects),
        };
        Ok(vc)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn build_and_serialize() {
        let subject: CredentialSubject =
            serde_json::from_value(json!({"id": "did:web:holder.example", "degree": "BSc"}))
                .expect("should deserialize");
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid date");

        let vc = VerifiableCredential::builder()
            .id("urn:uuid:3978344f-8596-4c3a-a978-8fcaba3903c5")
            .add_type("UniversityDegreeCredential")
            .issuer("did:web:issuer.example")
            .issuance_date(issued)
            .add_subject(subject)
            .build()
            .expect("should build");

        let value = serde_json::to_value(&vc).expect("should serialize");
        assert_eq!(
            value,
            json!({
                "@context": [BASE_CONTEXT],
                "id": "urn:uuid:3978344f-8596-4c3a-a978-8fcaba3903c5",
                "type": ["VerifiableCredential", "UniversityDegreeCredential"],
                "issuer": "did:web:issuer.example",
                "issuanceDate": "2024-01-01T00:00:00Z",
                "credentialSubject": {"id": "did:web:holder.example", "degree": "BSc"}
            })
        );
    }

    #[test]
    fn missing_parts() {
        let err = VcBuilder::new().add_subject(CredentialSubject::default()).build().expect_err("should fail");
        assert!(matches!(err, Error::InvalidCredential(_)));

        let err = VcBuilder::new().issuer("did:web:issuer.example").build().expect_err("should fail");
        assert!(matches!(err, Error::InvalidCredential(_)));
    }

    #[test]
    fn retains_additional_members() {
        let vc: VerifiableCredential = serde_json::from_value(json!({
            "@context": [BASE_CONTEXT],
            "type": "VerifiableCredential",
            "issuer": "did:web:issuer.example",
            "credentialSubject": {"name": "Alice"},
            "credentialStatus": {"id": "https://example.com/status/1", "type": "StatusList2021Entry"},
            "proof": {"type": "foo"}
        }))
        .expect("should deserialize");

        assert!(vc.additional.contains_key("credentialStatus"));
        assert_eq!(vc.proof.map(|p| p.type_), Some("foo".to_string()));
    }

    // Parsing a credential must not change the JSON that gets signed.
    #[test]
    fn lossless_round_trip() {
        let raw = json!({
            "@context": BASE_CONTEXT,
            "id": "http://example.edu/credentials/1872",
            "type": "VerifiableCredential",
            "issuer": {"id": "did:web:issuer.example", "name": "Example University"},
            "issuanceDate": "2010-01-01T19:23:24.000Z",
            "credentialSubject": [{"id": "did:web:a.example"}, {"id": "did:web:b.example"}]
        });
        let vc: VerifiableCredential = serde_json::from_value(raw.clone()).expect("should deserialize");
        assert_eq!(vc.context, OneMany::One(Kind::String(BASE_CONTEXT.to_string())));
        assert!(matches!(&vc.issuer, Kind::Object(issuer) if issuer["id"] == "did:web:issuer.example"));

        assert_eq!(serde_json::to_value(&vc).expect("should serialize"), raw);
    }

    #[test]
    fn builder_dates() {
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid date");
        let vc = VcBuilder::new()
            .issuer("did:web:issuer.example")
            .issuance_date(issued)
            .expiration_date(issued + chrono::Duration::days(365))
            .add_subject(CredentialSubject::default())
            .build()
            .expect("should build");
        assert_eq!(vc.issuance_date.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(vc.expiration_date.as_deref(), Some("2024-12-31T00:00:00Z"));
    }
}
