//! Multibase encoding of public key material.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use ed25519_dalek::VerifyingKey;
use multibase::Base;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// DER prefix of an Ed25519 `SubjectPublicKeyInfo`, as found in the body of a
/// `PUBLIC KEY` PEM block.
pub const ED25519_SPKI_PREFIX: [u8; 12] =
    [0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00];

/// Multicodec prefix of an Ed25519 public key.
pub const ED25519_CODEC: [u8; 2] = [0xed, 0x01];

/// Key bytes wrapped in a self-describing multibase string.
///
/// The leading character identifies the base; `z` (base58btc) is used unless
/// another base is requested. Decoding always reproduces the encoded bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct MultibaseKey(String);

impl MultibaseKey {
    /// Encode key bytes using base58btc.
    #[must_use]
    pub fn encode(bytes: impl AsRef<[u8]>) -> Self {
        Self::encode_with(Base::Base58Btc, bytes)
    }

    /// Encode key bytes using the specified base.
    #[must_use]
    pub fn encode_with(base: Base, bytes: impl AsRef<[u8]>) -> Self {
        Self(multibase::encode(base, bytes))
    }

    /// Decode to the original key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyFormat`] if the string is not valid multibase.
    pub fn decode(&self) -> Result<Vec<u8>, Error> {
        let (_, bytes) = multibase::decode(&self.0)
            .map_err(|e| Error::KeyFormat(format!("failed to decode multibase key: {e}")))?;
        Ok(bytes)
    }

    /// The base named by the multibase prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyFormat`] if the prefix is not a known base.
    pub fn base(&self) -> Result<Base, Error> {
        let Some(code) = self.0.chars().next() else {
            return Err(Error::KeyFormat("empty multibase key".to_string()));
        };
        Base::from_code(code).map_err(|e| Error::KeyFormat(e.to_string()))
    }

    /// The multibase string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the key as an Ed25519 verifying key.
    ///
    /// Accepts 32 raw key bytes, a DER `SubjectPublicKeyInfo` (the content of
    /// a PEM `PUBLIC KEY` block) or a multicodec-prefixed key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyFormat`] if the bytes are not an Ed25519 public key.
    pub fn to_ed25519(&self) -> Result<VerifyingKey, Error> {
        let bytes = self.decode()?;
        let raw = match bytes.len() {
            32 => &bytes[..],
            44 if bytes.starts_with(&ED25519_SPKI_PREFIX) => &bytes[ED25519_SPKI_PREFIX.len()..],
            34 if bytes.starts_with(&ED25519_CODEC) => &bytes[ED25519_CODEC.len()..],
            n => return Err(Error::KeyFormat(format!("{n} bytes is not an Ed25519 public key"))),
        };
        let raw: [u8; 32] =
            raw.try_into().map_err(|_| Error::KeyFormat("invalid Ed25519 key length".to_string()))?;
        VerifyingKey::from_bytes(&raw)
            .map_err(|e| Error::KeyFormat(format!("invalid Ed25519 public key: {e}")))
    }
}

impl FromStr for MultibaseKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = Self(s.to_string());
        key.decode()?;
        Ok(key)
    }
}

impl TryFrom<String> for MultibaseKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MultibaseKey> for String {
    fn from(key: MultibaseKey) -> Self {
        key.0
    }
}

impl Display for MultibaseKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::SigningKey;
    use rand::RngCore;
    use rand::rngs::OsRng;

    use super::*;

    #[test]
    fn lossless() {
        for len in [1, 2, 31, 32, 33, 44, 64, 257] {
            let mut bytes = vec![0u8; len];
            OsRng.fill_bytes(&mut bytes);
            let key = MultibaseKey::encode(&bytes);
            assert!(key.as_str().starts_with('z'));
            assert_eq!(key.decode().expect("should decode"), bytes);
        }
    }

    #[test]
    fn leading_zeros() {
        let key = MultibaseKey::encode([0, 0, 1]);
        assert_eq!(key.as_str(), "z112");
        assert_eq!(key.decode().expect("should decode"), vec![0, 0, 1]);
    }

    #[test]
    fn other_bases() {
        let bytes = b"public key material";
        for base in [Base::Base64, Base::Base16Lower, Base::Base32Lower] {
            let key = MultibaseKey::encode_with(base, bytes);
            assert_eq!(key.base().expect("should get base"), base);
            assert_eq!(key.decode().expect("should decode"), bytes);
        }
    }

    #[test]
    fn parse_invalid() {
        assert!(matches!(MultibaseKey::from_str("z0OIl"), Err(Error::KeyFormat(_))));
        assert!(matches!(MultibaseKey::from_str(""), Err(Error::KeyFormat(_))));
        assert!(serde_json::from_str::<MultibaseKey>(r#""!nope""#).is_err());
    }

    #[test]
    fn ed25519_forms() {
        let signing_key = SigningKey::generate(&mut OsRng);
        let verifying_key = signing_key.verifying_key();
        let raw = verifying_key.to_bytes();

        let spki = [&ED25519_SPKI_PREFIX[..], &raw[..]].concat();
        let multicodec = [&ED25519_CODEC[..], &raw[..]].concat();
        for bytes in [raw.to_vec(), spki, multicodec] {
            let key = MultibaseKey::encode(&bytes);
            assert_eq!(key.to_ed25519().expect("should convert"), verifying_key);
        }

        let err = MultibaseKey::encode([1u8; 20]).to_ed25519().expect_err("should fail");
        assert!(matches!(err, Error::KeyFormat(_)));
    }
}
