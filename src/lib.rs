//! # Credibil SSI
//!
//! Building blocks for issuing and verifying Verifiable Credentials with
//! `did:web` identities:
//!
//! - [`did`]: parse DIDs, build the URL of a `did:web` document and resolve
//!   it through a caller-supplied [`DocumentFetcher`].
//! - [`key`]: import PEM public keys as multibase strings.
//! - [`proof`]: canonicalize credentials as RDF, excluding any embedded
//!   proof, and sign or verify `eddsa-jcs-2022` Data Integrity proofs.
//! - [`jwt`]: JWT audience checks.
//!
//! All operations are synchronous and hold no state between calls, except
//! document resolution, which awaits the fetcher.
//!
//! # Example
//!
//! ```rust
//! use credibil_ssi::did::Did;
//! use credibil_ssi::did::web::WebOptions;
//!
//! let did: Did = "did:web:example.com:user:alice".parse().expect("should parse");
//! let url = did.to_web_http(&WebOptions::default()).expect("should build URL");
//! assert_eq!(url.as_str(), "https://example.com/user/alice/did.json");
//! ```

pub mod core;
pub mod credential;
pub mod did;
mod error;
pub mod jwt;
pub mod key;
pub mod proof;
mod provider;

pub use self::credential::{CredentialSubject, VerifiableCredential};
pub use self::error::{Error, ResolutionError, Result};
pub use self::provider::*;
