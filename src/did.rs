//! # DID Identifiers and Resolution
//!
//! Parsing of DIDs into a structured identifier, the DID document model and
//! the `did:web` method's URL construction and resolution.
//!
//! See [DID resolution](https://www.w3.org/TR/did-core/#did-resolution) for more.

mod document;
mod identifier;
pub mod web;

pub use self::document::*;
pub use self::identifier::Did;
