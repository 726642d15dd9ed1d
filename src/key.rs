//! # Public Keys
//!
//! Import of PEM-armored public keys into the multibase representation used
//! in DID documents.

mod codec;
mod pem;

pub use self::codec::*;
pub use self::pem::*;
