//! # Proofs
//!
//! Canonicalization of credentials and embedded Data Integrity proofs over
//! the canonical form.

mod canonical;
mod integrity;
mod w3c;

pub use self::canonical::*;
pub use self::integrity::*;
pub use self::w3c::*;
