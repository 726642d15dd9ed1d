//! # JWT Claims
//!
//! Checks on JWT claims that are independent of how the token was parsed
//! and its signature verified.

use crate::core::OneMany;
use crate::error::Error;

/// Check the token's `aud` claim contains the expected audience.
///
/// # Errors
///
/// Returns [`Error::AudienceMismatch`], carrying the expected value and the
/// full list of actual values, if the expected audience is not present.
pub fn verify_audience(expected: &str, aud: &OneMany<String>) -> Result<(), Error> {
    if aud.iter().any(|a| a == expected) {
        return Ok(());
    }
    tracing::debug!("audience {expected} not found in JWT");
    Err(Error::AudienceMismatch {
        expected: expected.to_string(),
        actual: aud.to_vec(),
    })
}
