//! # Errors
//!
//! Typed errors for DID parsing, `did:web` URL construction, key import,
//! canonicalization and proof checks. Failure to resolve a DID to a document
//! is reported through the [`ResolutionError`] umbrella, which is also the
//! error document fetchers are expected to surface.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

/// Result type for operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Typed errors, one variant per failure kind.
#[derive(Error, Debug)]
pub enum Error {
    /// The input string violates DID syntax.
    #[error("malformed DID: {0}")]
    MalformedDid(String),

    /// The DID method is not one this resolver handles.
    #[error("DID method not allowed: {0}. Expected did:web")]
    UnsupportedDidMethod(String),

    /// The identifier cannot form a valid URL.
    #[error("invalid DID document URL: {0}")]
    UrlConstruction(#[from] url::ParseError),

    /// The PEM armor or base64 body of a key is malformed.
    #[error("invalid key format: {0}")]
    KeyFormat(String),

    /// The document cannot be expanded or normalized.
    #[error("canonicalization failed: {0}")]
    Canonicalization(String),

    /// A JWT's audience claim does not contain the expected value.
    #[error(
        "JWT audience check failed. Expected audience: {expected}, actual audience: {}",
        .actual.join(",  ")
    )]
    AudienceMismatch {
        /// The audience the verifier expected.
        expected: String,

        /// The audience values carried by the token, in original order.
        actual: Vec<String>,
    },

    /// A credential is missing required members.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// A credential proof is missing, malformed or does not verify.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}

/// Failure to resolve a DID to its document.
///
/// Carries an optional message and an optional cause. Core [`Error`]s raised
/// while building the document URL are wrapped as the cause and can be
/// recovered with [`ResolutionError::kind`].
#[derive(Debug, Default)]
pub struct ResolutionError {
    message: Option<String>,
    cause: Option<anyhow::Error>,
}

impl ResolutionError {
    /// Create an error with a message and no cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            cause: None,
        }
    }

    /// Create an error with a message and an underlying cause.
    #[must_use]
    pub fn with_cause(message: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        Self {
            message: Some(message.into()),
            cause: Some(cause.into()),
        }
    }

    /// Create an error from an underlying cause only.
    #[must_use]
    pub fn from_cause(cause: impl Into<anyhow::Error>) -> Self {
        Self {
            message: None,
            cause: Some(cause.into()),
        }
    }

    /// The message, if one was supplied.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The underlying cause, if any.
    #[must_use]
    pub const fn cause(&self) -> Option<&anyhow::Error> {
        self.cause.as_ref()
    }

    /// The core error that caused resolution to fail, when the cause is one.
    #[must_use]
    pub fn kind(&self) -> Option<&Error> {
        self.cause.as_ref().and_then(|c| c.downcast_ref::<Error>())
    }
}

impl Display for ResolutionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (&self.message, &self.cause) {
            (Some(message), _) => write!(f, "{message}"),
            (None, Some(cause)) => write!(f, "{cause}"),
            (None, None) => write!(f, "DID resolution failed"),
        }
    }
}

impl std::error::Error for ResolutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_ref().map(|c| {
            let err: &(dyn std::error::Error + Send + Sync + 'static) = c.as_ref();
            err as &(dyn std::error::Error + 'static)
        })
    }
}

impl From<Error> for ResolutionError {
    fn from(err: Error) -> Self {
        Self::from_cause(err)
    }
}
