//! Destructure DIDs into strongly typed components.
//!
//! A DID is of the form `did:<method>:<method-specific-id>`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

// DID core: method-name = 1*method-char, method-char = %x61-7A / DIGIT
static METHOD_NAME: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new("^[a-z0-9]+$"));

/// A parsed Decentralized Identifier.
///
/// Immutable once parsed. Equality is structural over the method and the
/// method-specific identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Did {
    method: String,
    method_specific_id: String,
}

impl Did {
    /// DID method, for example `web`.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Method-specific identifier.
    ///
    /// Opaque to this type. For `did:web` it holds the domain, an optional
    /// `%3A`-escaped port and any `:`-separated path segments.
    #[must_use]
    pub fn method_specific_id(&self) -> &str {
        &self.method_specific_id
    }
}

impl FromStr for Did {
    type Err = Error;

    /// Parse a string into a [`Did`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDid`] if the `did:` prefix is missing, the
    /// method token is empty or not a valid method name, or the
    /// method-specific identifier is empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(rest) = s.strip_prefix("did:") else {
            return Err(Error::MalformedDid(format!("{s} does not start with 'did:'")));
        };
        let Some((method, id)) = rest.split_once(':') else {
            return Err(Error::MalformedDid(format!("{s} is missing a method-specific id")));
        };
        if method.is_empty() {
            return Err(Error::MalformedDid(format!("{s} has an empty method")));
        }
        let valid_method = match &*METHOD_NAME {
            Ok(re) => re.is_match(method),
            Err(e) => return Err(Error::MalformedDid(format!("method name check failed: {e}"))),
        };
        if !valid_method {
            return Err(Error::MalformedDid(format!("invalid method name '{method}' in {s}")));
        }
        if id.is_empty() {
            return Err(Error::MalformedDid(format!("{s} has an empty method-specific id")));
        }

        Ok(Self {
            method: method.to_string(),
            method_specific_id: id.to_string(),
        })
    }
}

impl TryFrom<&str> for Did {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for Did {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "did:{}:{}", self.method, self.method_specific_id)
    }
}

impl Serialize for Did {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
