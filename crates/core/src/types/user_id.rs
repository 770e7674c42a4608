//! Shopper identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`UserId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UserIdError {
    /// The input is empty or only whitespace.
    #[error("userId is required")]
    Blank,
}

/// Opaque identifier of the shopper owning a cart.
///
/// The storefront does not authenticate shoppers; any non-blank string is
/// accepted. Surrounding whitespace is stripped so `" u1 "` and `"u1"` name
/// the same cart.
///
/// ```
/// use shoplite_core::UserId;
///
/// assert_eq!(UserId::parse("  u1 ").unwrap().as_str(), "u1");
/// assert!(UserId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Parse a `UserId`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`UserIdError::Blank`] if nothing remains after trimming.
    pub fn parse(s: &str) -> Result<Self, UserIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(UserIdError::Blank);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
