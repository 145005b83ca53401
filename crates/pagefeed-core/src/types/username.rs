//! Username type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Maximum username length in characters.
pub const MAX_USERNAME_LEN: usize = 64;

/// A validated account username.
///
/// # Example
///
/// ```
/// use pagefeed_core::Username;
///
/// let name = Username::new("jake").unwrap();
/// assert_eq!(name.as_str(), "jake");
/// assert!(Username::new("two words").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new username, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, too long, or contains
    /// whitespace or `/`.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the username string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let reason = if s.is_empty() {
            "must be non-empty"
        } else if s.chars().count() > MAX_USERNAME_LEN {
            "must be at most 64 characters"
        } else if s.chars().any(|c| c.is_whitespace() || c == '/') {
            "must not contain whitespace or '/'"
        } else {
            return Ok(());
        };

        Err(InvalidInputError::Username {
            value: s.to_string(),
            reason: reason.to_string(),
        }
        .into())
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Username {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Username {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
