//! Customer email addresses.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a string was rejected as an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is empty")]
    Empty,

    #[error("email is longer than {} characters", Email::MAX_LENGTH)]
    TooLong,

    /// Anything that is not `local@domain.tld`.
    #[error("email is not of the form local@domain.tld")]
    Malformed,
}

/// A trimmed, lower-cased email address.
///
/// Accounts are looked up by the stored value, so two spellings that differ
/// only in case or surrounding whitespace map to the same account. Checks are
/// loose: one `@`, a non-empty local part and a dotted domain.
/// Deserializing runs the same checks as [`Email::parse`].
///
/// ```
/// use loja_core::Email;
///
/// assert_eq!(Email::parse(" Ana@Loja.PT ").unwrap().as_str(), "ana@loja.pt");
/// assert!(Email::parse("ana@localhost").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// RFC 5321 path limit.
    pub const MAX_LENGTH: usize = 254;

    /// Normalize and validate an address.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` when the trimmed input is empty, longer than
    /// [`Email::MAX_LENGTH`], or not shaped like `local@domain.tld`.
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let normalized = raw.trim().to_lowercase();

        match normalized.chars().count() {
            0 => return Err(EmailError::Empty),
            n if n > Self::MAX_LENGTH => return Err(EmailError::TooLong),
            _ => {}
        }

        if !is_well_formed(&normalized) {
            return Err(EmailError::Malformed);
        }

        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_well_formed(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
