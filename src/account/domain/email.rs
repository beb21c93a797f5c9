//! Validated email address type.

use super::AccountDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalised (trimmed, lower-cased) email address.
///
/// Email addresses identify users everywhere in the system: as board owners,
/// board members and task assignees.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::EmptyEmail`] when the value is blank and
    /// [`AccountDomainError::InvalidEmail`] when it is not shaped like
    /// `local@domain.tld`.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(AccountDomainError::EmptyEmail);
        }

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(AccountDomainError::InvalidEmail(raw));
        };

        if !is_valid_local_part(local) || !is_valid_domain(domain) {
            return Err(AccountDomainError::InvalidEmail(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_local_part(local: &str) -> bool {
    let Some(first) = local.chars().next() else {
        return false;
    };
    if !first.is_ascii_alphanumeric() {
        return false;
    }

    let mut previous_was_separator = false;
    for ch in local.chars() {
        let is_separator = ch == '.' || ch == '-';
        if is_separator && previous_was_separator {
            return false;
        }
        if !(ch.is_ascii_alphanumeric() || is_separator || ch == '_' || ch == '+') {
            return false;
        }
        previous_was_separator = is_separator;
    }
    !previous_was_separator
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };
    if hosts.is_empty() || tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    hosts.iter().all(|label| {
        label.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = AccountDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
