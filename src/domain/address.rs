//! Local number normalization and chat address derivation.
//!
//! A local number is 8 digits with no country code. Its address is the
//! one-to-one chat id the transport routes to.

use super::errors::DomainError;
use std::fmt;

/// Country calling code prepended to every local number.
pub const REGION_PREFIX: &str = "852";

/// Routing domain of an individual (non-group) chat.
pub const CHAT_SUFFIX: &str = "@c.us";

/// Number of digits in a local number.
pub const LOCAL_DIGITS: usize = 8;

/// A normalized local number: exactly 8 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalNumber(String);

impl LocalNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully qualified chat id, e.g. `85291234567@c.us`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Accept an already-qualified one-to-one chat id (as reported for inbound senders).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIdentifier` if the id is not `<digits>@c.us`.
    pub fn from_chat_id(raw: &str) -> Result<Self, DomainError> {
        let user = raw
            .strip_suffix(CHAT_SUFFIX)
            .ok_or_else(|| DomainError::InvalidIdentifier(raw.to_string()))?;
        if user.is_empty() || !user.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidIdentifier(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip every non-digit character and require exactly 8 digits to remain.
///
/// # Errors
///
/// Returns `DomainError::InvalidIdentifier` carrying the raw input when the
/// digit count is not 8 (including when nothing is left).
pub fn normalize(raw: &str) -> Result<LocalNumber, DomainError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != LOCAL_DIGITS {
        return Err(DomainError::InvalidIdentifier(raw.to_string()));
    }
    Ok(LocalNumber(digits))
}

/// Build the chat address for a normalized number. Pure; never fails.
pub fn resolve_address(number: &LocalNumber) -> Address {
    Address(format!("{}{}{}", REGION_PREFIX, number.as_str(), CHAT_SUFFIX))
}
