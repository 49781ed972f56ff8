//! # Identity Newtypes
//!
//! Newtype wrappers for stay, person and jurisdiction identifiers. You
//! cannot pass a `PersonId` where a `StayId` is expected, and a
//! `JurisdictionCode` is normalized once so that rule/record matching is
//! a plain equality check.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Unique identifier for a stay record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayId(pub Uuid);

/// Unique identifier for a tracked person (primary user or family member).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonId(pub Uuid);

impl StayId {
    /// Generate a new random stay identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for StayId {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonId {
    /// Generate a new random person identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stay:{}", self.0)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "person:{}", self.0)
    }
}

/// Code of the jurisdiction a rule governs, e.g. `SCHENGEN` or `FR_TAX`.
///
/// Trimmed and upper-cased on construction; only `A-Z`, `0-9`, `_` and
/// `-` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JurisdictionCode(String);

impl JurisdictionCode {
    /// Validate and normalize a jurisdiction code.
    pub fn new(code: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = code.as_ref();
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(ValidationError::InvalidJurisdictionCode {
                input: raw.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(bad) = normalized
            .chars()
            .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '_' || *c == '-'))
        {
            return Err(ValidationError::InvalidJurisdictionCode {
                input: raw.to_string(),
                reason: format!("unsupported character {bad:?}"),
            });
        }
        Ok(Self(normalized))
    }

    /// The normalized code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JurisdictionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for JurisdictionCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for JurisdictionCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JurisdictionCode> for String {
    fn from(code: JurisdictionCode) -> Self {
        code.0
    }
}
