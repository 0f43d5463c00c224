//! Strongly-typed identifier value objects.
//!
//! Identifiers issued by this core (`ConsultRequestId`, `EmergencyCodeId`)
//! are UUID-backed. Identifiers supplied from outside (`UserId`,
//! `ProfessionalId`, `AnimalId`) are opaque validated strings: the identity
//! provider and the listing subsystem own their formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Maximum accepted length for externally-supplied identifiers.
const MAX_EXTERNAL_ID_LEN: usize = 128;

fn validate_external_id(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if trimmed.len() > MAX_EXTERNAL_ID_LEN {
        return Err(ValidationError::too_long(field, MAX_EXTERNAL_ID_LEN));
    }
    Ok(trimmed.to_string())
}

/// Unique identifier for a consult request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsultRequestId(Uuid);

impl ConsultRequestId {
    /// Creates a new random ConsultRequestId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ConsultRequestId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ConsultRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConsultRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConsultRequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for an emergency override code row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmergencyCodeId(Uuid);

impl EmergencyCodeId {
    /// Creates a new random EmergencyCodeId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an EmergencyCodeId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EmergencyCodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EmergencyCodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmergencyCodeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Opaque identifier for an authenticated user.
///
/// Issued by the external identity provider and trusted as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a UserId after validating the raw value.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        validate_external_id("user_id", value.as_ref()).map(Self)
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier for a professional's directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfessionalId(String);

impl ProfessionalId {
    /// Creates a ProfessionalId after validating the raw value.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        validate_external_id("professional_id", value.as_ref()).map(Self)
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfessionalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for ProfessionalId {
    /// A professional is addressed by their user identity.
    fn from(user_id: UserId) -> Self {
        Self(user_id.0)
    }
}

/// Opaque identifier for an animal record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimalId(String);

impl AnimalId {
    /// Creates an AnimalId after validating the raw value.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        validate_external_id("animal_id", value.as_ref()).map(Self)
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
