//! Account roles and billing intervals.

use serde::{Deserialize, Serialize};

/// Role granted to a user by their subscription plan.
///
/// `Free` is the least-privileged tier and the fail-open default when a
/// plan identifier cannot be mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Free,
    Owner,
    Veterinarian,
    Groomer,
    Petsitter,
    Boarding,
    Trainer,
}

impl AccountRole {
    /// Returns true for roles listed in the professional-services directory.
    pub fn is_professional(&self) -> bool {
        matches!(
            self,
            AccountRole::Veterinarian
                | AccountRole::Groomer
                | AccountRole::Petsitter
                | AccountRole::Boarding
                | AccountRole::Trainer
        )
    }

    /// Parse a role from its storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "free" => Some(Self::Free),
            "owner" => Some(Self::Owner),
            "veterinarian" => Some(Self::Veterinarian),
            "groomer" => Some(Self::Groomer),
            "petsitter" => Some(Self::Petsitter),
            "boarding" => Some(Self::Boarding),
            "trainer" => Some(Self::Trainer),
            _ => None,
        }
    }

    /// Storage representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Owner => "owner",
            Self::Veterinarian => "veterinarian",
            Self::Groomer => "groomer",
            Self::Petsitter => "petsitter",
            Self::Boarding => "boarding",
            Self::Trainer => "trainer",
        }
    }
}

/// Billing cadence of a paid plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Monthly,
    Yearly,
}

impl BillingInterval {
    /// Parse an interval from its storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// Storage representation of the interval.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}
