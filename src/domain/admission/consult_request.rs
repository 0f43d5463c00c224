//! Consult request entity and its lifecycle states.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AnimalId, ConsultRequestId, ProfessionalId, Timestamp, UserId,
};

/// Lifecycle state of a consult request.
///
/// A request enters as `Pending` and counts toward the professional's
/// pending load until it transitions away. Accept/reject are performed by
/// the professional; expiry is applied by a time-based sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
}

impl ConsultStatus {
    /// Parse a status from its storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    /// Storage representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }
}

/// A consult request from a pet owner to a professional.
///
/// Created exclusively by the admission controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultRequest {
    pub id: ConsultRequestId,
    pub owner_id: UserId,
    pub professional_id: ProfessionalId,
    pub animal_id: AnimalId,
    pub animal_name: Option<String>,
    pub owner_name: Option<String>,
    pub message: Option<String>,
    pub status: ConsultStatus,

    /// True when the request was admitted through an emergency override.
    pub is_emergency: bool,

    /// The normalized code used for the override, kept for audit.
    pub emergency_code: Option<String>,

    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// Optional free-text fields accompanying a submission.
#[derive(Debug, Clone, Default)]
pub struct ConsultRequestDetails {
    pub animal_name: Option<String>,
    pub owner_name: Option<String>,
    pub message: Option<String>,
}

impl ConsultRequest {
    /// Creates a new pending request expiring `ttl_hours` from `now`.
    #[allow(clippy::too_many_arguments)]
    pub fn new_pending(
        owner_id: UserId,
        professional_id: ProfessionalId,
        animal_id: AnimalId,
        details: ConsultRequestDetails,
        is_emergency: bool,
        emergency_code: Option<String>,
        now: Timestamp,
        ttl_hours: i64,
    ) -> Self {
        Self {
            id: ConsultRequestId::new(),
            owner_id,
            professional_id,
            animal_id,
            animal_name: details.animal_name,
            owner_name: details.owner_name,
            message: details.message,
            status: ConsultStatus::Pending,
            is_emergency,
            emergency_code,
            created_at: now,
            expires_at: now.plus_hours(ttl_hours),
        }
    }

    /// Returns true if the request is past its expiry deadline.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.status == ConsultStatus::Pending && now.is_after(&self.expires_at)
    }
}
