//! HTTP DTOs for consult endpoints.
//!
//! These types define the JSON request/response structure for the consult
//! API and serve as the boundary between HTTP and the domain layer.

use serde::{Deserialize, Serialize};

use crate::domain::admission::{ConsultRequest, ConsultStatus, EmergencyCode};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of a consult request submission.
///
/// The caller's identity is never part of the body; the boundary supplies
/// it from the authenticated session.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitConsultBody {
    /// Required; defaulted when absent so the handler reports a field
    /// validation error (400) instead of a deserialization failure.
    #[serde(default)]
    pub professional_id: String,
    /// Required; same defaulting as `professional_id`.
    #[serde(default)]
    pub animal_id: String,
    #[serde(default)]
    pub animal_name: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub emergency_code: Option<String>,
}

/// Query parameters for listing consult requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListConsultsQuery {
    /// Restrict to a lifecycle state (pending/accepted/rejected/expired).
    #[serde(default)]
    pub status: Option<String>,

    /// Free-text match against animal and owner names.
    #[serde(default)]
    pub q: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for an accepted submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitConsultResponse {
    pub ok: bool,
    pub id: String,
    pub is_emergency: bool,
}

impl From<&ConsultRequest> for SubmitConsultResponse {
    fn from(request: &ConsultRequest) -> Self {
        Self {
            ok: true,
            id: request.id.to_string(),
            is_emergency: request.is_emergency,
        }
    }
}

/// A consult request as shown to its professional.
#[derive(Debug, Clone, Serialize)]
pub struct ConsultRequestView {
    pub id: String,
    pub owner_id: String,
    pub animal_id: String,
    pub animal_name: Option<String>,
    pub owner_name: Option<String>,
    pub message: Option<String>,
    pub status: ConsultStatus,
    pub is_emergency: bool,
    /// When the request was created (ISO 8601).
    pub created_at: String,
    /// When a pending request lapses (ISO 8601).
    pub expires_at: String,
}

impl From<ConsultRequest> for ConsultRequestView {
    fn from(request: ConsultRequest) -> Self {
        Self {
            id: request.id.to_string(),
            owner_id: request.owner_id.to_string(),
            animal_id: request.animal_id.to_string(),
            animal_name: request.animal_name,
            owner_name: request.owner_name,
            message: request.message,
            status: request.status,
            is_emergency: request.is_emergency,
            created_at: request.created_at.as_datetime().to_rfc3339(),
            expires_at: request.expires_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response for the listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ConsultListResponse {
    pub requests: Vec<ConsultRequestView>,
}

/// Response for emergency code issuance.
#[derive(Debug, Clone, Serialize)]
pub struct EmergencyCodeResponse {
    pub code: String,
    /// When the code stops working (ISO 8601).
    pub expires_at: String,
}

impl From<&EmergencyCode> for EmergencyCodeResponse {
    fn from(code: &EmergencyCode) -> Self {
        Self {
            code: code.code.clone(),
            expires_at: code.expires_at.as_datetime().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::admission::ConsultRequestDetails;
    use crate::domain::foundation::{AnimalId, ProfessionalId, Timestamp, UserId};

    #[test]
    fn submit_body_deserializes_with_optional_fields_absent() {
        let body: SubmitConsultBody =
            serde_json::from_str(r#"{"professional_id":"pro-1","animal_id":"animal-1"}"#).unwrap();

        assert_eq!(body.professional_id, "pro-1");
        assert!(body.emergency_code.is_none());
        assert!(body.message.is_none());
    }

    #[test]
    fn submit_body_defaults_missing_required_fields_to_empty() {
        let body: SubmitConsultBody = serde_json::from_str("{}").unwrap();

        assert!(body.professional_id.is_empty());
        assert!(body.animal_id.is_empty());
    }

    #[test]
    fn consult_view_renders_timestamps_as_rfc3339() {
        let request = ConsultRequest::new_pending(
            UserId::new("owner-1").unwrap(),
            ProfessionalId::new("pro-1").unwrap(),
            AnimalId::new("animal-1").unwrap(),
            ConsultRequestDetails::default(),
            true,
            Some("AB3K9Q".to_string()),
            Timestamp::from_unix_secs(1705276800),
            24,
        );

        let view = ConsultRequestView::from(request);

        assert!(view.created_at.starts_with("2024-01-15"));
        assert!(view.is_emergency);
    }

    #[test]
    fn submit_response_reports_acceptance() {
        let request = ConsultRequest::new_pending(
            UserId::new("owner-1").unwrap(),
            ProfessionalId::new("pro-1").unwrap(),
            AnimalId::new("animal-1").unwrap(),
            ConsultRequestDetails::default(),
            false,
            None,
            Timestamp::now(),
            24,
        );

        let response = SubmitConsultResponse::from(&request);
        assert!(response.ok);
        assert!(!response.is_emergency);
    }
}
