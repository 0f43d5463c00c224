//! HTTP handlers for consult endpoints.
//!
//! These handlers connect axum routes to the admission domain services.

use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::{AuthenticatedUser, ErrorResponse};
use crate::domain::admission::{
    AdmissionController, AdmissionError, ConsultRequestDetails, ConsultStatus,
    EmergencyCodeIssuer, SubmitConsult,
};
use crate::domain::foundation::{AnimalId, ProfessionalId};
use crate::ports::{ConsultRequestFilter, ConsultRequestRepository};

use super::dto::{
    ConsultListResponse, ConsultRequestView, EmergencyCodeResponse, ListConsultsQuery,
    SubmitConsultBody, SubmitConsultResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for consult endpoints.
///
/// Cloned per request; all dependencies are Arc-wrapped.
#[derive(Clone)]
pub struct ConsultAppState {
    pub admission: Arc<AdmissionController>,
    pub issuer: Arc<EmergencyCodeIssuer>,
    pub requests: Arc<dyn ConsultRequestRepository>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/consults - Submit a consult request to a professional.
pub async fn submit_consult(
    State(state): State<ConsultAppState>,
    user: AuthenticatedUser,
    Json(body): Json<SubmitConsultBody>,
) -> Result<impl IntoResponse, ConsultApiError> {
    let professional_id = ProfessionalId::new(&body.professional_id)
        .map_err(|e| AdmissionError::validation("professional_id", e.to_string()))?;
    let animal_id = AnimalId::new(&body.animal_id)
        .map_err(|e| AdmissionError::validation("animal_id", e.to_string()))?;

    let cmd = SubmitConsult {
        owner_id: user.user_id,
        professional_id,
        animal_id,
        details: ConsultRequestDetails {
            animal_name: body.animal_name,
            owner_name: body.owner_name,
            message: body.message,
        },
        emergency_code: body.emergency_code,
    };

    let request = state.admission.submit(cmd).await?;

    Ok(Json(SubmitConsultResponse::from(&request)))
}

/// GET /api/consults - List the calling professional's consult requests.
///
/// Scoping to the caller happens at the query itself: rows are fetched by
/// the caller's own professional id, so no foreign rows can be returned.
pub async fn list_consults(
    State(state): State<ConsultAppState>,
    user: AuthenticatedUser,
    Query(query): Query<ListConsultsQuery>,
) -> Result<impl IntoResponse, ConsultApiError> {
    let status = query
        .status
        .as_deref()
        .map(|s| {
            ConsultStatus::parse(s)
                .ok_or_else(|| AdmissionError::validation("status", format!("unknown status '{s}'")))
        })
        .transpose()?;

    let filter = ConsultRequestFilter {
        status,
        search: query.q,
    };
    let professional_id = ProfessionalId::from(user.user_id);
    let requests = state
        .requests
        .list_for_professional(&professional_id, &filter)
        .await
        .map_err(AdmissionError::from)?;

    Ok(Json(ConsultListResponse {
        requests: requests.into_iter().map(ConsultRequestView::from).collect(),
    }))
}

/// POST /api/consults/emergency-codes - Issue a bypass code.
///
/// The code is scoped to the calling professional; no body is accepted.
pub async fn issue_emergency_code(
    State(state): State<ConsultAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ConsultApiError> {
    let professional_id = ProfessionalId::from(user.user_id);
    let code = state
        .issuer
        .issue(professional_id)
        .await
        .map_err(AdmissionError::from)?;

    Ok((StatusCode::CREATED, Json(EmergencyCodeResponse::from(&code))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts admission errors to HTTP responses.
pub struct ConsultApiError(AdmissionError);

impl From<AdmissionError> for ConsultApiError {
    fn from(err: AdmissionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ConsultApiError {
    fn into_response(self) -> axum::response::Response {
        let error_code = match &self.0 {
            AdmissionError::Validation { .. } => "VALIDATION_FAILED",
            AdmissionError::Blocked => "PROFESSIONAL_BLOCKED",
            AdmissionError::CapacityReached { .. } => "CAPACITY_REACHED",
            AdmissionError::Storage(_) => "STORAGE_UNAVAILABLE",
        };

        let body = ErrorResponse::new(error_code, self.0.to_string());
        (self.0.status_code(), Json(body)).into_response()
    }
}
