//! Emergency code issuance.

use std::sync::Arc;

use tracing::info;

use crate::domain::admission::emergency_code::{EmergencyCode, DEFAULT_CODE_TTL_MINUTES};
use crate::domain::foundation::{DomainError, ProfessionalId, Timestamp};
use crate::ports::EmergencyCodeRepository;

/// Issues single-use bypass codes for a professional.
///
/// Issuance never invalidates previously issued codes; each call creates an
/// independent row.
pub struct EmergencyCodeIssuer {
    codes: Arc<dyn EmergencyCodeRepository>,
    ttl_minutes: i64,
}

impl EmergencyCodeIssuer {
    pub fn new(codes: Arc<dyn EmergencyCodeRepository>, ttl_minutes: i64) -> Self {
        Self { codes, ttl_minutes }
    }

    /// Creates an issuer with the default 15-minute validity window.
    pub fn with_default_ttl(codes: Arc<dyn EmergencyCodeRepository>) -> Self {
        Self::new(codes, DEFAULT_CODE_TTL_MINUTES)
    }

    /// Generates and persists a fresh code for the professional.
    pub async fn issue(
        &self,
        professional_id: ProfessionalId,
    ) -> Result<EmergencyCode, DomainError> {
        let code = EmergencyCode::issue(professional_id, Timestamp::now(), self.ttl_minutes);
        self.codes.insert(&code).await?;
        info!(
            professional_id = %code.professional_id,
            expires_at = %code.expires_at.as_datetime(),
            "emergency code issued"
        );
        Ok(code)
    }
}
