//! Consult request repository port.
//!
//! The admission controller is the sole writer of consult requests; the
//! listing endpoint reads through the same port, always scoped to one
//! professional so a caller can only ever see their own rows.

use async_trait::async_trait;

use crate::domain::admission::{ConsultRequest, ConsultStatus};
use crate::domain::foundation::{DomainError, ProfessionalId};

/// Filter for listing a professional's consult requests.
#[derive(Debug, Clone, Default)]
pub struct ConsultRequestFilter {
    /// Restrict to a single lifecycle state.
    pub status: Option<ConsultStatus>,

    /// Free-text match against animal and owner names.
    pub search: Option<String>,
}

/// Repository port for consult request persistence.
#[async_trait]
pub trait ConsultRequestRepository: Send + Sync {
    /// Insert a freshly admitted request.
    async fn insert(&self, request: &ConsultRequest) -> Result<(), DomainError>;

    /// Count requests currently in `pending` for the professional.
    ///
    /// This is the admission snapshot read; implementations should make it
    /// a single indexed query.
    async fn count_pending(&self, professional_id: &ProfessionalId) -> Result<u32, DomainError>;

    /// List the professional's requests, emergency-first then newest-first.
    async fn list_for_professional(
        &self,
        professional_id: &ProfessionalId,
        filter: &ConsultRequestFilter,
    ) -> Result<Vec<ConsultRequest>, DomainError>;
}
