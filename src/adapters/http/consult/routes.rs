//! Axum router configuration for consult endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{issue_emergency_code, list_consults, submit_consult, ConsultAppState};

/// Create the consult API router.
///
/// # Routes
///
/// - `POST /` - Submit a consult request (owner)
/// - `GET /` - List the calling professional's requests
/// - `POST /emergency-codes` - Issue a bypass code (professional)
///
/// All routes require an authenticated caller.
pub fn consult_routes() -> Router<ConsultAppState> {
    Router::new()
        .route("/", post(submit_consult).get(list_consults))
        .route("/emergency-codes", post(issue_emergency_code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;

    use crate::domain::admission::{
        AdmissionController, AdmissionPolicy, ConsultRequest, EmergencyCode, EmergencyCodeIssuer,
        ProfessionalSettings,
    };
    use crate::domain::foundation::{DomainError, EmergencyCodeId, ProfessionalId};
    use crate::ports::{
        ConsultRequestFilter, ConsultRequestRepository, EmergencyCodeRepository,
        ProfessionalSettingsReader,
    };
    use async_trait::async_trait;

    struct NoSettings;

    #[async_trait]
    impl ProfessionalSettingsReader for NoSettings {
        async fn find(
            &self,
            _professional_id: &ProfessionalId,
        ) -> Result<Option<ProfessionalSettings>, DomainError> {
            Ok(None)
        }
    }

    struct EmptyRequests;

    #[async_trait]
    impl ConsultRequestRepository for EmptyRequests {
        async fn insert(&self, _request: &ConsultRequest) -> Result<(), DomainError> {
            Ok(())
        }

        async fn count_pending(
            &self,
            _professional_id: &ProfessionalId,
        ) -> Result<u32, DomainError> {
            Ok(0)
        }

        async fn list_for_professional(
            &self,
            _professional_id: &ProfessionalId,
            _filter: &ConsultRequestFilter,
        ) -> Result<Vec<ConsultRequest>, DomainError> {
            Ok(vec![])
        }
    }

    struct EmptyCodes {
        codes: Mutex<Vec<EmergencyCode>>,
    }

    #[async_trait]
    impl EmergencyCodeRepository for EmptyCodes {
        async fn insert(&self, code: &EmergencyCode) -> Result<(), DomainError> {
            self.codes.lock().unwrap().push(code.clone());
            Ok(())
        }

        async fn find_by_code(
            &self,
            _professional_id: &ProfessionalId,
            _code: &str,
        ) -> Result<Option<EmergencyCode>, DomainError> {
            Ok(None)
        }

        async fn consume(&self, _id: &EmergencyCodeId) -> Result<bool, DomainError> {
            Ok(false)
        }
    }

    fn test_state() -> ConsultAppState {
        let requests = Arc::new(EmptyRequests);
        let codes = Arc::new(EmptyCodes {
            codes: Mutex::new(Vec::new()),
        });
        ConsultAppState {
            admission: Arc::new(AdmissionController::new(
                Arc::new(NoSettings),
                requests.clone(),
                codes.clone(),
                AdmissionPolicy::default(),
            )),
            issuer: Arc::new(EmergencyCodeIssuer::with_default_ttl(codes)),
            requests,
        }
    }

    #[test]
    fn consult_routes_creates_router() {
        let router = consult_routes();
        let _: Router<()> = router.with_state(test_state());
    }
}
