//! Emergency code repository port.
//!
//! ## Why consume is conditional
//!
//! Two concurrent submissions can race on the same code. Implementations
//! must make `consume` a single conditional write (`is_used = false →
//! true`) so exactly one caller observes `true`; there is no distributed
//! transaction to lean on.

use async_trait::async_trait;

use crate::domain::admission::EmergencyCode;
use crate::domain::foundation::{DomainError, EmergencyCodeId, ProfessionalId};

/// Repository port for single-use emergency codes.
#[async_trait]
pub trait EmergencyCodeRepository: Send + Sync {
    /// Persist a freshly issued code.
    async fn insert(&self, code: &EmergencyCode) -> Result<(), DomainError>;

    /// Find a code row by professional and normalized token value.
    ///
    /// Returns the row regardless of its used/expired state; validity is
    /// judged by the caller against the current time.
    async fn find_by_code(
        &self,
        professional_id: &ProfessionalId,
        code: &str,
    ) -> Result<Option<EmergencyCode>, DomainError>;

    /// Atomically mark a code as used.
    ///
    /// Returns `true` if this call transitioned the row from unused to
    /// used, `false` if the row was already used (or gone).
    async fn consume(&self, id: &EmergencyCodeId) -> Result<bool, DomainError>;
}
