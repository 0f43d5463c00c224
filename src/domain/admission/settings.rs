//! Per-professional admission settings.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ProfessionalId;

/// Default pending-request cap applied when a professional has never
/// saved settings.
pub const DEFAULT_CAP_PENDING: u32 = 20;

/// Admission settings owned by a single professional.
///
/// Mutated only by the professional (or an administrator acting on their
/// behalf); the admission path reads but never writes these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalSettings {
    pub professional_id: ProfessionalId,

    /// Maximum number of consult requests allowed to sit in `pending`.
    pub cap_pending: u32,

    /// Operator-controlled switch that rejects all non-emergency requests.
    pub blocked: bool,
}

impl ProfessionalSettings {
    /// Returns the defaults for a professional who has never saved settings.
    pub fn defaults_for(professional_id: ProfessionalId) -> Self {
        Self {
            professional_id,
            cap_pending: DEFAULT_CAP_PENDING,
            blocked: false,
        }
    }

    /// Returns true if `pending_count` has reached the cap.
    pub fn cap_reached(&self, pending_count: u32) -> bool {
        pending_count >= self.cap_pending
    }
}
