//! Professional settings reader port.
//!
//! Settings are mutated by the professional through the listing subsystem;
//! this core only reads them, falling back to defaults when no row exists.

use async_trait::async_trait;

use crate::domain::admission::ProfessionalSettings;
use crate::domain::foundation::{DomainError, ProfessionalId};

/// Read-only port for per-professional admission settings.
#[async_trait]
pub trait ProfessionalSettingsReader: Send + Sync {
    /// Find the settings row for a professional.
    ///
    /// Returns `None` when the professional has never saved settings;
    /// callers substitute [`ProfessionalSettings::defaults_for`].
    async fn find(
        &self,
        professional_id: &ProfessionalId,
    ) -> Result<Option<ProfessionalSettings>, DomainError>;
}
