//! Admission controller - decides whether a consult request is accepted.
//!
//! ## Design
//!
//! The controller performs a read snapshot (settings + pending count +
//! optional code lookup), applies the admission rule, then writes. The
//! window between the count and the insert is kept as small as possible;
//! two concurrent submissions can still both observe `cap - 1` and both
//! insert. The cap is a soft ceiling with bounded overshoot, not a
//! linearizable quota.
//!
//! Code consumption is the one place the race is closed hard: marking a
//! code used is a conditional single-row update, so of two submissions
//! racing on the same code exactly one keeps its bypass. The loser is
//! re-evaluated as a plain submission against the already-read snapshot.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::admission::emergency_code::normalize_code;
use crate::domain::admission::{
    AdmissionError, ConsultRequest, ConsultRequestDetails, EmergencyCode, ProfessionalSettings,
};
use crate::domain::foundation::{AnimalId, ProfessionalId, Timestamp, UserId};
use crate::ports::{
    ConsultRequestRepository, EmergencyCodeRepository, ProfessionalSettingsReader,
};

/// Default lifetime of a pending request before the expiry sweep may
/// reclaim it.
pub const DEFAULT_REQUEST_TTL_HOURS: i64 = 24;

/// Tunable admission parameters.
#[derive(Debug, Clone)]
pub struct AdmissionPolicy {
    /// Hours until a pending request expires.
    pub request_ttl_hours: i64,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            request_ttl_hours: DEFAULT_REQUEST_TTL_HOURS,
        }
    }
}

/// A consult-request submission as handed over by the HTTP boundary.
///
/// `owner_id` comes from the authenticated session, never the body.
#[derive(Debug, Clone)]
pub struct SubmitConsult {
    pub owner_id: UserId,
    pub professional_id: ProfessionalId,
    pub animal_id: AnimalId,
    pub details: ConsultRequestDetails,
    pub emergency_code: Option<String>,
}

/// Decides accept/reject for incoming consult requests and persists the
/// outcome.
pub struct AdmissionController {
    settings: Arc<dyn ProfessionalSettingsReader>,
    requests: Arc<dyn ConsultRequestRepository>,
    codes: Arc<dyn EmergencyCodeRepository>,
    policy: AdmissionPolicy,
}

impl AdmissionController {
    pub fn new(
        settings: Arc<dyn ProfessionalSettingsReader>,
        requests: Arc<dyn ConsultRequestRepository>,
        codes: Arc<dyn EmergencyCodeRepository>,
        policy: AdmissionPolicy,
    ) -> Self {
        Self {
            settings,
            requests,
            codes,
            policy,
        }
    }

    /// Submits a consult request.
    ///
    /// Fails closed: any storage failure before the decision point rejects
    /// the submission with a retryable error rather than admitting without
    /// a settings+count snapshot.
    pub async fn submit(&self, cmd: SubmitConsult) -> Result<ConsultRequest, AdmissionError> {
        let now = Timestamp::now();

        // 1-2. Read snapshot: settings (defaults if absent) + pending count.
        let settings = self
            .settings
            .find(&cmd.professional_id)
            .await?
            .unwrap_or_else(|| ProfessionalSettings::defaults_for(cmd.professional_id.clone()));
        let pending = self.requests.count_pending(&cmd.professional_id).await?;

        // 3-4. Look up the override code, if one was supplied.
        let candidate = self.lookup_code(&cmd, now).await?;

        // 5. Admission rule.
        admission_rule(&settings, pending, candidate.is_some())?;

        // 6. Consume the code (single-use), then insert. A lost consume race
        // demotes the submission to a plain one re-checked against the
        // snapshot.
        let mut bypass = None;
        if let Some(code) = candidate {
            if self.codes.consume(&code.id).await? {
                bypass = Some(code.code);
            } else {
                debug!(
                    professional_id = %cmd.professional_id,
                    "emergency code consumed concurrently, re-checking as plain submission"
                );
                admission_rule(&settings, pending, false)?;
            }
        }

        let is_emergency = bypass.is_some();
        let request = ConsultRequest::new_pending(
            cmd.owner_id,
            cmd.professional_id,
            cmd.animal_id,
            cmd.details,
            is_emergency,
            bypass,
            now,
            self.policy.request_ttl_hours,
        );
        self.requests.insert(&request).await?;

        info!(
            request_id = %request.id,
            professional_id = %request.professional_id,
            is_emergency,
            "consult request admitted"
        );
        Ok(request)
    }

    /// Resolves the supplied code input to a currently valid code row.
    ///
    /// Empty or whitespace-only input counts as "no code supplied". A code
    /// that is unknown, already used, or expired also resolves to `None`:
    /// for bypass purposes all three are identical to submitting without a
    /// code.
    async fn lookup_code(
        &self,
        cmd: &SubmitConsult,
        now: Timestamp,
    ) -> Result<Option<EmergencyCode>, AdmissionError> {
        let Some(raw) = cmd.emergency_code.as_deref() else {
            return Ok(None);
        };
        let normalized = normalize_code(raw);
        if normalized.is_empty() {
            return Ok(None);
        }

        let found = self
            .codes
            .find_by_code(&cmd.professional_id, &normalized)
            .await?;
        Ok(found.filter(|code| code.is_valid(now)))
    }
}

/// The admission rule from the read snapshot.
///
/// Rejects iff `(blocked ∨ cap_reached) ∧ ¬emergency_ok`. Blocked takes
/// precedence over the cap in the reported reason.
fn admission_rule(
    settings: &ProfessionalSettings,
    pending: u32,
    emergency_ok: bool,
) -> Result<(), AdmissionError> {
    if emergency_ok {
        return Ok(());
    }
    if settings.blocked {
        return Err(AdmissionError::Blocked);
    }
    if settings.cap_reached(pending) {
        return Err(AdmissionError::CapacityReached {
            pending,
            cap: settings.cap_pending,
        });
    }
    Ok(())
}
