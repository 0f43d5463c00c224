//! Subscription synchronizer - applies billing lifecycle events exactly once.
//!
//! ## Design
//!
//! The payment processor delivers events at-least-once with no ordering
//! guarantee. The synchronizer therefore applies "if new" semantics keyed
//! on the event identifier: a redelivered event is acknowledged without
//! reapplying, and an event older than the last applied one is acknowledged
//! without clobbering newer state. Each apply writes the full new record
//! (last-write-wins on fields, never a merge), so concurrent duplicate
//! deliveries converge to the same final state.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::billing::plan_catalog::resolve_plan;
use crate::domain::billing::{
    BillingEvent, SubscriptionRecord, WebhookError, WebhookSignatureVerifier,
};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::SubscriptionRepository;

/// Outcome of a webhook delivery that did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The event was applied to the subscription record.
    Applied,
    /// The event id matched the record's marker; nothing to do.
    AlreadyApplied,
    /// The event was deliberately not applied (irrelevant type, missing
    /// metadata, or stale). Acknowledged so the sender stops redelivering.
    Ignored,
}

/// Applies verified billing events to local subscription records.
pub struct SubscriptionSynchronizer {
    verifier: WebhookSignatureVerifier,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionSynchronizer {
    pub fn new(
        verifier: WebhookSignatureVerifier,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            verifier,
            subscriptions,
        }
    }

    /// Handles a raw webhook delivery.
    ///
    /// Signature failures reject the delivery before any state is read or
    /// written. Datastore failures surface as retryable errors so the
    /// sender's delivery system retries.
    pub async fn handle_event(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<SyncOutcome, WebhookError> {
        // 1-2. Authenticity, then parse.
        let event = self.verifier.verify_and_parse(payload, signature_header)?;

        // 3. Irrelevant types return before any datastore access.
        if !event.parsed_type().is_relevant() {
            return Ok(SyncOutcome::Ignored);
        }

        self.apply(&event).await
    }

    /// Applies a verified, relevant event.
    async fn apply(&self, event: &BillingEvent) -> Result<SyncOutcome, WebhookError> {
        let object = event
            .subscription_object()
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        // 4. Without user metadata the event cannot be applied safely.
        // Acknowledge it so the sender does not redeliver forever.
        let Some(raw_user_id) = object.user_id() else {
            warn!(event_id = %event.id, "billing event carries no user_id metadata, ignoring");
            return Ok(SyncOutcome::Ignored);
        };
        let user_id = match UserId::new(raw_user_id) {
            Ok(id) => id,
            Err(_) => {
                warn!(event_id = %event.id, "billing event user_id metadata is malformed, ignoring");
                return Ok(SyncOutcome::Ignored);
            }
        };

        // 5. Idempotency and staleness checks against the existing record.
        let event_at = Timestamp::from_unix_secs(event.created);
        if let Some(existing) = self.subscriptions.find_by_user(&user_id).await? {
            if existing.has_applied(&event.id) {
                return Ok(SyncOutcome::AlreadyApplied);
            }
            if existing.supersedes(event_at) {
                info!(
                    event_id = %event.id,
                    user_id = %user_id,
                    "billing event is older than applied state, ignoring"
                );
                return Ok(SyncOutcome::Ignored);
            }
        }

        // 6. Plan mapping, failing open to the free tier.
        let (role, billing_interval) = resolve_plan(object.plan_identifier());

        // 7. Full-state upsert with the new event marker.
        let record = SubscriptionRecord {
            user_id: user_id.clone(),
            role,
            billing_interval,
            status: object.status.clone().unwrap_or_else(|| "unknown".to_string()),
            current_period_end: object.current_period_end.map(Timestamp::from_unix_secs),
            cancel_at_period_end: object.cancel_at_period_end,
            external_customer_id: object.customer.clone(),
            external_subscription_id: object.id.clone(),
            last_processed_event_id: Some(event.id.clone()),
            last_event_at: Some(event_at),
        };
        self.subscriptions.upsert(&record).await?;

        info!(
            event_id = %event.id,
            user_id = %user_id,
            role = role.as_str(),
            "billing event applied"
        );
        Ok(SyncOutcome::Applied)
    }
}
