//! Integration tests for billing webhook synchronization.
//!
//! Exercises the synchronizer through the crate's public API with real
//! HMAC-signed payloads against an in-memory subscription store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::SecretString;
use serde_json::json;
use sha2::Sha256;

use pawbridge::domain::billing::{
    AccountRole, BillingInterval, SubscriptionRecord, SubscriptionSynchronizer, SyncOutcome,
    WebhookError, WebhookSignatureVerifier,
};
use pawbridge::domain::foundation::{DomainError, UserId};
use pawbridge::ports::SubscriptionRepository;

const SIGNING_SECRET: &str = "whsec_integration_test";

// =============================================================================
// Test Infrastructure
// =============================================================================

/// In-memory subscription store keyed by user id.
struct InMemorySubscriptions {
    records: Mutex<HashMap<String, SubscriptionRecord>>,
}

impl InMemorySubscriptions {
    fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, user_id: &str) -> Option<SubscriptionRecord> {
        self.records.lock().unwrap().get(user_id).cloned()
    }

    fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptions {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SubscriptionRecord>, DomainError> {
        Ok(self.records.lock().unwrap().get(user_id.as_str()).cloned())
    }

    async fn upsert(&self, record: &SubscriptionRecord) -> Result<(), DomainError> {
        self.records
            .lock()
            .unwrap()
            .insert(record.user_id.as_str().to_string(), record.clone());
        Ok(())
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn synchronizer(repo: Arc<InMemorySubscriptions>) -> SubscriptionSynchronizer {
    SubscriptionSynchronizer::new(
        WebhookSignatureVerifier::new(SecretString::new(SIGNING_SECRET.to_string())),
        repo,
    )
}

fn sign(payload: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp();
    let mut mac =
        Hmac::<Sha256>::new_from_slice(SIGNING_SECRET.as_bytes()).expect("HMAC accepts any key");
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

fn subscription_event(
    event_id: &str,
    event_type: &str,
    created: i64,
    user_id: &str,
    plan_id: &str,
    status: &str,
) -> String {
    json!({
        "id": event_id,
        "type": event_type,
        "created": created,
        "data": {
            "object": {
                "id": "sub_77",
                "customer": "cus_77",
                "status": status,
                "current_period_end": created + 2_592_000,
                "cancel_at_period_end": false,
                "metadata": { "user_id": user_id },
                "plan": { "id": plan_id }
            }
        }
    })
    .to_string()
}

async fn deliver(sync: &SubscriptionSynchronizer, payload: &str) -> SyncOutcome {
    sync.handle_event(payload.as_bytes(), &sign(payload))
        .await
        .expect("delivery should not error")
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn full_subscription_lifecycle_converges() {
    let repo = Arc::new(InMemorySubscriptions::new());
    let sync = synchronizer(repo.clone());

    // Created: groomer signs up on a yearly plan.
    let created = subscription_event(
        "evt_1",
        "customer.subscription.created",
        1_700_000_000,
        "user-groomer",
        "price_groomer_yearly",
        "trialing",
    );
    assert_eq!(deliver(&sync, &created).await, SyncOutcome::Applied);

    // Updated: trial converts to active.
    let updated = subscription_event(
        "evt_2",
        "customer.subscription.updated",
        1_700_100_000,
        "user-groomer",
        "price_groomer_yearly",
        "active",
    );
    assert_eq!(deliver(&sync, &updated).await, SyncOutcome::Applied);

    // Deleted: subscription ends.
    let deleted = subscription_event(
        "evt_3",
        "customer.subscription.deleted",
        1_700_200_000,
        "user-groomer",
        "price_groomer_yearly",
        "canceled",
    );
    assert_eq!(deliver(&sync, &deleted).await, SyncOutcome::Applied);

    let record = repo.get("user-groomer").unwrap();
    assert_eq!(record.role, AccountRole::Groomer);
    assert_eq!(record.billing_interval, Some(BillingInterval::Yearly));
    assert_eq!(record.status, "canceled");
    assert_eq!(record.last_processed_event_id.as_deref(), Some("evt_3"));
    // The row survives cancellation; role reverts via status, not deletion.
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn redelivered_event_applies_once() {
    let repo = Arc::new(InMemorySubscriptions::new());
    let sync = synchronizer(repo.clone());
    let payload = subscription_event(
        "evt_dup",
        "customer.subscription.created",
        1_700_000_000,
        "user-1",
        "price_vet_monthly",
        "active",
    );

    assert_eq!(deliver(&sync, &payload).await, SyncOutcome::Applied);
    assert_eq!(deliver(&sync, &payload).await, SyncOutcome::AlreadyApplied);
    assert_eq!(deliver(&sync, &payload).await, SyncOutcome::AlreadyApplied);

    let record = repo.get("user-1").unwrap();
    assert_eq!(record.last_processed_event_id.as_deref(), Some("evt_dup"));
}

#[tokio::test]
async fn out_of_order_delivery_keeps_newer_state() {
    let repo = Arc::new(InMemorySubscriptions::new());
    let sync = synchronizer(repo.clone());

    let newer = subscription_event(
        "evt_new",
        "customer.subscription.updated",
        1_700_100_000,
        "user-1",
        "price_vet_monthly",
        "active",
    );
    assert_eq!(deliver(&sync, &newer).await, SyncOutcome::Applied);

    // An older event arrives late; it must not clobber the newer state.
    let stale = subscription_event(
        "evt_old",
        "customer.subscription.updated",
        1_700_000_000,
        "user-1",
        "price_vet_monthly",
        "past_due",
    );
    assert_eq!(deliver(&sync, &stale).await, SyncOutcome::Ignored);

    let record = repo.get("user-1").unwrap();
    assert_eq!(record.status, "active");
    assert_eq!(record.last_processed_event_id.as_deref(), Some("evt_new"));
}

#[tokio::test]
async fn unknown_plan_grants_free_role_but_marks_event_processed() {
    let repo = Arc::new(InMemorySubscriptions::new());
    let sync = synchronizer(repo.clone());
    let payload = subscription_event(
        "evt_legacy",
        "customer.subscription.created",
        1_700_000_000,
        "user-1",
        "price_from_2019",
        "active",
    );

    assert_eq!(deliver(&sync, &payload).await, SyncOutcome::Applied);

    let record = repo.get("user-1").unwrap();
    assert_eq!(record.role, AccountRole::Free);
    assert_eq!(record.billing_interval, None);
    assert_eq!(record.last_processed_event_id.as_deref(), Some("evt_legacy"));
}

#[tokio::test]
async fn irrelevant_event_types_are_acknowledged_without_state() {
    let repo = Arc::new(InMemorySubscriptions::new());
    let sync = synchronizer(repo.clone());
    let payload = subscription_event(
        "evt_invoice",
        "invoice.payment_succeeded",
        1_700_000_000,
        "user-1",
        "price_vet_monthly",
        "active",
    );

    assert_eq!(deliver(&sync, &payload).await, SyncOutcome::Ignored);
    assert_eq!(repo.len(), 0);
}

// =============================================================================
// Authenticity Tests
// =============================================================================

#[tokio::test]
async fn unsigned_delivery_is_rejected_without_side_effects() {
    let repo = Arc::new(InMemorySubscriptions::new());
    let sync = synchronizer(repo.clone());
    let payload = subscription_event(
        "evt_forged",
        "customer.subscription.created",
        1_700_000_000,
        "user-1",
        "price_vet_monthly",
        "active",
    );
    let timestamp = chrono::Utc::now().timestamp();
    let forged = format!("t={},v1={}", timestamp, "f".repeat(64));

    let result = sync.handle_event(payload.as_bytes(), &forged).await;

    assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn replayed_stale_signature_is_rejected() {
    let repo = Arc::new(InMemorySubscriptions::new());
    let sync = synchronizer(repo.clone());
    let payload = subscription_event(
        "evt_replay",
        "customer.subscription.created",
        1_700_000_000,
        "user-1",
        "price_vet_monthly",
        "active",
    );

    // Signature generated ten minutes ago, outside the freshness window.
    let timestamp = chrono::Utc::now().timestamp() - 600;
    let mut mac =
        Hmac::<Sha256>::new_from_slice(SIGNING_SECRET.as_bytes()).expect("HMAC accepts any key");
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    let header = format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()));

    let result = sync.handle_event(payload.as_bytes(), &header).await;

    assert!(matches!(result, Err(WebhookError::TimestampOutOfRange)));
    assert_eq!(repo.len(), 0);
}
