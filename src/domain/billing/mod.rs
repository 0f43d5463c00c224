//! Billing domain module.
//!
//! Handles billing webhook verification, plan mapping, and idempotent
//! subscription synchronization.
//!
//! # Module Structure
//!
//! - `role` - account roles and billing intervals
//! - `plan_catalog` - static plan → role mapping
//! - `billing_event` - webhook event payload types
//! - `webhook_verifier` - HMAC signature verification
//! - `webhook_errors` - webhook error taxonomy
//! - `subscription` - the local SubscriptionRecord
//! - `synchronizer` - apply-if-new event processing

mod billing_event;
mod plan_catalog;
mod role;
mod subscription;
mod synchronizer;
mod webhook_errors;
mod webhook_verifier;

pub use billing_event::{
    BillingEvent, BillingEventData, BillingEventType, PlanRef, SubscriptionItem,
    SubscriptionItems, SubscriptionObject,
};
pub use plan_catalog::resolve_plan;
pub use role::{AccountRole, BillingInterval};
pub use subscription::SubscriptionRecord;
pub use synchronizer::{SubscriptionSynchronizer, SyncOutcome};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{SignatureHeader, WebhookSignatureVerifier};
