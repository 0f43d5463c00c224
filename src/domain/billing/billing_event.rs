//! Billing webhook event types.
//!
//! Defines the structures for parsing payment-processor webhook payloads.
//! Only fields relevant to subscription synchronization are captured.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A billing lifecycle event delivered by the payment processor.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillingEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    /// Type of event (e.g., "customer.subscription.updated").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the event was created (Unix timestamp).
    pub created: i64,

    /// Container for event-specific data.
    pub data: BillingEventData,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillingEventData {
    /// The subscription-like resource that triggered the event.
    pub object: serde_json::Value,
}

impl BillingEvent {
    /// Parse the event type into a known enum variant.
    pub fn parsed_type(&self) -> BillingEventType {
        BillingEventType::from_str(&self.event_type)
    }

    /// Deserialize the data object as a subscription resource.
    pub fn subscription_object(&self) -> Result<SubscriptionObject, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}

/// Subscription lifecycle event types this system applies.
///
/// Everything else is ignored before any datastore access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingEventType {
    SubscriptionCreated,
    SubscriptionUpdated,
    SubscriptionDeleted,
    Unknown,
}

impl BillingEventType {
    /// Parse an event type from its wire string.
    pub fn from_str(s: &str) -> Self {
        match s {
            "customer.subscription.created" => Self::SubscriptionCreated,
            "customer.subscription.updated" => Self::SubscriptionUpdated,
            "customer.subscription.deleted" => Self::SubscriptionDeleted,
            _ => Self::Unknown,
        }
    }

    /// Returns true for the lifecycle types the synchronizer applies.
    pub fn is_relevant(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// The subscription resource embedded in a lifecycle event.
///
/// All fields are optional on the wire; the synchronizer decides which
/// absences are fatal (none) and which demote the event to ignored
/// (missing user metadata).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubscriptionObject {
    /// Processor-side subscription identifier.
    pub id: Option<String>,

    /// Processor-side customer identifier.
    pub customer: Option<String>,

    /// Processor lifecycle status (active, trialing, past_due, ...).
    pub status: Option<String>,

    /// End of the current billing period (Unix timestamp).
    pub current_period_end: Option<i64>,

    /// Whether the subscription terminates at period end.
    #[serde(default)]
    pub cancel_at_period_end: bool,

    /// Caller-supplied metadata; carries our `user_id`.
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Plan reference (older payloads).
    pub plan: Option<PlanRef>,

    /// Line items (newer payloads); first price wins.
    pub items: Option<SubscriptionItems>,
}

/// Reference to a plan/price on the processor side.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlanRef {
    pub id: String,
}

/// Line-item list on a subscription resource.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubscriptionItems {
    #[serde(default)]
    pub data: Vec<SubscriptionItem>,
}

/// A single subscription line item.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubscriptionItem {
    pub price: Option<PlanRef>,
}

impl SubscriptionObject {
    /// The user this event applies to, from caller-supplied metadata.
    pub fn user_id(&self) -> Option<&str> {
        self.metadata.get("user_id").map(String::as_str)
    }

    /// The plan identifier, preferring the legacy `plan` field over the
    /// first line item's price.
    pub fn plan_identifier(&self) -> Option<&str> {
        if let Some(plan) = &self.plan {
            return Some(plan.id.as_str());
        }
        self.items
            .as_ref()?
            .data
            .first()?
            .price
            .as_ref()
            .map(|p| p.id.as_str())
    }
}
