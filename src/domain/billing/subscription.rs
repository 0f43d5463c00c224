//! Local subscription record mirroring the processor's lifecycle state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use super::role::{AccountRole, BillingInterval};

/// At most one subscription record exists per user.
///
/// Mutated exclusively by the synchronizer, keyed by the `user_id` carried
/// in event metadata. Never deleted: a lapsed subscription reverts to the
/// free role via a status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub user_id: UserId,
    pub role: AccountRole,
    pub billing_interval: Option<BillingInterval>,

    /// Free-text mirror of the processor lifecycle status
    /// (active, trialing, past_due, canceled, unpaid, incomplete).
    pub status: String,

    pub current_period_end: Option<Timestamp>,
    pub cancel_at_period_end: bool,
    pub external_customer_id: Option<String>,
    pub external_subscription_id: Option<String>,

    /// Identifier of the most recent event fully applied to this record.
    pub last_processed_event_id: Option<String>,

    /// Creation time of that event, used to reject stale out-of-order
    /// deliveries.
    pub last_event_at: Option<Timestamp>,
}

impl SubscriptionRecord {
    /// Returns true if the given event id has already been applied.
    pub fn has_applied(&self, event_id: &str) -> bool {
        self.last_processed_event_id.as_deref() == Some(event_id)
    }

    /// Returns true if this record was written from an event strictly
    /// newer than `event_at`, meaning the incoming event is stale.
    pub fn supersedes(&self, event_at: Timestamp) -> bool {
        match self.last_event_at {
            Some(applied_at) => applied_at.is_after(&event_at),
            None => false,
        }
    }
}
