//! Subscription record repository port.
//!
//! One record per user, written exclusively by the synchronizer. The
//! upsert carries full state; implementations key on `user_id` and
//! overwrite every mutable column (last-write-wins, never a merge).

use async_trait::async_trait;

use crate::domain::billing::SubscriptionRecord;
use crate::domain::foundation::{DomainError, UserId};

/// Repository port for subscription record persistence.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Find the record for a user, if any.
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SubscriptionRecord>, DomainError>;

    /// Insert or fully overwrite the record keyed by `user_id`.
    async fn upsert(&self, record: &SubscriptionRecord) -> Result<(), DomainError>;
}
