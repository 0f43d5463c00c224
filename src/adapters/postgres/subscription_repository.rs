//! PostgreSQL implementation of SubscriptionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::billing::{AccountRole, BillingInterval, SubscriptionRecord};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::SubscriptionRepository;

/// PostgreSQL implementation of the SubscriptionRepository port.
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscription record.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    user_id: String,
    role: String,
    billing_interval: Option<String>,
    status: String,
    current_period_end: Option<DateTime<Utc>>,
    cancel_at_period_end: bool,
    external_customer_id: Option<String>,
    external_subscription_id: Option<String>,
    last_processed_event_id: Option<String>,
    last_event_at: Option<DateTime<Utc>>,
}

impl TryFrom<SubscriptionRow> for SubscriptionRecord {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let role = AccountRole::parse(&row.role).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid role value: {}", row.role),
            )
        })?;
        let billing_interval = row
            .billing_interval
            .as_deref()
            .map(|s| {
                BillingInterval::parse(s).ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Invalid billing interval value: {}", s),
                    )
                })
            })
            .transpose()?;

        Ok(SubscriptionRecord {
            user_id: UserId::new(&row.user_id)
                .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
            role,
            billing_interval,
            status: row.status,
            current_period_end: row.current_period_end.map(Timestamp::from_datetime),
            cancel_at_period_end: row.cancel_at_period_end,
            external_customer_id: row.external_customer_id,
            external_subscription_id: row.external_subscription_id,
            last_processed_event_id: row.last_processed_event_id,
            last_event_at: row.last_event_at.map(Timestamp::from_datetime),
        })
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SubscriptionRecord>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT user_id, role, billing_interval, status, current_period_end,
                   cancel_at_period_end, external_customer_id, external_subscription_id,
                   last_processed_event_id, last_event_at
            FROM subscription_records
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find subscription record: {}", e),
            )
        })?;

        row.map(SubscriptionRecord::try_from).transpose()
    }

    async fn upsert(&self, record: &SubscriptionRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO subscription_records (
                user_id, role, billing_interval, status, current_period_end,
                cancel_at_period_end, external_customer_id, external_subscription_id,
                last_processed_event_id, last_event_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                role = EXCLUDED.role,
                billing_interval = EXCLUDED.billing_interval,
                status = EXCLUDED.status,
                current_period_end = EXCLUDED.current_period_end,
                cancel_at_period_end = EXCLUDED.cancel_at_period_end,
                external_customer_id = EXCLUDED.external_customer_id,
                external_subscription_id = EXCLUDED.external_subscription_id,
                last_processed_event_id = EXCLUDED.last_processed_event_id,
                last_event_at = EXCLUDED.last_event_at,
                updated_at = NOW()
            "#,
        )
        .bind(record.user_id.as_str())
        .bind(record.role.as_str())
        .bind(record.billing_interval.map(|i| i.as_str()))
        .bind(&record.status)
        .bind(record.current_period_end.map(|t| *t.as_datetime()))
        .bind(record.cancel_at_period_end)
        .bind(&record.external_customer_id)
        .bind(&record.external_subscription_id)
        .bind(&record.last_processed_event_id)
        .bind(record.last_event_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to upsert subscription record: {}", e),
            )
        })?;

        Ok(())
    }
}
