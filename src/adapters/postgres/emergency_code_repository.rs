//! PostgreSQL implementation of EmergencyCodeRepository.
//!
//! `consume` relies on a conditional UPDATE so concurrent submissions
//! racing on the same code resolve to exactly one winner at the database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::admission::EmergencyCode;
use crate::domain::foundation::{
    DomainError, EmergencyCodeId, ErrorCode, ProfessionalId, Timestamp,
};
use crate::ports::EmergencyCodeRepository;

/// PostgreSQL implementation of the EmergencyCodeRepository port.
pub struct PostgresEmergencyCodeRepository {
    pool: PgPool,
}

impl PostgresEmergencyCodeRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an emergency code.
#[derive(Debug, sqlx::FromRow)]
struct EmergencyCodeRow {
    id: Uuid,
    professional_id: String,
    code: String,
    expires_at: DateTime<Utc>,
    is_used: bool,
}

impl TryFrom<EmergencyCodeRow> for EmergencyCode {
    type Error = DomainError;

    fn try_from(row: EmergencyCodeRow) -> Result<Self, Self::Error> {
        Ok(EmergencyCode {
            id: EmergencyCodeId::from_uuid(row.id),
            professional_id: ProfessionalId::new(&row.professional_id)
                .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
            code: row.code,
            expires_at: Timestamp::from_datetime(row.expires_at),
            is_used: row.is_used,
        })
    }
}

#[async_trait]
impl EmergencyCodeRepository for PostgresEmergencyCodeRepository {
    async fn insert(&self, code: &EmergencyCode) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO emergency_codes (id, professional_id, code, expires_at, is_used)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(code.id.as_uuid())
        .bind(code.professional_id.as_str())
        .bind(&code.code)
        .bind(code.expires_at.as_datetime())
        .bind(code.is_used)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert emergency code: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_code(
        &self,
        professional_id: &ProfessionalId,
        code: &str,
    ) -> Result<Option<EmergencyCode>, DomainError> {
        let row: Option<EmergencyCodeRow> = sqlx::query_as(
            r#"
            SELECT id, professional_id, code, expires_at, is_used
            FROM emergency_codes
            WHERE professional_id = $1 AND code = $2
            ORDER BY expires_at DESC
            LIMIT 1
            "#,
        )
        .bind(professional_id.as_str())
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find emergency code: {}", e),
            )
        })?;

        row.map(EmergencyCode::try_from).transpose()
    }

    async fn consume(&self, id: &EmergencyCodeId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE emergency_codes
            SET is_used = TRUE
            WHERE id = $1 AND is_used = FALSE
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to consume emergency code: {}", e),
            )
        })?;

        Ok(result.rows_affected() == 1)
    }
}
