//! PostgreSQL implementation of ConsultRequestRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::admission::{ConsultRequest, ConsultStatus};
use crate::domain::foundation::{
    AnimalId, ConsultRequestId, DomainError, ErrorCode, ProfessionalId, Timestamp, UserId,
};
use crate::ports::{ConsultRequestFilter, ConsultRequestRepository};

/// PostgreSQL implementation of the ConsultRequestRepository port.
pub struct PostgresConsultRequestRepository {
    pool: PgPool,
}

impl PostgresConsultRequestRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a consult request.
#[derive(Debug, sqlx::FromRow)]
struct ConsultRequestRow {
    id: Uuid,
    owner_id: String,
    professional_id: String,
    animal_id: String,
    animal_name: Option<String>,
    owner_name: Option<String>,
    message: Option<String>,
    status: String,
    is_emergency: bool,
    emergency_code: Option<String>,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl TryFrom<ConsultRequestRow> for ConsultRequest {
    type Error = DomainError;

    fn try_from(row: ConsultRequestRow) -> Result<Self, Self::Error> {
        let status = ConsultStatus::parse(&row.status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid status value: {}", row.status),
            )
        })?;

        Ok(ConsultRequest {
            id: ConsultRequestId::from_uuid(row.id),
            owner_id: UserId::new(&row.owner_id)
                .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
            professional_id: ProfessionalId::new(&row.professional_id)
                .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
            animal_id: AnimalId::new(&row.animal_id)
                .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
            animal_name: row.animal_name,
            owner_name: row.owner_name,
            message: row.message,
            status,
            is_emergency: row.is_emergency,
            emergency_code: row.emergency_code,
            created_at: Timestamp::from_datetime(row.created_at),
            expires_at: Timestamp::from_datetime(row.expires_at),
        })
    }
}

#[async_trait]
impl ConsultRequestRepository for PostgresConsultRequestRepository {
    async fn insert(&self, request: &ConsultRequest) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO consult_requests (
                id, owner_id, professional_id, animal_id, animal_name, owner_name,
                message, status, is_emergency, emergency_code, created_at, expires_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.owner_id.as_str())
        .bind(request.professional_id.as_str())
        .bind(request.animal_id.as_str())
        .bind(&request.animal_name)
        .bind(&request.owner_name)
        .bind(&request.message)
        .bind(request.status.as_str())
        .bind(request.is_emergency)
        .bind(&request.emergency_code)
        .bind(request.created_at.as_datetime())
        .bind(request.expires_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert consult request: {}", e),
            )
        })?;

        Ok(())
    }

    async fn count_pending(&self, professional_id: &ProfessionalId) -> Result<u32, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM consult_requests
            WHERE professional_id = $1 AND status = 'pending'
            "#,
        )
        .bind(professional_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count pending requests: {}", e),
            )
        })?;

        Ok(count as u32)
    }

    async fn list_for_professional(
        &self,
        professional_id: &ProfessionalId,
        filter: &ConsultRequestFilter,
    ) -> Result<Vec<ConsultRequest>, DomainError> {
        let status = filter.status.map(|s| s.as_str());
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let rows: Vec<ConsultRequestRow> = sqlx::query_as(
            r#"
            SELECT id, owner_id, professional_id, animal_id, animal_name, owner_name,
                   message, status, is_emergency, emergency_code, created_at, expires_at
            FROM consult_requests
            WHERE professional_id = $1
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL
                   OR animal_name ILIKE '%' || $3 || '%'
                   OR owner_name ILIKE '%' || $3 || '%')
            ORDER BY is_emergency DESC, created_at DESC
            "#,
        )
        .bind(professional_id.as_str())
        .bind(status)
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list consult requests: {}", e),
            )
        })?;

        rows.into_iter().map(ConsultRequest::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ConsultRequestRow {
        ConsultRequestRow {
            id: Uuid::new_v4(),
            owner_id: "owner-1".to_string(),
            professional_id: "pro-1".to_string(),
            animal_id: "animal-1".to_string(),
            animal_name: Some("Biscuit".to_string()),
            owner_name: None,
            message: None,
            status: "pending".to_string(),
            is_emergency: false,
            emergency_code: None,
            created_at: Utc::now(),
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_domain_entity() {
        let row = sample_row();
        let id = row.id;

        let request = ConsultRequest::try_from(row).unwrap();

        assert_eq!(request.id.as_uuid(), &id);
        assert_eq!(request.status, ConsultStatus::Pending);
        assert_eq!(request.animal_name.as_deref(), Some("Biscuit"));
    }

    #[test]
    fn row_with_invalid_status_fails_conversion() {
        let mut row = sample_row();
        row.status = "archived".to_string();

        assert!(ConsultRequest::try_from(row).is_err());
    }

    #[test]
    fn row_with_empty_owner_id_fails_conversion() {
        let mut row = sample_row();
        row.owner_id = "".to_string();

        assert!(ConsultRequest::try_from(row).is_err());
    }
}
