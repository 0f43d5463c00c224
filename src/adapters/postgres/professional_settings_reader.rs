//! PostgreSQL implementation of ProfessionalSettingsReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::admission::ProfessionalSettings;
use crate::domain::foundation::{DomainError, ErrorCode, ProfessionalId};
use crate::ports::ProfessionalSettingsReader;

/// PostgreSQL implementation of the ProfessionalSettingsReader port.
pub struct PostgresProfessionalSettingsReader {
    pool: PgPool,
}

impl PostgresProfessionalSettingsReader {
    /// Creates a new reader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of professional settings.
#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    professional_id: String,
    cap_pending: i32,
    blocked: bool,
}

impl TryFrom<SettingsRow> for ProfessionalSettings {
    type Error = DomainError;

    fn try_from(row: SettingsRow) -> Result<Self, Self::Error> {
        if row.cap_pending < 0 {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid cap_pending value: {}", row.cap_pending),
            ));
        }
        Ok(ProfessionalSettings {
            professional_id: ProfessionalId::new(&row.professional_id)
                .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
            cap_pending: row.cap_pending as u32,
            blocked: row.blocked,
        })
    }
}

#[async_trait]
impl ProfessionalSettingsReader for PostgresProfessionalSettingsReader {
    async fn find(
        &self,
        professional_id: &ProfessionalId,
    ) -> Result<Option<ProfessionalSettings>, DomainError> {
        let row: Option<SettingsRow> = sqlx::query_as(
            r#"
            SELECT professional_id, cap_pending, blocked
            FROM professional_settings
            WHERE professional_id = $1
            "#,
        )
        .bind(professional_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find professional settings: {}", e),
            )
        })?;

        row.map(ProfessionalSettings::try_from).transpose()
    }
}
