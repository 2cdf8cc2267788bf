//! Audit-log repository implementation

use sqlx::PgPool;

use domain_claims::AuditEvent;

use crate::error::DatabaseError;

/// Repository for the append-only audit log
#[derive(Debug, Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends one audit event
    pub async fn insert(&self, event: &AuditEvent) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO audit_events (
                event_id, actor, action, sinistro_id, detail, occurred_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(&event.actor)
        .bind(&event.action)
        .bind(event.sinistro_id.map(|id| *id.as_uuid()))
        .bind(&event.detail)
        .bind(event.occurred_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
