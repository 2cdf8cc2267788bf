//! Claim-status repository implementation

use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::StatusId;
use domain_claims::StatusDef;

use crate::error::DatabaseError;

/// Repository for the configurable claim-status table
#[derive(Debug, Clone)]
pub struct StatusRepository {
    pool: PgPool,
}

impl StatusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists every configured status in display order
    pub async fn list(&self) -> Result<Vec<StatusDef>, DatabaseError> {
        let rows = sqlx::query_as::<_, StatusRow>(
            r#"
            SELECT status_id, name, color, icon, sort_order, active
            FROM claim_statuses
            ORDER BY sort_order ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StatusRow::into_domain).collect())
    }
}

/// Database row for a claim status
#[derive(Debug, Clone, sqlx::FromRow)]
struct StatusRow {
    status_id: Uuid,
    name: String,
    color: String,
    icon: String,
    sort_order: i32,
    active: bool,
}

impl StatusRow {
    fn into_domain(self) -> StatusDef {
        StatusDef {
            id: StatusId::from_uuid(self.status_id),
            name: self.name,
            color: self.color,
            icon: self.icon,
            order: self.sort_order,
            active: self.active,
        }
    }
}
