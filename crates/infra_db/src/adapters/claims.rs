//! PostgreSQL adapters for the claims-domain ports

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::SinistroId;
use domain_claims::{
    AuditEvent, AuditSink, ClaimError, ClaimNumberStore, Sinistro, SinistroStore, StatusDef,
    StatusSource,
};

use crate::repositories::{AuditRepository, SinistroRepository, StatusRepository};

fn store_error(err: crate::error::DatabaseError) -> ClaimError {
    ClaimError::store(err.to_string())
}

/// Claim persistence and claim-number reads over the sinistros table
#[derive(Debug, Clone)]
pub struct PgSinistroStore {
    repo: SinistroRepository,
}

impl PgSinistroStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: SinistroRepository::new(pool),
        }
    }
}

#[async_trait]
impl SinistroStore for PgSinistroStore {
    async fn get(&self, id: SinistroId) -> Result<Option<Sinistro>, ClaimError> {
        self.repo.get(id).await.map_err(store_error)
    }

    async fn save_completion_token(
        &self,
        id: SinistroId,
        token: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ClaimError> {
        self.repo
            .save_completion_token(id, token, expires_at)
            .await
            .map_err(store_error)
    }
}

#[async_trait]
impl ClaimNumberStore for PgSinistroStore {
    async fn latest_with_prefix(&self, prefix: &str) -> Result<Option<String>, ClaimError> {
        self.repo
            .max_claim_number(prefix)
            .await
            .map_err(store_error)
    }
}

/// Status list served from the claim_statuses table
#[derive(Debug, Clone)]
pub struct PgStatusSource {
    repo: StatusRepository,
}

impl PgStatusSource {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: StatusRepository::new(pool),
        }
    }
}

#[async_trait]
impl StatusSource for PgStatusSource {
    async fn fetch_statuses(&self) -> Result<Vec<StatusDef>, ClaimError> {
        self.repo.list().await.map_err(store_error)
    }
}

/// Audit sink writing to the audit_events table
#[derive(Debug, Clone)]
pub struct PgAuditSink {
    repo: AuditRepository,
}

impl PgAuditSink {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: AuditRepository::new(pool),
        }
    }
}

#[async_trait]
impl AuditSink for PgAuditSink {
    async fn record(&self, event: AuditEvent) -> Result<(), ClaimError> {
        self.repo.insert(&event).await.map_err(store_error)
    }
}
