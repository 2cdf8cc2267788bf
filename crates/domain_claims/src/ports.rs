//! Async ports to external collaborators
//!
//! The claims domain talks to the relational store, the status endpoint,
//! and the audit log exclusively through these traits. The in-memory
//! implementations at the bottom back the test suites.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

use core_kernel::{AuditEventId, SinistroId};

use crate::claim::{Sinistro, StatusDef};
use crate::error::ClaimError;

/// Read access to persisted claim numbers
#[async_trait]
pub trait ClaimNumberStore: Send + Sync {
    /// Returns the greatest persisted claim number under the given prefix,
    /// compared as strings (safe because the suffix is zero-padded)
    async fn latest_with_prefix(&self, prefix: &str) -> Result<Option<String>, ClaimError>;
}

/// Source of the dynamic status list
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_statuses(&self) -> Result<Vec<StatusDef>, ClaimError>;
}

/// Claim persistence used by the completion-link service
#[async_trait]
pub trait SinistroStore: Send + Sync {
    async fn get(&self, id: SinistroId) -> Result<Option<Sinistro>, ClaimError>;

    async fn save_completion_token(
        &self,
        id: SinistroId,
        token: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ClaimError>;
}

/// An audit-log entry
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub id: AuditEventId,
    pub actor: String,
    pub action: String,
    pub sinistro_id: Option<SinistroId>,
    pub detail: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(
        actor: impl Into<String>,
        action: impl Into<String>,
        sinistro_id: Option<SinistroId>,
        detail: Option<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AuditEventId::new(),
            actor: actor.into(),
            action: action.into(),
            sinistro_id,
            detail,
            occurred_at,
        }
    }
}

/// Audit-log sink; insertions are best-effort from the caller's view
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, event: AuditEvent) -> Result<(), ClaimError>;
}

/// In-memory claim store for tests
#[derive(Default)]
pub struct InMemorySinistroStore {
    claims: Mutex<HashMap<SinistroId, Sinistro>>,
}

impl InMemorySinistroStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, claim: Sinistro) {
        self.claims.lock().await.insert(claim.id, claim);
    }
}

#[async_trait]
impl SinistroStore for InMemorySinistroStore {
    async fn get(&self, id: SinistroId) -> Result<Option<Sinistro>, ClaimError> {
        Ok(self.claims.lock().await.get(&id).cloned())
    }

    async fn save_completion_token(
        &self,
        id: SinistroId,
        token: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ClaimError> {
        let mut claims = self.claims.lock().await;
        let claim = claims.get_mut(&id).ok_or(ClaimError::NotFound(id))?;
        claim.completion_token = Some(token);
        claim.token_expires_at = Some(expires_at);
        Ok(())
    }
}

/// In-memory claim-number store with a switchable failure mode
#[derive(Default)]
pub struct InMemoryClaimNumberStore {
    latest: Mutex<Option<String>>,
    fail: AtomicBool,
}

impl InMemoryClaimNumberStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_latest(&self, latest: impl Into<String>) {
        *self.latest.lock().await = Some(latest.into());
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl ClaimNumberStore for InMemoryClaimNumberStore {
    async fn latest_with_prefix(&self, prefix: &str) -> Result<Option<String>, ClaimError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ClaimError::store("claim-number query failed"));
        }
        let latest = self.latest.lock().await;
        Ok(latest.as_ref().filter(|n| n.starts_with(prefix)).cloned())
    }
}

/// In-memory status source counting its fetches
#[derive(Default)]
pub struct InMemoryStatusSource {
    statuses: Mutex<Vec<StatusDef>>,
    fail: AtomicBool,
    fetches: AtomicUsize,
}

impl InMemoryStatusSource {
    pub fn new(statuses: Vec<StatusDef>) -> Self {
        Self {
            statuses: Mutex::new(statuses),
            fail: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub async fn set_statuses(&self, statuses: Vec<StatusDef>) {
        *self.statuses.lock().await = statuses;
    }
}

#[async_trait]
impl StatusSource for InMemoryStatusSource {
    async fn fetch_statuses(&self) -> Result<Vec<StatusDef>, ClaimError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ClaimError::store("status endpoint unreachable"));
        }
        Ok(self.statuses.lock().await.clone())
    }
}

/// Audit sink recording every event, optionally failing
#[derive(Default)]
pub struct RecordingAuditSink {
    events: Mutex<Vec<AuditEvent>>,
    fail: AtomicBool,
}

impl RecordingAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub async fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn record(&self, event: AuditEvent) -> Result<(), ClaimError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ClaimError::store("audit insert failed"));
        }
        self.events.lock().await.push(event);
        Ok(())
    }
}
