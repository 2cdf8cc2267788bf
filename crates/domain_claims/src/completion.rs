//! Completion links for manager-created claims
//!
//! A manager can open a claim on a client's behalf and send the client a
//! link to complete it without full authentication. The link embeds a
//! UUID token valid for 30 days; requesting a link while an unexpired
//! token exists reuses it, and an expired token is replaced transparently.
//!
//! Audit records for link issuance and access are written off the request
//! path: the write is spawned, and its failure is logged and discarded.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use core_kernel::{ClaimNumber, Clock, SinistroId};

use crate::claim::Sinistro;
use crate::error::ClaimError;
use crate::ports::{AuditEvent, AuditSink, SinistroStore};

/// Token lifetime from (re)generation
pub const TOKEN_LIFETIME_DAYS: i64 = 30;

/// A completion link ready to hand to a client
#[derive(Debug, Clone)]
pub struct CompletionLink {
    pub url: String,
    pub token: Uuid,
    pub expires_at: DateTime<Utc>,
    pub numero_sinistro: ClaimNumber,
}

/// Issues and validates completion links
pub struct CompletionLinkService {
    store: Arc<dyn SinistroStore>,
    audit: Arc<dyn AuditSink>,
    clock: Arc<dyn Clock>,
    base_url: String,
}

impl CompletionLinkService {
    pub fn new(
        store: Arc<dyn SinistroStore>,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            audit,
            clock,
            base_url: base_url.into(),
        }
    }

    /// Issues a link for the claim, reusing an unexpired token
    ///
    /// Fails with `NotFound` when the claim is absent and `Forbidden` when
    /// it was not created by a manager on a client's behalf.
    pub async fn issue_or_refresh(&self, id: SinistroId) -> Result<CompletionLink, ClaimError> {
        let claim = self
            .store
            .get(id)
            .await?
            .ok_or(ClaimError::NotFound(id))?;

        if !claim.created_by_manager {
            return Err(ClaimError::Forbidden);
        }

        let now = self.clock.now();
        let (token, expires_at) = if claim.has_valid_token(now) {
            (
                claim.completion_token.ok_or_else(|| {
                    ClaimError::store("token flagged valid but missing")
                })?,
                claim.token_expires_at.ok_or_else(|| {
                    ClaimError::store("token expiry flagged valid but missing")
                })?,
            )
        } else {
            let token = Uuid::new_v4();
            let expires_at = now + Duration::days(TOKEN_LIFETIME_DAYS);
            self.store.save_completion_token(id, token, expires_at).await?;
            (token, expires_at)
        };

        let url = format!(
            "{}/completar-ocorrencia/{}?token={}",
            self.base_url.trim_end_matches('/'),
            claim.id.as_uuid(),
            token
        );

        self.record_audit(AuditEvent::new(
            "manager",
            "completion_link_issued",
            Some(id),
            None,
            now,
        ));

        Ok(CompletionLink {
            url,
            token,
            expires_at,
            numero_sinistro: claim.numero_sinistro,
        })
    }

    /// Validates a link and returns the claim it unlocks
    ///
    /// `NotFound` covers both a missing claim and a token mismatch, so the
    /// response does not reveal whether the claim id exists. Token bytes
    /// are compared in constant time.
    pub async fn validate(&self, id: SinistroId, token: Uuid) -> Result<Sinistro, ClaimError> {
        let claim = self
            .store
            .get(id)
            .await?
            .ok_or(ClaimError::NotFound(id))?;

        let stored = claim.completion_token.ok_or(ClaimError::NotFound(id))?;
        if !constant_time_eq(stored.as_bytes(), token.as_bytes()) {
            return Err(ClaimError::NotFound(id));
        }

        let now = self.clock.now();
        let expires_at = claim.token_expires_at.ok_or(ClaimError::Expired)?;
        if expires_at <= now {
            return Err(ClaimError::Expired);
        }

        self.record_audit(AuditEvent::new(
            "client",
            "completion_link_accessed",
            Some(id),
            None,
            now,
        ));

        Ok(claim)
    }

    /// Spawns the audit write off the request path
    fn record_audit(&self, event: AuditEvent) {
        let audit = Arc::clone(&self.audit);
        tokio::spawn(async move {
            if let Err(err) = audit.record(event).await {
                warn!(error = %err, "audit write failed");
            }
        });
    }
}

/// Byte comparison without data-dependent early exit
fn constant_time_eq(a: &[u8; 16], b: &[u8; 16]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert!(constant_time_eq(a.as_bytes(), a.as_bytes()));
        assert!(!constant_time_eq(a.as_bytes(), b.as_bytes()));
    }
}
