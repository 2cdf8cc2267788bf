//! Integration tests for the claims domain: status registry TTL behavior
//! and the completion-link lifecycle.

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

use core_kernel::{ClaimNumber, Clock, ManualClock, SinistroId, StatusId};
use domain_claims::ports::{InMemorySinistroStore, InMemoryStatusSource, RecordingAuditSink};
use domain_claims::{
    ClaimError, CompletionLinkService, Sinistro, StatusDef, StatusRegistry, TOKEN_LIFETIME_DAYS,
};
use domain_intake::ClaimType;

fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    ))
}

fn status(name: &str) -> StatusDef {
    StatusDef {
        id: StatusId::new(),
        name: name.to_string(),
        color: "#3b82f6".to_string(),
        icon: "clock".to_string(),
        order: 1,
        active: true,
    }
}

fn sinistro(created_by_manager: bool) -> Sinistro {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    Sinistro {
        id: SinistroId::new(),
        numero_sinistro: ClaimNumber::first(2024),
        claim_type: ClaimType::Collision,
        status: Sinistro::INITIAL_STATUS.to_string(),
        created_by_manager,
        completion_token: None,
        token_expires_at: None,
        claimant_name: Some("Maria Souza".to_string()),
        claimant_cpf: Some("529.982.247-25".to_string()),
        vehicle_plate: Some("ABC-1234".to_string()),
        description: None,
        created_at: now,
        updated_at: now,
    }
}

mod status_registry_tests {
    use super::*;

    #[tokio::test]
    async fn test_second_call_within_ttl_hits_cache() {
        let source = Arc::new(InMemoryStatusSource::new(vec![status("pendente")]));
        let registry = StatusRegistry::new(source.clone(), manual_clock());

        registry.get().await;
        registry.get().await;

        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_ttl_refetches() {
        let source = Arc::new(InMemoryStatusSource::new(vec![status("pendente")]));
        let clock = manual_clock();
        let registry = StatusRegistry::new(source.clone(), clock.clone());

        registry.get().await;
        clock.advance(Duration::minutes(5) + Duration::seconds(1));
        registry.get().await;

        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_failure_serves_defaults_without_poisoning_cache() {
        let source = Arc::new(InMemoryStatusSource::new(vec![status("personalizado")]));
        let registry = StatusRegistry::new(source.clone(), manual_clock());

        source.set_failing(true);
        let served = registry.get().await;
        assert_eq!(served.len(), 6);
        assert!(served.iter().any(|s| s.name == "pendente"));

        // The failed fetch must not have primed the cache: the next call
        // goes back to the source even though no TTL has elapsed.
        source.set_failing(false);
        let served = registry.get().await;
        assert_eq!(served.len(), 1);
        assert_eq!(served[0].name, "personalizado");
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let source = Arc::new(InMemoryStatusSource::new(vec![status("pendente")]));
        let registry = StatusRegistry::new(source.clone(), manual_clock());

        registry.get().await;
        registry.invalidate().await;
        registry.get().await;

        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_find_is_case_insensitive() {
        let source = Arc::new(InMemoryStatusSource::new(vec![status("em_analise")]));
        let registry = StatusRegistry::new(source, manual_clock());

        assert!(registry.find("EM_ANALISE").await.is_some());
        assert!(registry.find("inexistente").await.is_none());
    }
}

mod completion_link_tests {
    use super::*;

    struct Fixture {
        store: Arc<InMemorySinistroStore>,
        audit: Arc<RecordingAuditSink>,
        clock: Arc<ManualClock>,
        service: CompletionLinkService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemorySinistroStore::new());
        let audit = Arc::new(RecordingAuditSink::new());
        let clock = manual_clock();
        let service = CompletionLinkService::new(
            store.clone(),
            audit.clone(),
            clock.clone(),
            "https://sinistros.example.com",
        );
        Fixture {
            store,
            audit,
            clock,
            service,
        }
    }

    #[tokio::test]
    async fn test_issue_for_missing_claim_is_not_found() {
        let fx = fixture();
        let result = fx.service.issue_or_refresh(SinistroId::new()).await;
        assert!(matches!(result, Err(ClaimError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_issue_for_client_created_claim_is_forbidden() {
        let fx = fixture();
        let claim = sinistro(false);
        let id = claim.id;
        fx.store.insert(claim).await;

        let result = fx.service.issue_or_refresh(id).await;
        assert!(matches!(result, Err(ClaimError::Forbidden)));
    }

    #[tokio::test]
    async fn test_unexpired_token_is_reused() {
        let fx = fixture();
        let claim = sinistro(true);
        let id = claim.id;
        fx.store.insert(claim).await;

        let first = fx.service.issue_or_refresh(id).await.unwrap();
        let second = fx.service.issue_or_refresh(id).await.unwrap();

        assert_eq!(first.token, second.token);
        assert_eq!(first.expires_at, second.expires_at);
        assert!(first.url.contains(&format!("token={}", first.token)));
        assert!(first.url.contains("/completar-ocorrencia/"));
    }

    #[tokio::test]
    async fn test_expired_token_is_replaced() {
        let fx = fixture();
        let claim = sinistro(true);
        let id = claim.id;
        fx.store.insert(claim).await;

        let first = fx.service.issue_or_refresh(id).await.unwrap();

        fx.clock
            .advance(Duration::days(TOKEN_LIFETIME_DAYS) + Duration::hours(1));
        let second = fx.service.issue_or_refresh(id).await.unwrap();

        assert_ne!(first.token, second.token);
        assert_eq!(
            second.expires_at,
            fx.clock.now() + Duration::days(TOKEN_LIFETIME_DAYS)
        );
    }

    #[tokio::test]
    async fn test_validate_returns_claim() {
        let fx = fixture();
        let claim = sinistro(true);
        let id = claim.id;
        fx.store.insert(claim).await;

        let link = fx.service.issue_or_refresh(id).await.unwrap();
        let validated = fx.service.validate(id, link.token).await.unwrap();
        assert_eq!(validated.id, id);
    }

    #[tokio::test]
    async fn test_validate_with_wrong_token_is_not_found() {
        let fx = fixture();
        let claim = sinistro(true);
        let id = claim.id;
        fx.store.insert(claim).await;

        fx.service.issue_or_refresh(id).await.unwrap();
        let result = fx.service.validate(id, Uuid::new_v4()).await;
        assert!(matches!(result, Err(ClaimError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_validate_after_expiry_is_expired() {
        let fx = fixture();
        let claim = sinistro(true);
        let id = claim.id;
        fx.store.insert(claim).await;

        let link = fx.service.issue_or_refresh(id).await.unwrap();
        fx.clock
            .advance(Duration::days(TOKEN_LIFETIME_DAYS) + Duration::seconds(1));

        let result = fx.service.validate(id, link.token).await;
        assert!(matches!(result, Err(ClaimError::Expired)));
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_block_issuance() {
        let fx = fixture();
        fx.audit.set_failing(true);
        let claim = sinistro(true);
        let id = claim.id;
        fx.store.insert(claim).await;

        assert!(fx.service.issue_or_refresh(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_issuance_is_audited() {
        let fx = fixture();
        let claim = sinistro(true);
        let id = claim.id;
        fx.store.insert(claim).await;

        fx.service.issue_or_refresh(id).await.unwrap();

        // The audit write is spawned off the request path; give it a few
        // scheduler turns to land.
        for _ in 0..50 {
            if !fx.audit.events().await.is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let events = fx.audit.events().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, "completion_link_issued");
        assert_eq!(events[0].sinistro_id, Some(id));
    }
}
