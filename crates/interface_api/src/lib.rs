//! HTTP API Layer
//!
//! This crate provides the REST API for the sinistro system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: intake submission, claim administration, statuses,
//!   completion links, login, and the OCR proxy
//! - **Middleware**: request audit logging; authentication is enforced by
//!   the `Claims` extractor on protected handlers
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{config::ApiConfig, create_router};
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod ocr;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use core_kernel::{Clock, SystemClock};
use domain_claims::{
    AuditEvent, AuditSink, ClaimNumberGenerator, CompletionLinkService, StatusRegistry,
};
use infra_db::{PgAuditSink, PgSinistroStore, PgStatusSource};

use crate::config::ApiConfig;
use crate::handlers::{auth as auth_handlers, completion, health, ocr as ocr_handlers, sinistros, statuses};
use crate::middleware::audit_middleware;
use crate::ocr::OcrClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
    pub clock: Arc<dyn Clock>,
    pub numbers: Arc<ClaimNumberGenerator>,
    pub registry: Arc<StatusRegistry>,
    pub completion: Arc<CompletionLinkService>,
    pub ocr: OcrClient,
    audit: Arc<dyn AuditSink>,
}

impl AppState {
    /// Wires the domain services over the database pool
    pub fn new(pool: PgPool, config: ApiConfig) -> Self {
        Self::with_clock(pool, config, Arc::new(SystemClock))
    }

    /// Same wiring with an explicit clock, used by time-sensitive tests
    pub fn with_clock(pool: PgPool, config: ApiConfig, clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(PgSinistroStore::new(pool.clone()));
        let audit: Arc<dyn AuditSink> = Arc::new(PgAuditSink::new(pool.clone()));

        let numbers = Arc::new(ClaimNumberGenerator::new(
            store.clone(),
            Arc::clone(&clock),
        ));
        let registry = Arc::new(StatusRegistry::new(
            Arc::new(PgStatusSource::new(pool.clone())),
            Arc::clone(&clock),
        ));
        let completion = Arc::new(CompletionLinkService::new(
            store,
            Arc::clone(&audit),
            Arc::clone(&clock),
            config.base_url.clone(),
        ));
        let ocr = OcrClient::new(config.ocr_endpoint.clone());

        Self {
            pool,
            config,
            clock,
            numbers,
            registry,
            completion,
            ocr,
            audit,
        }
    }

    /// Records an audit event off the request path
    ///
    /// The insert is spawned; a failure is logged and discarded so it never
    /// blocks or fails the request being audited.
    pub fn record_audit(&self, event: AuditEvent) {
        let audit = Arc::clone(&self.audit);
        tokio::spawn(async move {
            if let Err(err) = audit.record(event).await {
                warn!(error = %err, "audit write failed");
            }
        });
    }
}

/// Creates the main API router
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    router_with_state(AppState::new(pool, config))
}

/// Builds the router over prepared state
pub fn router_with_state(state: AppState) -> Router {
    // Health probes stay outside /api/v1 and skip the audit layer
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Sinistro routes; POST / is the public intake submission, the rest
    // require staff credentials via the Claims extractor
    let sinistro_routes = Router::new()
        .route(
            "/",
            post(sinistros::create_sinistro).get(sinistros::list_sinistros),
        )
        .route("/:id", get(sinistros::get_sinistro))
        .route("/:id/status", put(sinistros::update_status))
        .route("/:id/completion-link", post(completion::issue_link));

    let api_routes = Router::new()
        .route("/auth/login", post(auth_handlers::login))
        .route("/completion-link", get(completion::validate_link))
        .route("/ocr", post(ocr_handlers::extract_document))
        .route("/statuses", get(statuses::list_statuses))
        .route("/statuses/invalidate", post(statuses::invalidate_cache))
        .nest("/sinistros", sinistro_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
