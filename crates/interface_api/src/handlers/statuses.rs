//! Status handlers

use axum::{extract::State, http::StatusCode, Json};

use core_kernel::Clock;
use domain_claims::AuditEvent;

use crate::auth::Claims;
use crate::dto::statuses::{StatusDto, StatusListResponse};
use crate::AppState;

/// Lists the configurable claim statuses
///
/// Served through the registry cache; within the five-minute TTL repeated
/// calls do not touch the database.
pub async fn list_statuses(
    _staff: Claims,
    State(state): State<AppState>,
) -> Json<StatusListResponse> {
    let statuses = state.registry.get().await;
    Json(StatusListResponse {
        status: statuses.into_iter().map(StatusDto::from).collect(),
    })
}

/// Busts the status cache after an out-of-band mutation
pub async fn invalidate_cache(staff: Claims, State(state): State<AppState>) -> StatusCode {
    state.registry.invalidate().await;

    state.record_audit(AuditEvent::new(
        staff.sub,
        "status_cache_invalidated",
        None,
        None,
        state.clock.now(),
    ));

    StatusCode::NO_CONTENT
}
