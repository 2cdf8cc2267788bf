//! Sinistro handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{Clock, SinistroId};
use domain_claims::{AuditEvent, Sinistro};
use domain_intake::{validate_cpf, validate_plate, ClaimType};
use infra_db::SinistroRepository;

use crate::auth::Claims;
use crate::dto::sinistros::{CreateSinistroRequest, SinistroResponse, UpdateStatusRequest};
use crate::{error::ApiError, AppState};

/// Intake submission: creates a claim from a finalized draft
///
/// Open to unauthenticated clients; a valid staff token marks the claim
/// as manager-created, which is what later allows a completion link.
pub async fn create_sinistro(
    State(state): State<AppState>,
    staff: Option<Claims>,
    Json(request): Json<CreateSinistroRequest>,
) -> Result<(StatusCode, Json<SinistroResponse>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    if request.claim_type == ClaimType::Unset {
        return Err(ApiError::Validation(
            "A claim type must be selected before submission".to_string(),
        ));
    }

    let submission = request.into_submission();

    // The wizard validates as the user types; re-check here so a
    // hand-crafted payload cannot store malformed identifiers.
    if let Some(cpf) = &submission.claimant_cpf {
        if !validate_cpf(cpf) {
            return Err(ApiError::Validation("Invalid claimant CPF".to_string()));
        }
    }
    for plate in [&submission.vehicle_plate, &submission.third_party_plate]
        .into_iter()
        .flatten()
    {
        if !validate_plate(plate) {
            return Err(ApiError::Validation(format!("Invalid plate {:?}", plate)));
        }
    }

    let created_by_manager = staff.is_some();
    let numero = state.numbers.generate().await;
    let now = state.clock.now();

    let photos = submission.photos.clone();
    let sinistro = Sinistro::from_submission(numero, submission, created_by_manager, now);

    let repo = SinistroRepository::new(state.pool.clone());
    repo.create(&sinistro, &photos).await?;

    state.record_audit(AuditEvent::new(
        staff.map(|c| c.sub).unwrap_or_else(|| "client".to_string()),
        "sinistro_created",
        Some(sinistro.id),
        Some(sinistro.numero_sinistro.to_string()),
        now,
    ));

    Ok((StatusCode::CREATED, Json(sinistro.into())))
}

/// Lists claims, newest first
pub async fn list_sinistros(
    _staff: Claims,
    State(state): State<AppState>,
) -> Result<Json<Vec<SinistroResponse>>, ApiError> {
    let repo = SinistroRepository::new(state.pool.clone());
    let claims = repo.list(100).await?;
    Ok(Json(claims.into_iter().map(Into::into).collect()))
}

/// Gets a claim by ID
pub async fn get_sinistro(
    _staff: Claims,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SinistroResponse>, ApiError> {
    let id = SinistroId::from_uuid(id);
    let repo = SinistroRepository::new(state.pool.clone());
    let claim = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Sinistro {}", id)))?;
    Ok(Json(claim.into()))
}

/// Updates a claim's status
///
/// The target must be an active status from the registry, and claims
/// already in a terminal status accept no further transitions.
pub async fn update_status(
    staff: Claims,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<SinistroResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let id = SinistroId::from_uuid(id);
    let repo = SinistroRepository::new(state.pool.clone());
    let claim = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Sinistro {}", id)))?;

    let target = state
        .registry
        .find(&request.status)
        .await
        .ok_or_else(|| ApiError::Validation(format!("Unknown status {:?}", request.status)))?;

    claim.ensure_can_transition(&target)?;

    let now = state.clock.now();
    let updated = repo
        .update_status(id, &target.name, request.reason.as_deref(), now)
        .await?;

    state.record_audit(AuditEvent::new(
        staff.sub,
        "status_changed",
        Some(id),
        Some(format!("{} -> {}", claim.status, target.name)),
        now,
    ));

    Ok(Json(updated.into()))
}
