//! Completion-link handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use core_kernel::SinistroId;

use crate::auth::Claims;
use crate::dto::completion::{CompletionLinkResponse, ValidateLinkQuery, ValidateLinkResponse};
use crate::{error::ApiError, AppState};

/// Issues (or refreshes) a completion link for a manager-created claim
///
/// An unexpired existing token is reused; an expired or absent one is
/// replaced with a fresh 30-day token.
pub async fn issue_link(
    _staff: Claims,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompletionLinkResponse>, ApiError> {
    let link = state
        .completion
        .issue_or_refresh(SinistroId::from_uuid(id))
        .await?;
    Ok(Json(link.into()))
}

/// Validates a completion link and returns the claim it unlocks
///
/// Public: this is the endpoint behind the link a client receives. A
/// missing claim and a wrong token both map to 404; an expired token
/// to 410.
pub async fn validate_link(
    State(state): State<AppState>,
    Query(query): Query<ValidateLinkQuery>,
) -> Result<Json<ValidateLinkResponse>, ApiError> {
    let sinistro = state
        .completion
        .validate(SinistroId::from_uuid(query.sinistro_id), query.token)
        .await?;

    Ok(Json(ValidateLinkResponse {
        success: true,
        valid: true,
        sinistro: sinistro.into(),
    }))
}
