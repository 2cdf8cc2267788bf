//! Authentication handlers

use axum::{extract::State, Json};
use validator::Validate;

use infra_db::UserRepository;

use crate::auth::{create_token, is_staff_role};
use crate::dto::auth::{LoginRequest, LoginResponse, UserDto};
use crate::{error::ApiError, AppState};

/// Dashboard login
///
/// 401 covers bad credentials and inactive or missing profiles alike, so
/// the response does not reveal which of the three failed. A valid login
/// with a role outside admin/manager is 403.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let users = UserRepository::new(state.pool.clone());
    let user = users
        .verify_credentials(&request.email, &request.password)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !user.is_active {
        return Err(ApiError::Unauthorized);
    }

    if !is_staff_role(&user.role) {
        return Err(ApiError::Forbidden(
            "Only admin and manager roles may access the dashboard".to_string(),
        ));
    }

    let token = create_token(
        &user.user_id.to_string(),
        &user.role,
        &state.config.jwt_secret,
        state.config.jwt_expiration_secs,
    )
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(LoginResponse {
        user: UserDto::from(user),
        token,
        expires_in: state.config.jwt_expiration_secs,
    }))
}
