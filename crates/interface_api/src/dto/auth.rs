//! Authentication DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use infra_db::repositories::users::UserRow;

/// Login request body
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

/// Authenticated user profile
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: uuid::Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

impl From<UserRow> for UserDto {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.user_id,
            email: row.email,
            display_name: row.display_name,
            role: row.role,
        }
    }
}

/// Login response body
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserDto,
    pub token: String,
    pub expires_in: u64,
}
