//! Admin-user repository implementation
//!
//! Credential verification is delegated to PostgreSQL: password hashes are
//! produced and checked with pgcrypto's `crypt()`, so plaintext passwords
//! never leave the query and no hashing code runs in the service.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for admin-dashboard users
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the user when the email/password pair matches
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller: both come back as `None`.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserRow>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, display_name, role, is_active, created_at
            FROM admin_users
            WHERE email = $1
              AND password_hash = crypt($2, password_hash)
            "#,
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves a user profile by identifier
    pub async fn get(&self, user_id: Uuid) -> Result<Option<UserRow>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, display_name, role, is_active, created_at
            FROM admin_users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

/// Database row for an admin user
///
/// The password hash is deliberately not selected into this struct.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
