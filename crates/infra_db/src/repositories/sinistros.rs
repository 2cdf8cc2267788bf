//! Sinistro repository implementation
//!
//! Database access for the claim lifecycle: intake inserts, lookups,
//! status updates with history, the max-claim-number query behind the
//! number generator, and completion-token persistence.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{ClaimNumber, SinistroId};
use domain_claims::Sinistro;
use domain_intake::draft::SubmittedPhoto;

use crate::error::DatabaseError;

/// Repository for managing sinistro data
#[derive(Debug, Clone)]
pub struct SinistroRepository {
    pool: PgPool,
}

impl SinistroRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a newly finalized claim together with its photo references
    ///
    /// The claim row, its photos, and the initial status-history entry are
    /// written in one transaction.
    pub async fn create(
        &self,
        sinistro: &Sinistro,
        photos: &[SubmittedPhoto],
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sinistros (
                sinistro_id, numero_sinistro, claim_type, status,
                created_by_manager, completion_token, token_expires_at,
                claimant_name, claimant_cpf, vehicle_plate, description,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            "#,
        )
        .bind(sinistro.id.as_uuid())
        .bind(sinistro.numero_sinistro.to_string())
        .bind(sinistro.claim_type.as_str())
        .bind(&sinistro.status)
        .bind(sinistro.created_by_manager)
        .bind(sinistro.completion_token)
        .bind(sinistro.token_expires_at)
        .bind(&sinistro.claimant_name)
        .bind(&sinistro.claimant_cpf)
        .bind(&sinistro.vehicle_plate)
        .bind(&sinistro.description)
        .bind(sinistro.created_at)
        .execute(&mut *tx)
        .await?;

        for photo in photos {
            sqlx::query(
                r#"
                INSERT INTO sinistro_photos (
                    photo_id, sinistro_id, kind, label, file_name, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(sinistro.id.as_uuid())
            .bind(photo_kind_key(photo))
            .bind(&photo.label)
            .bind(&photo.file_name)
            .bind(sinistro.created_at)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO sinistro_status_history (
                history_id, sinistro_id, status, reason, changed_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(sinistro.id.as_uuid())
        .bind(&sinistro.status)
        .bind(Option::<String>::None)
        .bind(sinistro.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Retrieves a claim by its identifier
    pub async fn get(&self, id: SinistroId) -> Result<Option<Sinistro>, DatabaseError> {
        let row = sqlx::query_as::<_, SinistroRow>(
            r#"
            SELECT
                sinistro_id, numero_sinistro, claim_type, status,
                created_by_manager, completion_token, token_expires_at,
                claimant_name, claimant_cpf, vehicle_plate, description,
                created_at, updated_at
            FROM sinistros
            WHERE sinistro_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(SinistroRow::into_domain).transpose()
    }

    /// Lists claims, newest first
    pub async fn list(&self, limit: i64) -> Result<Vec<Sinistro>, DatabaseError> {
        let rows = sqlx::query_as::<_, SinistroRow>(
            r#"
            SELECT
                sinistro_id, numero_sinistro, claim_type, status,
                created_by_manager, completion_token, token_expires_at,
                claimant_name, claimant_cpf, vehicle_plate, description,
                created_at, updated_at
            FROM sinistros
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SinistroRow::into_domain).collect()
    }

    /// Updates a claim's status, recording the change in the history table
    pub async fn update_status(
        &self,
        id: SinistroId,
        status: &str,
        reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Sinistro, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sinistro_status_history (
                history_id, sinistro_id, status, reason, changed_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(id.as_uuid())
        .bind(status)
        .bind(reason)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, SinistroRow>(
            r#"
            UPDATE sinistros
            SET status = $2, updated_at = $3
            WHERE sinistro_id = $1
            RETURNING
                sinistro_id, numero_sinistro, claim_type, status,
                created_by_manager, completion_token, token_expires_at,
                claimant_name, claimant_cpf, vehicle_plate, description,
                created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(status)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Sinistro", id))?;

        tx.commit().await?;
        row.into_domain()
    }

    /// Greatest persisted claim number under the given prefix
    ///
    /// String MAX is correct here because the numeric suffix is
    /// zero-padded to a fixed width.
    pub async fn max_claim_number(&self, prefix: &str) -> Result<Option<String>, DatabaseError> {
        let max: Option<String> = sqlx::query_scalar(
            r#"
            SELECT MAX(numero_sinistro)
            FROM sinistros
            WHERE numero_sinistro LIKE $1 || '%'
            "#,
        )
        .bind(prefix)
        .fetch_one(&self.pool)
        .await?;

        Ok(max)
    }

    /// Persists a (re)generated completion token
    pub async fn save_completion_token(
        &self,
        id: SinistroId,
        token: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        let updated = sqlx::query(
            r#"
            UPDATE sinistros
            SET completion_token = $2, token_expires_at = $3, updated_at = $3
            WHERE sinistro_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Sinistro", id));
        }
        Ok(())
    }
}

fn photo_kind_key(photo: &SubmittedPhoto) -> &'static str {
    use domain_intake::PhotoKind;
    match photo.kind {
        PhotoKind::License => "license",
        PhotoKind::Registration => "registration",
        PhotoKind::VehiclePhoto => "vehicle_photo",
        PhotoKind::PoliceReport => "police_report",
    }
}

/// Database row for a sinistro
#[derive(Debug, Clone, sqlx::FromRow)]
struct SinistroRow {
    sinistro_id: Uuid,
    numero_sinistro: String,
    claim_type: String,
    status: String,
    created_by_manager: bool,
    completion_token: Option<Uuid>,
    token_expires_at: Option<DateTime<Utc>>,
    claimant_name: Option<String>,
    claimant_cpf: Option<String>,
    vehicle_plate: Option<String>,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SinistroRow {
    fn into_domain(self) -> Result<Sinistro, DatabaseError> {
        let numero_sinistro: ClaimNumber = self
            .numero_sinistro
            .parse()
            .map_err(|e| DatabaseError::InvalidStoredValue(format!("numero_sinistro: {}", e)))?;
        let claim_type = self
            .claim_type
            .parse()
            .map_err(|e| DatabaseError::InvalidStoredValue(format!("claim_type: {}", e)))?;

        Ok(Sinistro {
            id: SinistroId::from_uuid(self.sinistro_id),
            numero_sinistro,
            claim_type,
            status: self.status,
            created_by_manager: self.created_by_manager,
            completion_token: self.completion_token,
            token_expires_at: self.token_expires_at,
            claimant_name: self.claimant_name,
            claimant_cpf: self.claimant_cpf,
            vehicle_plate: self.vehicle_plate,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
