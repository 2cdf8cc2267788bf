//! Sinistro DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_claims::Sinistro;
use domain_intake::draft::SubmittedPhoto;
use domain_intake::{ClaimSubmission, ClaimType, PhotoKind};

/// Photo reference submitted with a finalized draft
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedPhotoDto {
    pub kind: PhotoKind,
    pub label: Option<String>,
    pub file_name: String,
}

impl From<SubmittedPhotoDto> for SubmittedPhoto {
    fn from(dto: SubmittedPhotoDto) -> Self {
        Self {
            kind: dto.kind,
            label: dto.label,
            file_name: dto.file_name,
        }
    }
}

/// Intake submission payload (a finalized draft)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSinistroRequest {
    pub claim_type: ClaimType,
    #[serde(default)]
    pub documents_stolen: bool,
    #[validate(length(max = 200, message = "is too long"))]
    pub claimant_name: Option<String>,
    pub claimant_cpf: Option<String>,
    pub vehicle_plate: Option<String>,
    #[validate(length(max = 200, message = "is too long"))]
    pub third_party_name: Option<String>,
    pub third_party_plate: Option<String>,
    #[validate(length(max = 2000, message = "is too long"))]
    pub description: Option<String>,
    #[serde(default)]
    pub photos: Vec<SubmittedPhotoDto>,
}

impl CreateSinistroRequest {
    /// Converts the request into the domain submission payload
    pub fn into_submission(self) -> ClaimSubmission {
        ClaimSubmission {
            claim_type: self.claim_type,
            documents_stolen: self.documents_stolen,
            claimant_name: self.claimant_name,
            claimant_cpf: self.claimant_cpf,
            vehicle_plate: self.vehicle_plate,
            third_party_name: self.third_party_name,
            third_party_plate: self.third_party_plate,
            description: self.description,
            photos: self.photos.into_iter().map(Into::into).collect(),
        }
    }
}

/// Status-change request body
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub status: String,
    #[validate(length(max = 500, message = "is too long"))]
    pub reason: Option<String>,
}

/// Claim record returned by the API
#[derive(Debug, Serialize)]
pub struct SinistroResponse {
    pub id: Uuid,
    pub numero_sinistro: String,
    pub claim_type: ClaimType,
    pub status: String,
    pub created_by_manager: bool,
    pub claimant_name: Option<String>,
    pub claimant_cpf: Option<String>,
    pub vehicle_plate: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Sinistro> for SinistroResponse {
    fn from(claim: Sinistro) -> Self {
        Self {
            id: *claim.id.as_uuid(),
            numero_sinistro: claim.numero_sinistro.to_string(),
            claim_type: claim.claim_type,
            status: claim.status,
            created_by_manager: claim.created_by_manager,
            claimant_name: claim.claimant_name,
            claimant_cpf: claim.claimant_cpf,
            vehicle_plate: claim.vehicle_plate,
            description: claim.description,
            created_at: claim.created_at,
            updated_at: claim.updated_at,
        }
    }
}
