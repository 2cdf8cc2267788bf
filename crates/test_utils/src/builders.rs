//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use core_kernel::{ClaimNumber, SinistroId};
use domain_claims::Sinistro;
use domain_intake::{ClaimType, FormDraft, PhotoDocument, PhotoKind};

use crate::fixtures::{StringFixtures, TemporalFixtures};

/// Builder for constructing persisted test claims
pub struct SinistroBuilder {
    id: SinistroId,
    numero_sinistro: ClaimNumber,
    claim_type: ClaimType,
    status: String,
    created_by_manager: bool,
    completion_token: Option<Uuid>,
    token_expires_at: Option<DateTime<Utc>>,
    claimant_name: Option<String>,
    claimant_cpf: Option<String>,
    vehicle_plate: Option<String>,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl Default for SinistroBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SinistroBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: SinistroId::new(),
            numero_sinistro: StringFixtures::claim_number().parse().unwrap(),
            claim_type: ClaimType::Collision,
            status: Sinistro::INITIAL_STATUS.to_string(),
            created_by_manager: false,
            completion_token: None,
            token_expires_at: None,
            claimant_name: Some(StringFixtures::claimant_name().to_string()),
            claimant_cpf: Some(StringFixtures::formatted_cpf().to_string()),
            vehicle_plate: Some(StringFixtures::legacy_plate().to_string()),
            description: None,
            created_at: TemporalFixtures::intake_instant(),
        }
    }

    /// Sets the sinistro ID
    pub fn with_id(mut self, id: SinistroId) -> Self {
        self.id = id;
        self
    }

    /// Sets the claim number
    pub fn with_numero(mut self, numero: ClaimNumber) -> Self {
        self.numero_sinistro = numero;
        self
    }

    /// Sets the claim type
    pub fn with_claim_type(mut self, claim_type: ClaimType) -> Self {
        self.claim_type = claim_type;
        self
    }

    /// Sets the current status name
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Marks the claim as opened by a manager on a client's behalf
    pub fn created_by_manager(mut self) -> Self {
        self.created_by_manager = true;
        self
    }

    /// Attaches a completion token with the given expiry
    pub fn with_token(mut self, token: Uuid, expires_at: DateTime<Utc>) -> Self {
        self.completion_token = Some(token);
        self.token_expires_at = Some(expires_at);
        self
    }

    /// Sets the creation instant
    pub fn created_at(mut self, instant: DateTime<Utc>) -> Self {
        self.created_at = instant;
        self
    }

    /// Sets the free-text description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builds the claim record
    pub fn build(self) -> Sinistro {
        Sinistro {
            id: self.id,
            numero_sinistro: self.numero_sinistro,
            claim_type: self.claim_type,
            status: self.status,
            created_by_manager: self.created_by_manager,
            completion_token: self.completion_token,
            token_expires_at: self.token_expires_at,
            claimant_name: self.claimant_name,
            claimant_cpf: self.claimant_cpf,
            vehicle_plate: self.vehicle_plate,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Builder for constructing intake drafts mid-flow
pub struct DraftBuilder {
    draft: FormDraft,
}

impl Default for DraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftBuilder {
    /// Creates a builder holding an empty draft
    pub fn new() -> Self {
        Self {
            draft: FormDraft::new(),
        }
    }

    /// Selects the claim type
    pub fn claim_type(mut self, claim_type: ClaimType) -> Self {
        self.draft.set_claim_type(claim_type);
        self
    }

    /// Answers the documents-stolen branch
    pub fn documents_stolen(mut self, stolen: bool) -> Self {
        self.draft.documents_stolen = Some(stolen);
        self
    }

    /// Captures one photo of the given kind and label
    pub fn with_photo(mut self, kind: PhotoKind, label: Option<&str>) -> Self {
        self.draft.add_photo(PhotoDocument::capture(
            kind,
            label.map(str::to_string),
            TemporalFixtures::capture_instant(),
            "jpg",
            vec![0xFF, 0xD8, 0xFF],
        ));
        self
    }

    /// Fills the free-text identity fields with valid values
    pub fn with_identity(mut self) -> Self {
        self.draft.claimant_name = Some(StringFixtures::claimant_name().to_string());
        self.draft.claimant_cpf = Some(StringFixtures::valid_cpf().to_string());
        self.draft.vehicle_plate = Some(StringFixtures::mercosul_plate().to_string());
        self
    }

    /// Fills the collision third-party fields
    pub fn with_third_party(mut self, name: &str, plate: &str) -> Self {
        self.draft.third_party_name = Some(name.to_string());
        self.draft.third_party_plate = Some(plate.to_string());
        self
    }

    /// Builds the draft
    pub fn build(self) -> FormDraft {
        self.draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sinistro_builder_defaults_parse() {
        let claim = SinistroBuilder::new().build();
        assert_eq!(claim.status, Sinistro::INITIAL_STATUS);
        assert!(!claim.created_by_manager);
        assert_eq!(claim.numero_sinistro.year(), 2024);
    }

    #[test]
    fn test_draft_builder_produces_finalizable_theft_draft() {
        let draft = DraftBuilder::new()
            .claim_type(ClaimType::Theft)
            .documents_stolen(true)
            .with_identity()
            .with_photo(PhotoKind::VehiclePhoto, Some("Frente do Seu Veículo"))
            .with_photo(PhotoKind::PoliceReport, None)
            .build();

        assert!(draft.finalize().is_ok());
    }
}
