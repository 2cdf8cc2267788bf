//! The accumulating intake draft
//!
//! A `FormDraft` holds everything one browser session captures before a
//! claim exists on the server. Finalizing assembles the draft into a
//! `ClaimSubmission`; submitting that payload is the caller's concern.

use serde::{Deserialize, Serialize};

use crate::documents::{PhotoDocument, PhotoKind};
use crate::error::IntakeError;
use crate::validation::{format_cpf, format_plate, validate_cpf, validate_plate};
use core_kernel::PhotoId;

/// The kind of claim being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    /// Collision with another vehicle
    Collision,
    /// Theft (furto) - vehicle taken without confrontation
    Theft,
    /// Robbery (roubo) - vehicle taken under threat
    Robbery,
    /// No type selected yet
    Unset,
}

impl ClaimType {
    /// Returns true for the theft-family types that share the
    /// documents-stolen branch
    pub fn is_theft_family(&self) -> bool {
        matches!(self, ClaimType::Theft | ClaimType::Robbery)
    }

    /// Stable key used for persistence and wire formats
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Collision => "collision",
            ClaimType::Theft => "theft",
            ClaimType::Robbery => "robbery",
            ClaimType::Unset => "unset",
        }
    }
}

impl std::str::FromStr for ClaimType {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "collision" => Ok(ClaimType::Collision),
            "theft" => Ok(ClaimType::Theft),
            "robbery" => Ok(ClaimType::Robbery),
            "unset" => Ok(ClaimType::Unset),
            other => Err(IntakeError::InvalidField {
                field: "claim_type",
                reason: format!("unknown claim type {:?}", other),
            }),
        }
    }
}

/// Client-held state of one in-progress claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDraft {
    pub claim_type: ClaimType,
    /// Answer to "were the documents also stolen?" (theft family only)
    pub documents_stolen: Option<bool>,
    pub photos: Vec<PhotoDocument>,
    /// Free-text identity, collected in lieu of document photos
    pub claimant_name: Option<String>,
    pub claimant_cpf: Option<String>,
    pub vehicle_plate: Option<String>,
    /// Counterparty details for the collision flow
    pub third_party_name: Option<String>,
    pub third_party_plate: Option<String>,
    pub description: Option<String>,
}

impl FormDraft {
    /// Creates an empty draft with no claim type selected
    pub fn new() -> Self {
        Self {
            claim_type: ClaimType::Unset,
            documents_stolen: None,
            photos: Vec::new(),
            claimant_name: None,
            claimant_cpf: None,
            vehicle_plate: None,
            third_party_name: None,
            third_party_plate: None,
            description: None,
        }
    }

    /// Selects the claim type, resetting the branch answer it governs
    ///
    /// Captured photos and text fields survive: backward navigation and
    /// type changes must not discard data for steps not being redone.
    pub fn set_claim_type(&mut self, claim_type: ClaimType) {
        self.claim_type = claim_type;
        self.documents_stolen = None;
    }

    /// Adds a captured photo to the draft
    pub fn add_photo(&mut self, photo: PhotoDocument) {
        self.photos.push(photo);
    }

    /// Removes a photo from the draft, returning it when present
    pub fn remove_photo(&mut self, id: PhotoId) -> Option<PhotoDocument> {
        let index = self.photos.iter().position(|p| p.id == id)?;
        Some(self.photos.remove(index))
    }

    /// Iterates the photos of one kind
    pub fn photos_of_kind(&self, kind: PhotoKind) -> impl Iterator<Item = &PhotoDocument> {
        self.photos.iter().filter(move |p| p.kind == kind)
    }

    /// Assembles the draft into a submission payload
    ///
    /// Validates the fields the selected flow requires; the state machine
    /// normally guarantees these already, but finalize re-checks so the
    /// payload is trustworthy on its own.
    pub fn finalize(&self) -> Result<ClaimSubmission, IntakeError> {
        if self.claim_type == ClaimType::Unset {
            return Err(IntakeError::IncompleteDraft(
                "no claim type selected".to_string(),
            ));
        }

        if self.claim_type.is_theft_family() && self.documents_stolen.is_none() {
            return Err(IntakeError::IncompleteDraft(
                "documents-stolen branch not answered".to_string(),
            ));
        }

        let claimant_cpf = match &self.claimant_cpf {
            Some(cpf) if !validate_cpf(cpf) => {
                return Err(IntakeError::InvalidField {
                    field: "claimant_cpf",
                    reason: "CPF check digits do not match".to_string(),
                })
            }
            Some(cpf) => Some(format_cpf(cpf)),
            None => None,
        };

        let vehicle_plate = match &self.vehicle_plate {
            Some(plate) if !validate_plate(plate) => {
                return Err(IntakeError::InvalidField {
                    field: "vehicle_plate",
                    reason: "not a legacy or Mercosul plate".to_string(),
                })
            }
            Some(plate) => Some(format_plate(plate)),
            None => None,
        };

        Ok(ClaimSubmission {
            claim_type: self.claim_type,
            documents_stolen: self.documents_stolen.unwrap_or(false),
            claimant_name: self.claimant_name.clone(),
            claimant_cpf,
            vehicle_plate,
            third_party_name: self.third_party_name.clone(),
            third_party_plate: self.third_party_plate.as_deref().map(format_plate),
            description: self.description.clone(),
            photos: self
                .photos
                .iter()
                .map(|p| SubmittedPhoto {
                    kind: p.kind,
                    label: p.label.clone(),
                    file_name: p.file_name.clone(),
                })
                .collect(),
        })
    }
}

impl Default for FormDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// The payload handed to the store when a draft is finalized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimSubmission {
    pub claim_type: ClaimType,
    pub documents_stolen: bool,
    pub claimant_name: Option<String>,
    pub claimant_cpf: Option<String>,
    pub vehicle_plate: Option<String>,
    pub third_party_name: Option<String>,
    pub third_party_plate: Option<String>,
    pub description: Option<String>,
    pub photos: Vec<SubmittedPhoto>,
}

/// Photo reference carried in a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedPhoto {
    pub kind: PhotoKind,
    pub label: Option<String>,
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::PhotoDocument;
    use chrono::{TimeZone, Utc};

    fn photo(kind: PhotoKind, label: Option<&str>) -> PhotoDocument {
        PhotoDocument::capture(
            kind,
            label.map(str::to_string),
            Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            "jpg",
            vec![1, 2, 3],
        )
    }

    #[test]
    fn test_finalize_requires_claim_type() {
        let draft = FormDraft::new();
        assert!(matches!(
            draft.finalize(),
            Err(IntakeError::IncompleteDraft(_))
        ));
    }

    #[test]
    fn test_finalize_requires_branch_answer_for_theft() {
        let mut draft = FormDraft::new();
        draft.set_claim_type(ClaimType::Theft);
        assert!(matches!(
            draft.finalize(),
            Err(IntakeError::IncompleteDraft(_))
        ));
    }

    #[test]
    fn test_finalize_formats_identity_fields() {
        let mut draft = FormDraft::new();
        draft.set_claim_type(ClaimType::Robbery);
        draft.documents_stolen = Some(true);
        draft.claimant_name = Some("Maria Souza".to_string());
        draft.claimant_cpf = Some("52998224725".to_string());
        draft.vehicle_plate = Some("abc1d23".to_string());

        let submission = draft.finalize().unwrap();
        assert_eq!(submission.claimant_cpf.as_deref(), Some("529.982.247-25"));
        assert_eq!(submission.vehicle_plate.as_deref(), Some("ABC-1D23"));
        assert!(submission.documents_stolen);
    }

    #[test]
    fn test_finalize_rejects_bad_cpf() {
        let mut draft = FormDraft::new();
        draft.set_claim_type(ClaimType::Theft);
        draft.documents_stolen = Some(true);
        draft.claimant_cpf = Some("52998224726".to_string());

        assert!(matches!(
            draft.finalize(),
            Err(IntakeError::InvalidField { field: "claimant_cpf", .. })
        ));
    }

    #[test]
    fn test_finalize_carries_photo_references() {
        let mut draft = FormDraft::new();
        draft.set_claim_type(ClaimType::Collision);
        draft.add_photo(photo(PhotoKind::VehiclePhoto, Some("Frente do Seu Veículo")));
        draft.add_photo(photo(PhotoKind::PoliceReport, None));

        let submission = draft.finalize().unwrap();
        assert_eq!(submission.photos.len(), 2);
        assert!(submission.photos[0].file_name.starts_with("frente_veiculo_"));
        assert!(submission.photos[1].file_name.starts_with("boletim_"));
    }

    #[test]
    fn test_set_claim_type_resets_branch_answer() {
        let mut draft = FormDraft::new();
        draft.set_claim_type(ClaimType::Theft);
        draft.documents_stolen = Some(true);

        draft.set_claim_type(ClaimType::Collision);
        assert_eq!(draft.documents_stolen, None);
    }

    #[test]
    fn test_remove_photo() {
        let mut draft = FormDraft::new();
        let captured = photo(PhotoKind::License, None);
        let id = captured.id;
        draft.add_photo(captured);

        assert!(draft.remove_photo(id).is_some());
        assert!(draft.photos.is_empty());
        assert!(draft.remove_photo(id).is_none());
    }
}
