//! The intake flow state machine
//!
//! The wizard is an explicit finite-state machine: `step_sequence` computes
//! the ordered steps the current draft implies, `can_proceed` is the pure
//! guard evaluated before every advance, and `IntakeFlow` tracks the
//! current position plus the history used for backward navigation.
//!
//! Selecting a claim type resets the position to the start of its
//! sequence; it never discards captured data, so steps the user is not
//! redoing keep their photos and text fields.

use serde::{Deserialize, Serialize};

use crate::documents::{is_other_vehicle_label, PhotoKind};
use crate::draft::{ClaimType, FormDraft};
use crate::error::IntakeError;
use crate::validation::{validate_cpf, validate_plate};

/// One step of the intake wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStep {
    /// Pick collision, theft, or robbery
    ClaimTypeSelection,
    /// Collision: photos of the claimant's own vehicle
    OwnVehiclePhotos,
    /// Collision: counterparty name/plate
    ThirdPartyInfo,
    /// Collision: photos of the other vehicle
    ThirdPartyPhotos,
    /// Theft family: "were the documents also stolen?"
    DocumentsBranch,
    /// Documents retained: capture the CNH
    LicenseCapture,
    /// Documents retained: capture the CRLV
    RegistrationCapture,
    /// Documents stolen: free-text name/CPF/plate instead of captures
    IdentityDetails,
    /// Theft family: photos of the vehicle (pre-theft records)
    VehiclePhotos,
    /// Police report capture
    PoliceReport,
    /// Assemble and submit
    Finalize,
}

/// Computes the ordered step sequence the draft currently implies
///
/// Before a claim type is chosen only the selection step exists; the theft
/// family grows by one step at a time until the documents branch is
/// answered.
pub fn step_sequence(draft: &FormDraft) -> Vec<IntakeStep> {
    use IntakeStep::*;

    match draft.claim_type {
        ClaimType::Unset => vec![ClaimTypeSelection],
        ClaimType::Collision => vec![
            ClaimTypeSelection,
            OwnVehiclePhotos,
            ThirdPartyInfo,
            ThirdPartyPhotos,
            PoliceReport,
            Finalize,
        ],
        ClaimType::Theft | ClaimType::Robbery => match draft.documents_stolen {
            None => vec![ClaimTypeSelection, DocumentsBranch],
            Some(false) => vec![
                ClaimTypeSelection,
                DocumentsBranch,
                LicenseCapture,
                RegistrationCapture,
                VehiclePhotos,
                PoliceReport,
                Finalize,
            ],
            Some(true) => vec![
                ClaimTypeSelection,
                DocumentsBranch,
                IdentityDetails,
                VehiclePhotos,
                PoliceReport,
                Finalize,
            ],
        },
    }
}

/// Pure guard: may the wizard advance past `step` given the draft?
pub fn can_proceed(step: IntakeStep, draft: &FormDraft) -> bool {
    use IntakeStep::*;

    match step {
        ClaimTypeSelection => draft.claim_type != ClaimType::Unset,
        OwnVehiclePhotos => draft
            .photos_of_kind(PhotoKind::VehiclePhoto)
            .any(|p| !p.label.as_deref().map(is_other_vehicle_label).unwrap_or(false)),
        ThirdPartyInfo => {
            let named = draft
                .third_party_name
                .as_deref()
                .map(|n| !n.trim().is_empty())
                .unwrap_or(false);
            let plated = draft
                .third_party_plate
                .as_deref()
                .map(validate_plate)
                .unwrap_or(false);
            named || plated
        }
        ThirdPartyPhotos => draft
            .photos_of_kind(PhotoKind::VehiclePhoto)
            .any(|p| p.label.as_deref().map(is_other_vehicle_label).unwrap_or(false)),
        DocumentsBranch => draft.documents_stolen.is_some(),
        LicenseCapture => draft.photos_of_kind(PhotoKind::License).next().is_some(),
        RegistrationCapture => draft.photos_of_kind(PhotoKind::Registration).next().is_some(),
        IdentityDetails => {
            let named = draft
                .claimant_name
                .as_deref()
                .map(|n| !n.trim().is_empty())
                .unwrap_or(false);
            let cpf_ok = draft
                .claimant_cpf
                .as_deref()
                .map(validate_cpf)
                .unwrap_or(false);
            let plate_ok = draft
                .vehicle_plate
                .as_deref()
                .map(validate_plate)
                .unwrap_or(false);
            named && cpf_ok && plate_ok
        }
        VehiclePhotos => draft.photos_of_kind(PhotoKind::VehiclePhoto).next().is_some(),
        PoliceReport => draft.photos_of_kind(PhotoKind::PoliceReport).next().is_some(),
        Finalize => true,
    }
}

/// Position tracking for one wizard session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeFlow {
    current: IntakeStep,
    visited: Vec<IntakeStep>,
}

impl IntakeFlow {
    /// Starts a new flow at claim-type selection
    pub fn new() -> Self {
        Self {
            current: IntakeStep::ClaimTypeSelection,
            visited: Vec::new(),
        }
    }

    /// The step the wizard is showing
    pub fn current(&self) -> IntakeStep {
        self.current
    }

    /// True once the finalize step is reached
    pub fn is_complete(&self) -> bool {
        self.current == IntakeStep::Finalize
    }

    /// Selects (or changes) the claim type
    ///
    /// An explicit user action: records the type on the draft and resets
    /// the flow to the start of the sequence that type implies. Captured
    /// data is preserved by `FormDraft::set_claim_type`.
    pub fn select_claim_type(&mut self, draft: &mut FormDraft, claim_type: ClaimType) {
        draft.set_claim_type(claim_type);
        self.current = IntakeStep::ClaimTypeSelection;
        self.visited.clear();
    }

    /// Answers the documents-stolen question
    pub fn answer_documents_branch(
        &mut self,
        draft: &mut FormDraft,
        stolen: bool,
    ) -> Result<(), IntakeError> {
        if self.current != IntakeStep::DocumentsBranch {
            return Err(IntakeError::UnexpectedEvent {
                step: self.current,
                event: "answer_documents_branch",
            });
        }
        draft.documents_stolen = Some(stolen);
        Ok(())
    }

    /// Advances to the next step when the current guard allows it
    pub fn advance(&mut self, draft: &FormDraft) -> Result<IntakeStep, IntakeError> {
        if !can_proceed(self.current, draft) {
            return Err(IntakeError::CannotProceed(self.current));
        }

        let sequence = step_sequence(draft);
        let position = sequence
            .iter()
            .position(|s| *s == self.current)
            .ok_or(IntakeError::UnexpectedEvent {
                step: self.current,
                event: "advance",
            })?;

        let next = *sequence
            .get(position + 1)
            .ok_or(IntakeError::UnexpectedEvent {
                step: self.current,
                event: "advance",
            })?;

        self.visited.push(self.current);
        self.current = next;
        Ok(next)
    }

    /// Steps back to the previously shown step, keeping captured data
    ///
    /// Returns `None` at the start of the flow.
    pub fn back(&mut self) -> Option<IntakeStep> {
        let previous = self.visited.pop()?;
        self.current = previous;
        Some(previous)
    }
}

impl Default for IntakeFlow {
    fn default() -> Self {
        Self::new()
    }
}
