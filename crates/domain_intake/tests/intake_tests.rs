//! Comprehensive tests for the intake flow state machine

use chrono::{TimeZone, Utc};

use domain_intake::documents::{PhotoDocument, PhotoKind};
use domain_intake::draft::{ClaimType, FormDraft};
use domain_intake::flow::{can_proceed, step_sequence, IntakeFlow, IntakeStep};
use domain_intake::IntakeError;

fn photo(kind: PhotoKind, label: Option<&str>) -> PhotoDocument {
    PhotoDocument::capture(
        kind,
        label.map(str::to_string),
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        "jpg",
        vec![0xFF, 0xD8, 0xFF],
    )
}

mod sequence_tests {
    use super::*;

    #[test]
    fn test_unset_draft_has_only_selection_step() {
        let draft = FormDraft::new();
        assert_eq!(step_sequence(&draft), vec![IntakeStep::ClaimTypeSelection]);
    }

    #[test]
    fn test_collision_sequence() {
        let mut draft = FormDraft::new();
        draft.set_claim_type(ClaimType::Collision);

        assert_eq!(
            step_sequence(&draft),
            vec![
                IntakeStep::ClaimTypeSelection,
                IntakeStep::OwnVehiclePhotos,
                IntakeStep::ThirdPartyInfo,
                IntakeStep::ThirdPartyPhotos,
                IntakeStep::PoliceReport,
                IntakeStep::Finalize,
            ]
        );
    }

    #[test]
    fn test_theft_with_documents_retained_sequence() {
        let mut draft = FormDraft::new();
        draft.set_claim_type(ClaimType::Theft);
        draft.documents_stolen = Some(false);

        assert_eq!(
            step_sequence(&draft),
            vec![
                IntakeStep::ClaimTypeSelection,
                IntakeStep::DocumentsBranch,
                IntakeStep::LicenseCapture,
                IntakeStep::RegistrationCapture,
                IntakeStep::VehiclePhotos,
                IntakeStep::PoliceReport,
                IntakeStep::Finalize,
            ]
        );
    }

    #[test]
    fn test_theft_with_documents_stolen_never_exposes_captures() {
        let mut draft = FormDraft::new();
        draft.set_claim_type(ClaimType::Theft);
        draft.documents_stolen = Some(true);

        let sequence = step_sequence(&draft);
        assert!(sequence.contains(&IntakeStep::IdentityDetails));
        assert!(!sequence.contains(&IntakeStep::LicenseCapture));
        assert!(!sequence.contains(&IntakeStep::RegistrationCapture));
    }

    #[test]
    fn test_robbery_shares_theft_branching() {
        let mut draft = FormDraft::new();
        draft.set_claim_type(ClaimType::Robbery);
        assert_eq!(
            step_sequence(&draft),
            vec![IntakeStep::ClaimTypeSelection, IntakeStep::DocumentsBranch]
        );
    }
}

mod guard_tests {
    use super::*;

    #[test]
    fn test_selection_guard_requires_a_type() {
        let mut draft = FormDraft::new();
        assert!(!can_proceed(IntakeStep::ClaimTypeSelection, &draft));

        draft.set_claim_type(ClaimType::Collision);
        assert!(can_proceed(IntakeStep::ClaimTypeSelection, &draft));
    }

    #[test]
    fn test_own_vehicle_guard_ignores_other_vehicle_photos() {
        let mut draft = FormDraft::new();
        draft.set_claim_type(ClaimType::Collision);
        draft.add_photo(photo(PhotoKind::VehiclePhoto, Some("Frente do Outro Veículo")));

        assert!(!can_proceed(IntakeStep::OwnVehiclePhotos, &draft));

        draft.add_photo(photo(PhotoKind::VehiclePhoto, Some("Frente do Seu Veículo")));
        assert!(can_proceed(IntakeStep::OwnVehiclePhotos, &draft));
    }

    #[test]
    fn test_third_party_guard_accepts_name_or_plate() {
        let mut draft = FormDraft::new();
        draft.set_claim_type(ClaimType::Collision);
        assert!(!can_proceed(IntakeStep::ThirdPartyInfo, &draft));

        draft.third_party_name = Some("José Lima".to_string());
        assert!(can_proceed(IntakeStep::ThirdPartyInfo, &draft));

        draft.third_party_name = None;
        draft.third_party_plate = Some("xyz9a88".to_string());
        assert!(can_proceed(IntakeStep::ThirdPartyInfo, &draft));

        draft.third_party_plate = Some("not a plate".to_string());
        assert!(!can_proceed(IntakeStep::ThirdPartyInfo, &draft));
    }

    #[test]
    fn test_identity_guard_requires_all_three_fields() {
        let mut draft = FormDraft::new();
        draft.set_claim_type(ClaimType::Theft);
        draft.documents_stolen = Some(true);

        draft.claimant_name = Some("Maria Souza".to_string());
        draft.claimant_cpf = Some("529.982.247-25".to_string());
        assert!(!can_proceed(IntakeStep::IdentityDetails, &draft));

        draft.vehicle_plate = Some("ABC1234".to_string());
        assert!(can_proceed(IntakeStep::IdentityDetails, &draft));

        draft.claimant_cpf = Some("529.982.247-26".to_string());
        assert!(!can_proceed(IntakeStep::IdentityDetails, &draft));
    }

    #[test]
    fn test_photo_step_guards() {
        let mut draft = FormDraft::new();
        draft.set_claim_type(ClaimType::Theft);
        draft.documents_stolen = Some(false);

        assert!(!can_proceed(IntakeStep::LicenseCapture, &draft));
        draft.add_photo(photo(PhotoKind::License, None));
        assert!(can_proceed(IntakeStep::LicenseCapture, &draft));

        assert!(!can_proceed(IntakeStep::RegistrationCapture, &draft));
        draft.add_photo(photo(PhotoKind::Registration, None));
        assert!(can_proceed(IntakeStep::RegistrationCapture, &draft));

        assert!(!can_proceed(IntakeStep::PoliceReport, &draft));
        draft.add_photo(photo(PhotoKind::PoliceReport, None));
        assert!(can_proceed(IntakeStep::PoliceReport, &draft));
    }
}

mod flow_tests {
    use super::*;

    /// Walks the collision flow end to end.
    #[test]
    fn test_collision_walkthrough() {
        let mut draft = FormDraft::new();
        let mut flow = IntakeFlow::new();

        flow.select_claim_type(&mut draft, ClaimType::Collision);
        assert_eq!(flow.advance(&draft).unwrap(), IntakeStep::OwnVehiclePhotos);

        draft.add_photo(photo(PhotoKind::VehiclePhoto, Some("Frente do Seu Veículo")));
        assert_eq!(flow.advance(&draft).unwrap(), IntakeStep::ThirdPartyInfo);

        draft.third_party_name = Some("José Lima".to_string());
        assert_eq!(flow.advance(&draft).unwrap(), IntakeStep::ThirdPartyPhotos);

        draft.add_photo(photo(PhotoKind::VehiclePhoto, Some("Frente do Outro Veículo")));
        assert_eq!(flow.advance(&draft).unwrap(), IntakeStep::PoliceReport);

        draft.add_photo(photo(PhotoKind::PoliceReport, None));
        assert_eq!(flow.advance(&draft).unwrap(), IntakeStep::Finalize);
        assert!(flow.is_complete());
        assert!(draft.finalize().is_ok());
    }

    /// Selecting theft then answering "documents stolen" goes straight to
    /// the free-text identity step.
    #[test]
    fn test_theft_documents_stolen_skips_captures() {
        let mut draft = FormDraft::new();
        let mut flow = IntakeFlow::new();

        flow.select_claim_type(&mut draft, ClaimType::Theft);
        assert_eq!(flow.advance(&draft).unwrap(), IntakeStep::DocumentsBranch);

        flow.answer_documents_branch(&mut draft, true).unwrap();
        assert_eq!(flow.advance(&draft).unwrap(), IntakeStep::IdentityDetails);
    }

    #[test]
    fn test_guard_blocks_advance() {
        let mut draft = FormDraft::new();
        let mut flow = IntakeFlow::new();

        assert!(matches!(
            flow.advance(&draft),
            Err(IntakeError::CannotProceed(IntakeStep::ClaimTypeSelection))
        ));

        flow.select_claim_type(&mut draft, ClaimType::Collision);
        flow.advance(&draft).unwrap();

        // No own-vehicle photo yet
        assert!(matches!(
            flow.advance(&draft),
            Err(IntakeError::CannotProceed(IntakeStep::OwnVehiclePhotos))
        ));
    }

    #[test]
    fn test_branch_answer_only_valid_at_branch_step() {
        let mut draft = FormDraft::new();
        let mut flow = IntakeFlow::new();

        flow.select_claim_type(&mut draft, ClaimType::Collision);
        assert!(matches!(
            flow.answer_documents_branch(&mut draft, true),
            Err(IntakeError::UnexpectedEvent { .. })
        ));
    }

    #[test]
    fn test_back_preserves_captured_data() {
        let mut draft = FormDraft::new();
        let mut flow = IntakeFlow::new();

        flow.select_claim_type(&mut draft, ClaimType::Collision);
        flow.advance(&draft).unwrap();
        draft.add_photo(photo(PhotoKind::VehiclePhoto, Some("Frente do Seu Veículo")));
        flow.advance(&draft).unwrap();

        assert_eq!(flow.back(), Some(IntakeStep::OwnVehiclePhotos));
        assert_eq!(draft.photos.len(), 1);

        // Advancing again works without recapturing
        assert_eq!(flow.advance(&draft).unwrap(), IntakeStep::ThirdPartyInfo);
    }

    #[test]
    fn test_back_at_start_is_a_no_op() {
        let mut flow = IntakeFlow::new();
        assert_eq!(flow.back(), None);
        assert_eq!(flow.current(), IntakeStep::ClaimTypeSelection);
    }

    #[test]
    fn test_changing_claim_type_resets_position_not_data() {
        let mut draft = FormDraft::new();
        let mut flow = IntakeFlow::new();

        flow.select_claim_type(&mut draft, ClaimType::Theft);
        flow.advance(&draft).unwrap();
        flow.answer_documents_branch(&mut draft, false).unwrap();
        draft.add_photo(photo(PhotoKind::VehiclePhoto, Some("Frente do Seu Veículo")));

        flow.select_claim_type(&mut draft, ClaimType::Collision);
        assert_eq!(flow.current(), IntakeStep::ClaimTypeSelection);
        // The photo survives the type change; the branch answer does not.
        assert_eq!(draft.photos.len(), 1);
        assert_eq!(draft.documents_stolen, None);
    }

    #[test]
    fn test_advance_past_finalize_fails() {
        let mut draft = FormDraft::new();
        let mut flow = IntakeFlow::new();

        flow.select_claim_type(&mut draft, ClaimType::Theft);
        flow.advance(&draft).unwrap();
        flow.answer_documents_branch(&mut draft, true).unwrap();
        flow.advance(&draft).unwrap();

        draft.claimant_name = Some("Maria Souza".to_string());
        draft.claimant_cpf = Some("52998224725".to_string());
        draft.vehicle_plate = Some("ABC1D23".to_string());
        flow.advance(&draft).unwrap();

        draft.add_photo(photo(PhotoKind::VehiclePhoto, Some("Frente do Seu Veículo")));
        flow.advance(&draft).unwrap();

        draft.add_photo(photo(PhotoKind::PoliceReport, None));
        assert_eq!(flow.advance(&draft).unwrap(), IntakeStep::Finalize);

        assert!(matches!(
            flow.advance(&draft),
            Err(IntakeError::UnexpectedEvent { .. })
        ));
    }
}
