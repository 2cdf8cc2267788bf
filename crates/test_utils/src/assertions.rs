//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use domain_intake::{step_sequence, FormDraft, IntakeStep};

/// Asserts that a rendered claim number has the `SIN-<year>-<6 digits>` shape
///
/// # Panics
///
/// Panics with the offending value when the shape does not match
pub fn assert_claim_number_shape(value: &str) {
    let parts: Vec<&str> = value.split('-').collect();
    assert_eq!(parts.len(), 3, "claim number {:?} is not three-part", value);
    assert_eq!(parts[0], "SIN", "claim number {:?} has the wrong prefix", value);
    assert!(
        parts[1].len() == 4 && parts[1].chars().all(|c| c.is_ascii_digit()),
        "claim number {:?} has a malformed year",
        value
    );
    assert!(
        parts[2].len() == 6 && parts[2].chars().all(|c| c.is_ascii_digit()),
        "claim number {:?} has a malformed sequence",
        value
    );
}

/// Asserts that the draft's step sequence visits `step`
pub fn assert_sequence_contains(draft: &FormDraft, step: IntakeStep) {
    let sequence = step_sequence(draft);
    assert!(
        sequence.contains(&step),
        "expected {:?} in sequence {:?}",
        step,
        sequence
    );
}

/// Asserts that the draft's step sequence never visits `step`
pub fn assert_sequence_omits(draft: &FormDraft, step: IntakeStep) {
    let sequence = step_sequence(draft);
    assert!(
        !sequence.contains(&step),
        "expected {:?} to be absent from sequence {:?}",
        step,
        sequence
    );
}

/// Asserts that the sequence ends in finalize preceded by the police report
pub fn assert_sequence_closes_with_report(draft: &FormDraft) {
    let sequence = step_sequence(draft);
    assert!(
        sequence.ends_with(&[IntakeStep::PoliceReport, IntakeStep::Finalize]),
        "sequence {:?} does not close with police report and finalize",
        sequence
    );
}
