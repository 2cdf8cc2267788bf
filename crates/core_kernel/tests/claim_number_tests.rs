//! Unit and property tests for the claim-number value object

use core_kernel::{ClaimNumber, ClaimNumberError, CLAIM_NUMBER_PREFIX};
use proptest::prelude::*;

mod construction_tests {
    use super::*;

    #[test]
    fn test_first_number_of_a_year() {
        let number = ClaimNumber::first(2024);
        assert_eq!(number.year(), 2024);
        assert_eq!(number.sequence(), 1);
        assert_eq!(number.to_string(), "SIN-2024-000001");
    }

    #[test]
    fn test_new_rejects_sequence_overflow() {
        assert!(matches!(
            ClaimNumber::new(2024, 1_000_000),
            Err(ClaimNumberError::SequenceOverflow(1_000_000))
        ));
    }

    #[test]
    fn test_year_prefix() {
        assert_eq!(ClaimNumber::year_prefix(2024), "SIN-2024-");
    }

    #[test]
    fn test_prefix_constant_matches_rendered_form() {
        let rendered = ClaimNumber::first(2030).to_string();
        assert!(rendered.starts_with(CLAIM_NUMBER_PREFIX));
    }
}

mod parsing_tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let number: ClaimNumber = "SIN-2024-000042".parse().unwrap();
        assert_eq!(number.year(), 2024);
        assert_eq!(number.sequence(), 42);
    }

    #[test]
    fn test_parse_rejects_wrong_prefix() {
        assert!("CLM-2024-000042".parse::<ClaimNumber>().is_err());
    }

    #[test]
    fn test_parse_rejects_short_suffix() {
        assert!("SIN-2024-42".parse::<ClaimNumber>().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let number = ClaimNumber::new(2024, 7).unwrap();
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"SIN-2024-000007\"");

        let back: ClaimNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(number, back);
    }
}

proptest! {
    /// Every constructible claim number survives a render/parse round trip.
    #[test]
    fn prop_render_parse_round_trip(year in 2000i32..2100, sequence in 1u32..=999_999) {
        let number = ClaimNumber::new(year, sequence).unwrap();
        let parsed: ClaimNumber = number.to_string().parse().unwrap();
        prop_assert_eq!(number, parsed);
    }

    /// Within a year, sequence ordering and rendered-string ordering agree,
    /// which is what makes the store's lexicographic MAX query safe.
    #[test]
    fn prop_string_ordering_matches_sequence(year in 2000i32..2100, a in 1u32..=999_999, b in 1u32..=999_999) {
        let na = ClaimNumber::new(year, a).unwrap();
        let nb = ClaimNumber::new(year, b).unwrap();
        prop_assert_eq!(a.cmp(&b), na.to_string().cmp(&nb.to_string()));
    }
}
